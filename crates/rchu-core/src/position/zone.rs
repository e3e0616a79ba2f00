//! 敵陣マップと成りの判定

use crate::piece::promo_rule;
use crate::types::{BOARD_SIZE, Color, Square};

use super::{PieceId, Position};

const ZONE: [u8; 2] = [1 << 0, 1 << 1];
const LAST: [u8; 2] = [1 << 2, 1 << 3];
const LAST_TWO: [u8; 2] = [1 << 4, 1 << 5];

/// マスごとの敵陣・最奥段フラグ（盤の形から一度だけ作る）
#[derive(Debug, Clone)]
pub struct ZoneMap {
    flags: Vec<u8>,
}

impl ZoneMap {
    pub fn new(files: u8, ranks: u8, depth: u8) -> Self {
        let mut flags = vec![0u8; BOARD_SIZE];
        for rank in 0..ranks {
            for file in 0..files {
                let sq = Square::new(file, rank);
                for color in Color::ALL {
                    // 相手陣側から数えた段（0 が最奥）
                    let from_far = ranks - 1 - sq.relative_rank(color, ranks);
                    let c = color.index();
                    let f = &mut flags[sq.index()];
                    if from_far < depth {
                        *f |= ZONE[c];
                    }
                    if from_far == 0 {
                        *f |= LAST[c];
                    }
                    if from_far < 2 {
                        *f |= LAST_TWO[c];
                    }
                }
            }
        }
        ZoneMap { flags }
    }

    /// `color` にとっての敵陣か
    #[inline]
    pub fn in_zone(&self, sq: Square, color: Color) -> bool {
        self.flags[sq.index()] & ZONE[color.index()] != 0
    }

    #[inline]
    pub fn is_last(&self, sq: Square, color: Color) -> bool {
        self.flags[sq.index()] & LAST[color.index()] != 0
    }

    #[inline]
    pub fn is_last_two(&self, sq: Square, color: Color) -> bool {
        self.flags[sq.index()] & LAST_TWO[color.index()] != 0
    }
}

/// ある移動で選べる成り・不成
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoChoice {
    /// 成れない
    No,
    /// 成りと不成の両方を選べる
    May,
    /// 取らずに敵陣へ入る移動。不成を選ぶと次の手番でその場での成りを失う
    MayDeferEntering,
    /// 不成にできない
    Must,
}

impl Position {
    /// `id` の駒が `from` から `to` へ動くときの成りの選択肢
    ///
    /// 多段手では最終マスだけで判定する。
    pub fn promotion_choice(&self, id: PieceId, from: Square, to: Square, capture: bool) -> PromoChoice {
        let entry = self.piece(id);
        if entry.promoted || entry.counterpart.is_none() {
            return PromoChoice::No;
        }
        let us = id.color();
        let desc = self.desc(id);
        let zone = self.zone();
        let must = (desc.promo_rule & promo_rule::MUST_LAST != 0 && zone.is_last(to, us))
            || (desc.promo_rule & promo_rule::MUST_LAST_TWO != 0 && zone.is_last_two(to, us));
        if must {
            return PromoChoice::Must;
        }

        let from_in = zone.in_zone(from, us);
        let to_in = zone.in_zone(to, us);
        if !from_in && !to_in {
            return PromoChoice::No;
        }
        if !from_in {
            // 敵陣に入る手
            return if capture {
                PromoChoice::May
            } else {
                PromoChoice::MayDeferEntering
            };
        }
        if capture || self.deferred(us) != Some(from) {
            PromoChoice::May
        } else {
            PromoChoice::No
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_depth_per_color() {
        let zone = ZoneMap::new(12, 12, 4);
        assert!(zone.in_zone(Square::new(0, 8), Color::Black));
        assert!(!zone.in_zone(Square::new(0, 7), Color::Black));
        assert!(zone.in_zone(Square::new(5, 3), Color::White));
        assert!(!zone.in_zone(Square::new(5, 4), Color::White));
        assert!(zone.is_last(Square::new(3, 11), Color::Black));
        assert!(zone.is_last(Square::new(3, 0), Color::White));
        assert!(zone.is_last_two(Square::new(3, 10), Color::Black));
        assert!(!zone.is_last_two(Square::new(3, 9), Color::Black));
    }
}
