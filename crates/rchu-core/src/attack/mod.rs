//! 利きマップ
//!
//! マス×手番ごとに 32bit の値を持つ。下位 24bit は 8 方向（利きの進行方向）ごとの 3bit カウンタで、
//! その方向から何本の直線の利きが届いているかを表す。上位 8bit は桂跳び・獅子の直線外の 2 マス目・
//! 鉤の二段目といった不規則な利きの数。
//!
//! 獅子・鉤・三歩などの組み合わせがあるため差分更新はせず、手を指すたびに盤全体から作り直す。
//! 探索側は手数ごとに 1 枚ずつ持つ。

use crate::piece::Range;
use crate::position::Position;
use crate::types::{BOARD_SIZE, Color, Direction, Square};

const RAY_BITS: u32 = 3;
const RAY_MASK: u32 = (1 << RAY_BITS) - 1;
const IRREGULAR_SHIFT: u32 = 24;
const IRREGULAR_MASK: u32 = 0xFF << IRREGULAR_SHIFT;

#[derive(Clone, PartialEq, Eq)]
pub struct AttackMap {
    counts: Vec<u32>,
}

impl Default for AttackMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AttackMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let busy = self.counts.iter().filter(|&&c| c != 0).count();
        f.debug_struct("AttackMap").field("attacked", &busy).finish()
    }
}

#[inline]
fn slot(sq: Square, color: Color) -> usize {
    sq.index() * Color::NUM + color.index()
}

impl AttackMap {
    pub fn new() -> Self {
        AttackMap {
            counts: vec![0; BOARD_SIZE * Color::NUM],
        }
    }

    /// 局面から作り直す
    pub fn compute(&mut self, pos: &Position) {
        self.counts.fill(0);
        for color in Color::ALL {
            for id in pos.pieces_of(color) {
                self.add_piece(pos, color, pos.piece(id).pos, pos.desc(id));
            }
        }
    }

    /// 局面から新しく作る
    pub fn from_position(pos: &Position) -> Self {
        let mut map = AttackMap::new();
        map.compute(pos);
        map
    }

    fn add_piece(&mut self, pos: &Position, color: Color, from: Square, desc: &crate::piece::PieceDesc) {
        if desc.has_lion_power() {
            self.add_lion(pos, color, from);
        }
        for rel in Direction::ALL {
            let dir = rel.for_color(color);
            let off = dir.offset();
            match desc.range(rel) {
                Range::None | Range::Lion => {}
                Range::Slide(_) | Range::Unlimited | Range::CaptureOnly => {
                    let reach = desc.range(rel).reach();
                    let mut sq = from;
                    for _ in 0..reach {
                        sq = sq + off;
                        if pos.is_edge(sq) {
                            break;
                        }
                        self.add_ray(sq, color, dir);
                        if !pos.is_empty(sq) {
                            break;
                        }
                    }
                }
                Range::Jump => {
                    let sq = from.step(off, 2);
                    if !pos.is_edge(sq) {
                        self.add_ray(sq, color, dir);
                    }
                }
                Range::DoubleStep => {
                    for n in 1..=2 {
                        let sq = from.step(off, n);
                        if !pos.is_edge(sq) {
                            self.add_ray(sq, color, dir);
                        }
                    }
                }
                Range::TripleStep => {
                    for n in 1..=3 {
                        let sq = from.step(off, n);
                        if pos.is_edge(sq) {
                            break;
                        }
                        self.add_ray(sq, color, dir);
                        match pos.piece_at(sq) {
                            Some(id) if id.color() == color => break,
                            _ => {}
                        }
                    }
                }
                Range::Knight => {
                    let sq = from + dir.knight_offset();
                    if !pos.is_edge(sq) {
                        self.add_irregular(sq, color);
                    }
                }
                Range::Hook => self.add_hook(pos, color, from, dir),
            }
        }
    }

    /// 獅子の利き（5×5 の範囲）
    fn add_lion(&mut self, pos: &Position, color: Color, from: Square) {
        for dir in Direction::ALL {
            let off = dir.offset();
            for n in 1..=2 {
                let sq = from.step(off, n);
                if !pos.is_edge(sq) {
                    self.add_ray(sq, color, dir);
                }
            }
            let sq = from + dir.knight_offset();
            if !pos.is_edge(sq) {
                self.add_irregular(sq, color);
            }
        }
    }

    /// 鉤の利き（直進と、途中の空きマスから 90 度曲がった先）
    fn add_hook(&mut self, pos: &Position, color: Color, from: Square, dir: Direction) {
        let mut corner = from + dir.offset();
        while !pos.is_edge(corner) {
            self.add_ray(corner, color, dir);
            if !pos.is_empty(corner) {
                break;
            }
            for turn in [dir.turn_left(), dir.turn_right()] {
                let mut sq = corner + turn.offset();
                while !pos.is_edge(sq) {
                    self.add_irregular(sq, color);
                    if !pos.is_empty(sq) {
                        break;
                    }
                    sq = sq + turn.offset();
                }
            }
            corner = corner + dir.offset();
        }
    }

    #[inline]
    fn add_ray(&mut self, sq: Square, color: Color, dir: Direction) {
        let shift = dir.index() as u32 * RAY_BITS;
        let c = &mut self.counts[slot(sq, color)];
        if (*c >> shift) & RAY_MASK != RAY_MASK {
            *c += 1 << shift;
        }
    }

    #[inline]
    fn add_irregular(&mut self, sq: Square, color: Color) {
        let c = &mut self.counts[slot(sq, color)];
        if *c & IRREGULAR_MASK != IRREGULAR_MASK {
            *c += 1 << IRREGULAR_SHIFT;
        }
    }

    /// パックされた生の値
    #[inline]
    pub fn raw(&self, sq: Square, color: Color) -> u32 {
        self.counts[slot(sq, color)]
    }

    #[inline]
    pub fn is_attacked(&self, sq: Square, color: Color) -> bool {
        self.raw(sq, color) != 0
    }

    /// `dir` の向きに進んでくる直線の利きの数
    #[inline]
    pub fn direction_count(&self, sq: Square, color: Color, dir: Direction) -> u32 {
        (self.raw(sq, color) >> (dir.index() as u32 * RAY_BITS)) & RAY_MASK
    }

    #[inline]
    pub fn irregular(&self, sq: Square, color: Color) -> u32 {
        self.raw(sq, color) >> IRREGULAR_SHIFT
    }

    /// 利きの総数
    pub fn count(&self, sq: Square, color: Color) -> u32 {
        Direction::ALL
            .iter()
            .map(|&d| self.direction_count(sq, color, d))
            .sum::<u32>()
            + self.irregular(sq, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::CHU;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank)
    }

    #[test]
    fn test_rook_rays_stop_at_first_piece() {
        let pos = Position::setup(&CHU, "k11/12/12/12/12/12/12/1p10/12/12/1R10/K11 b").unwrap();
        let map = AttackMap::from_position(&pos);
        assert_eq!(map.direction_count(sq(1, 2), Color::Black, Direction::N), 1);
        assert_eq!(map.direction_count(sq(1, 4), Color::Black, Direction::N), 1);
        assert!(!map.is_attacked(sq(1, 5), Color::Black));
        assert_eq!(map.direction_count(sq(11, 1), Color::Black, Direction::E), 1);
        // 後手の歩の利きは後手から見て前（盤の下向き）
        assert_eq!(map.direction_count(sq(1, 3), Color::White, Direction::S), 1);
    }

    #[test]
    fn test_lion_covers_five_by_five() {
        let pos = Position::setup(&CHU, "k11/12/12/12/12/12/5N6/12/12/12/12/K11 b").unwrap();
        let map = AttackMap::from_position(&pos);
        let lion = sq(5, 5);
        let mut attacked = 0;
        for f in 3..=7 {
            for r in 3..=7 {
                let s = sq(f, r);
                if s != lion {
                    assert!(map.is_attacked(s, Color::Black), "{f},{r}");
                    attacked += 1;
                }
            }
        }
        assert_eq!(attacked, 24);
        assert_eq!(map.irregular(sq(6, 7), Color::Black), 1);
        assert_eq!(map.direction_count(sq(5, 7), Color::Black, Direction::N), 1);
    }

    #[test]
    fn test_kirin_jumps_over_pieces() {
        let pos = Position::setup(&CHU, "k11/12/12/12/12/12/12/5P6/5O6/12/12/K11 b").unwrap();
        let map = AttackMap::from_position(&pos);
        // 歩と麒麟の 2 本
        assert_eq!(map.direction_count(sq(5, 5), Color::Black, Direction::N), 2);
        assert!(!map.is_attacked(sq(5, 4), Color::Black));
    }
}
