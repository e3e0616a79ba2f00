//! 静的評価
//!
//! 差分で持っている駒割り＋位置点（`eval_delta`）と未実現の成り価値（`promo_delta`）に、
//! 盤の形から一度だけ作った表を引く局所評価を足す。局所評価は各駒の周囲の決まったマスしか見ない。
//!
//! - 敵陣奥の隅にいる守りのない獅子
//! - 駒が減るほど効く玉の中央寄り
//! - 敵に獅子がいるときの玉の前の守り駒（砦）
//! - 玉の周りの味方の数
//! - 獅子に成る駒の敵陣までの近さ（終盤）
//! - 歩の前を味方がふさぐ形、敵陣での歩の並び

use crate::attack::AttackMap;
use crate::piece::class;
use crate::position::Position;
use crate::types::{BOARD_SIZE, Color, Direction, Square, Value};

// =============================================================================
// 定数
// =============================================================================

/// 敵陣奥の隅で守りのない獅子
const LION_TRAPPED: i32 = 150;
/// 中央からの距離 1 あたり（盤が空いたとき）
const CENTRE_STEP: i32 = 12;
/// 玉の前の守り駒 1 枚あたり
const FORTRESS: i32 = 40;
/// 前 3 マスすべてがそろったときの上乗せ
const FORTRESS_FULL: i32 = 60;
/// 玉に隣接する味方 1 枚あたり
const SHIELD: i32 = 8;
const SHIELD_MAX: i32 = 5;
/// 獅子に成る駒の敵陣到達時の価値
const LION_PROMOTER: i32 = 400;
/// 敵陣まで 1 段あたりの減点
const LION_PROMOTER_STEP: i32 = 50;
/// 歩の前を味方の駒がふさいでいる
const PAWN_BLOCKED: i32 = 15;
/// 敵陣で横に並んだ歩
const PAWN_TANDEM: i32 = 30;

// =============================================================================
// Evaluator
// =============================================================================

/// 盤の形から作った評価用の表
#[derive(Debug, Clone)]
pub struct Evaluator {
    /// [マス] 盤の中心への近さ（中心で最大、隅で 0）
    centre: Vec<i32>,
    /// [手番][マス] 敵陣までの段数（敵陣内は 0）
    to_zone: [Vec<u8>; Color::NUM],
    /// [手番][マス] 敵陣最奥段の隅 2 マスずつ
    corner: [Vec<bool>; Color::NUM],
    initial_fullness: i32,
}

impl Evaluator {
    pub fn new(pos: &Position) -> Self {
        let (files, ranks) = (pos.files(), pos.ranks());
        let depth = pos.variant().zone_depth;
        let mut centre = vec![0; BOARD_SIZE];
        let mut to_zone = [vec![0; BOARD_SIZE], vec![0; BOARD_SIZE]];
        let mut corner = [vec![false; BOARD_SIZE], vec![false; BOARD_SIZE]];

        // 中心は 2 倍座標で扱う
        let (cf, cr) = (files as i32 - 1, ranks as i32 - 1);
        let max_dist = cf.max(cr);
        for sq in pos.squares() {
            let df = (2 * sq.file() as i32 - cf).abs();
            let dr = (2 * sq.rank() as i32 - cr).abs();
            centre[sq.index()] = (max_dist - df.max(dr)) / 2;
            for color in Color::ALL {
                let rr = sq.relative_rank(color, ranks);
                let zone_start = ranks - depth;
                to_zone[color.index()][sq.index()] = zone_start.saturating_sub(rr);
                let edge_file = sq.file() <= 1 || sq.file() + 2 >= files;
                corner[color.index()][sq.index()] = rr + 1 == ranks && edge_file;
            }
        }

        Evaluator {
            centre,
            to_zone,
            corner,
            initial_fullness: pos.initial_fullness().max(1),
        }
    }

    /// 手番側から見た評価値
    pub fn evaluate(&self, pos: &Position, attacks: &AttackMap) -> Value {
        let departed = (self.initial_fullness - pos.fullness()).clamp(0, self.initial_fullness);
        let mut score = pos.eval_delta() + pos.promo_delta() * departed / (2 * self.initial_fullness);
        for color in Color::ALL {
            score += color.sign() * self.side_score(pos, attacks, color, departed);
        }
        let score = score * pos.side_to_move().sign();
        Value::new(score.clamp(Value::MATED_IN_MAX_PLY.raw() + 1, Value::MATE_IN_MAX_PLY.raw() - 1))
    }

    fn side_score(&self, pos: &Position, attacks: &AttackMap, color: Color, departed: i32) -> i32 {
        let enemy_lion = pos
            .pieces_of(!color)
            .any(|id| pos.desc(id).has(class::LION));
        let mut score = 0;

        for id in pos.pieces_of(color) {
            let sq = pos.piece(id).pos;
            let desc = pos.desc(id);
            if desc.has(class::ROYAL) {
                score += self.centre[sq.index()] * CENTRE_STEP * departed / self.initial_fullness;
                score += shield(pos, color, sq);
                if enemy_lion {
                    score += fortress(pos, attacks, color, sq);
                }
            }
            if desc.has(class::LION) {
                score += self.lion_trap(attacks, color, sq);
            }
            if desc.has(class::PAWN) {
                score += pawn_shape(pos, color, sq);
            }
            if pos.piece(id).counterpart.is_some_and(|p| !pos.piece(id).promoted && pos.desc(p).has_lion_power()) {
                score += self.lion_promoter(attacks, color, sq) * departed / self.initial_fullness;
            }
        }
        score
    }

    fn lion_trap(&self, attacks: &AttackMap, color: Color, sq: Square) -> i32 {
        if self.corner[color.index()][sq.index()] && !attacks.is_attacked(sq, color) {
            -LION_TRAPPED
        } else {
            0
        }
    }

    /// 敵陣に近いほど大きく、相手の利きの方が多いマスなら半分
    fn lion_promoter(&self, attacks: &AttackMap, color: Color, sq: Square) -> i32 {
        let steps = self.to_zone[color.index()][sq.index()] as i32;
        let bonus = (LION_PROMOTER - steps * LION_PROMOTER_STEP).max(0);
        if attacks.count(sq, !color) > attacks.count(sq, color) {
            bonus / 2
        } else {
            bonus
        }
    }
}

// =============================================================================
// 近傍だけを見る評価項目
// =============================================================================

fn shield(pos: &Position, color: Color, king: Square) -> i32 {
    let friends = Direction::ALL
        .iter()
        .filter(|d| {
            pos.piece_at(king + d.offset())
                .is_some_and(|id| id.color() == color)
        })
        .count() as i32;
    friends.min(SHIELD_MAX) * SHIELD
}

/// 玉の前 3 マスに守られた守り駒
fn fortress(pos: &Position, attacks: &AttackMap, color: Color, king: Square) -> i32 {
    let guards = [Direction::NW, Direction::N, Direction::NE]
        .iter()
        .filter(|d| {
            let sq = king + d.for_color(color).offset();
            pos.piece_at(sq).is_some_and(|id| {
                id.color() == color && pos.desc(id).has(class::GUARD) && attacks.is_attacked(sq, color)
            })
        })
        .count() as i32;
    guards * FORTRESS + if guards == 3 { FORTRESS_FULL } else { 0 }
}

fn pawn_shape(pos: &Position, color: Color, sq: Square) -> i32 {
    let mut score = 0;
    let ahead = sq + Direction::N.for_color(color).offset();
    if let Some(id) = pos.piece_at(ahead)
        && id.color() == color
        && !pos.desc(id).has(class::PAWN)
    {
        score -= PAWN_BLOCKED;
    }
    // 右隣だけを見て 1 組を 1 回数える
    let side = sq + Direction::E.for_color(color).offset();
    if pos.zone().in_zone(sq, color)
        && pos
            .piece_at(side)
            .is_some_and(|id| id.color() == color && pos.desc(id).has(class::PAWN))
    {
        score += PAWN_TANDEM;
    }
    score
}
