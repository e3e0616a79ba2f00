//! 駒を取る手の生成
//!
//! 取られる駒のマスを起点に、利きマップで利きのある方向だけ逆向きに歩いて攻め駒を探す。
//! 二枚取り（獅子・二歩・三歩）は価値が最も高い被取り駒（同値なら手順の早い方）のマスで
//! 生成するので、全被取り駒について [`captures_on`] を呼べば各手はちょうど一度ずつ現れる。

use smallvec::SmallVec;

use crate::attack::AttackMap;
use crate::piece::Range;
use crate::position::{PieceId, Position};
use crate::types::{Color, Direction, Move, Square};

use super::push_with_promotion;

/// 手番側の取る手をすべて生成する（価値の高い被取り駒から順に）
pub fn generate_captures(pos: &Position, attacks: &AttackMap, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let mut victims: SmallVec<[(i32, Square); 64]> = pos
        .pieces_of(!us)
        .map(|id| pos.piece(id))
        .filter(|e| attacks.is_attacked(e.pos, us))
        .map(|e| (e.value, e.pos))
        .collect();
    victims.sort_by(|a, b| b.0.cmp(&a.0));
    for &(_, target) in &victims {
        captures_on(pos, attacks, target, out);
    }
}

/// `target` の敵駒を取る手（二枚取りはこの駒が主な被取り駒の場合だけ）
pub fn captures_on(pos: &Position, attacks: &AttackMap, target: Square, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    match pos.piece_at(target) {
        Some(victim) if victim.color() != us => {}
        _ => return,
    }
    if !attacks.is_attacked(target, us) {
        return;
    }

    for dir in Direction::ALL {
        if attacks.direction_count(target, us, dir) == 0 {
            continue;
        }
        // 攻め駒は利きの進行方向と逆側にいる
        let back = dir.reverse().offset();
        let mut sq = target;
        let mut k = 0u8;
        loop {
            sq = sq + back;
            k += 1;
            if pos.is_edge(sq) {
                break;
            }
            let Some(id) = pos.piece_at(sq) else {
                continue;
            };
            if id.color() == us {
                line_captures(pos, id, dir, k, target, out);
            }
            // 駒を越えて届くのは 3 マス以内
            if k >= 3 {
                break;
            }
        }
    }

    if attacks.irregular(target, us) > 0 {
        for dir in Direction::ALL {
            let from = target - dir.knight_offset();
            let Some(id) = pos.piece_at(from).filter(|id| id.color() == us) else {
                continue;
            };
            let desc = pos.desc(id);
            if desc.has_lion_power() {
                lion_captures(pos, id, target, out);
            } else if desc.range(dir.for_color(us)) == Range::Knight {
                push_with_promotion(pos, id, Move::normal(from, target), true, out);
            }
        }
        hook_captures(pos, us, target, out);
    }
}

#[inline]
fn value_at(pos: &Position, sq: Square) -> i32 {
    pos.piece_at(sq).map_or(0, |id| pos.piece(id).value)
}

#[inline]
fn is_enemy(pos: &Position, sq: Square, us: Color) -> bool {
    pos.piece_at(sq).is_some_and(|id| id.color() != us)
}

#[inline]
fn is_friend(pos: &Position, sq: Square, us: Color) -> bool {
    pos.piece_at(sq).is_some_and(|id| id.color() == us)
}

/// 直線上 `k` マス手前の駒 `id` が `dir` 向きに `target` を取る手
fn line_captures(pos: &Position, id: PieceId, dir: Direction, k: u8, target: Square, out: &mut Vec<Move>) {
    let desc = pos.desc(id);
    let from = pos.piece(id).pos;
    let off = dir.offset();
    if desc.has_lion_power() {
        if k <= 2 {
            lion_captures(pos, id, target, out);
        }
        return;
    }
    let range = desc.range(dir.for_color(id.color()));
    let clear = (1..k as i16).all(|n| pos.is_empty(from.step(off, n)));
    match range {
        Range::Slide(_) | Range::Unlimited | Range::Hook => {
            if k <= range.reach() && clear {
                push_with_promotion(pos, id, Move::normal(from, target), true, out);
            }
        }
        Range::CaptureOnly => {
            if k == 1 {
                push_with_promotion(pos, id, Move::normal(from, target), true, out);
            }
        }
        Range::Jump => {
            if k == 2 {
                push_with_promotion(pos, id, Move::normal(from, target), true, out);
            }
        }
        Range::DoubleStep => double_step_captures(pos, id, dir, k, target, out),
        Range::TripleStep => triple_step_captures(pos, id, dir, k, target, out),
        Range::None | Range::Knight | Range::Lion => {}
    }
}

/// 二歩（直線上の獅子の動き）で `target` を取る手
fn double_step_captures(pos: &Position, id: PieceId, dir: Direction, k: u8, target: Square, out: &mut Vec<Move>) {
    let us = id.color();
    let from = pos.piece(id).pos;
    let near = from + dir.offset();
    let far = from.step(dir.offset(), 2);
    let value = value_at(pos, target);
    let push = |mv: Move, out: &mut Vec<Move>| push_with_promotion(pos, id, mv, true, out);
    match k {
        1 => {
            push(Move::normal(from, near), out);
            push(Move::with_leg(from, near, from), out);
            if pos.is_empty(far) || (is_enemy(pos, far, us) && value_at(pos, far) <= value) {
                push(Move::with_leg(from, near, far), out);
            }
        }
        2 => {
            push(Move::normal(from, far), out);
            if is_enemy(pos, near, us) && value_at(pos, near) < value {
                push(Move::with_leg(from, near, far), out);
            }
        }
        _ => {}
    }
}

/// 直線上を 3 歩まで進みながら取る手
fn triple_step_captures(pos: &Position, id: PieceId, dir: Direction, k: u8, target: Square, out: &mut Vec<Move>) {
    let us = id.color();
    let from = pos.piece(id).pos;
    let off = dir.offset();
    for n in 1..k as i16 {
        let sq = from.step(off, n);
        if pos.is_edge(sq) || is_friend(pos, sq, us) {
            return;
        }
    }
    for m in k as i16..=3 {
        let to = from.step(off, m);
        if pos.is_edge(to) || is_friend(pos, to, us) {
            break;
        }
        // 主な被取り駒（価値最大、同値なら手前）
        let mut best: Option<(i32, Square)> = None;
        let mut legs: SmallVec<[Square; 2]> = SmallVec::new();
        for n in 1..=m {
            let sq = from.step(off, n);
            if !is_enemy(pos, sq, us) {
                continue;
            }
            let v = value_at(pos, sq);
            if best.is_none_or(|(bv, _)| v > bv) {
                best = Some((v, sq));
            }
            if n < m {
                legs.push(sq);
            }
        }
        if best.map(|(_, sq)| sq) != Some(target) {
            continue;
        }
        let mv = match legs.as_slice() {
            [] => Move::normal(from, to),
            [a] => Move::with_leg(from, *a, to),
            [a, b, ..] => Move::with_legs(from, *a, *b, to),
        };
        push_with_promotion(pos, id, mv, true, out);
    }
}

/// 獅子の取る手（`target` を一枚目または主な被取り駒とするもの）
fn lion_captures(pos: &Position, id: PieceId, target: Square, out: &mut Vec<Move>) {
    let us = id.color();
    let from = pos.piece(id).pos;
    let value = value_at(pos, target);
    let push = |mv: Move, out: &mut Vec<Move>| push_with_promotion(pos, id, mv, true, out);

    match from.distance(target) {
        1 => {
            push(Move::normal(from, target), out);
            // 居食い
            push(Move::with_leg(from, target, from), out);
            for dir in Direction::ALL {
                let next = target + dir.offset();
                if next == from || pos.is_edge(next) {
                    continue;
                }
                // 取って抜ける・二枚取り（二枚目が高ければそちらで生成する）
                if pos.is_empty(next) || (is_enemy(pos, next, us) && value_at(pos, next) <= value) {
                    push(Move::with_leg(from, target, next), out);
                }
            }
        }
        2 => push(Move::normal(from, target), out),
        _ => return,
    }

    // `target` を二枚目として取る手
    for dir in Direction::ALL {
        let first = target + dir.offset();
        if first == from || from.distance(first) != 1 || !is_enemy(pos, first, us) {
            continue;
        }
        if value_at(pos, first) < value {
            push(Move::with_leg(from, first, target), out);
        }
    }
}

/// 鉤の曲がる手で `target` を取る手
fn hook_captures(pos: &Position, us: Color, target: Square, out: &mut Vec<Move>) {
    for id in pos.pieces_of(us) {
        let desc = pos.desc(id);
        if !desc.ranges.contains(&Range::Hook) {
            continue;
        }
        let from = pos.piece(id).pos;
        let reaches = Direction::ALL
            .into_iter()
            .filter(|&rel| desc.range(rel) == Range::Hook)
            .any(|rel| hook_turn_reaches(pos, from, rel.for_color(us), target));
        if reaches {
            push_with_promotion(pos, id, Move::normal(from, target), true, out);
        }
    }
}

fn hook_turn_reaches(pos: &Position, from: Square, dir: Direction, target: Square) -> bool {
    let mut corner = from + dir.offset();
    while pos.is_empty(corner) {
        for turn in [dir.turn_left(), dir.turn_right()] {
            let mut sq = corner + turn.offset();
            loop {
                if sq == target {
                    return true;
                }
                if !pos.is_empty(sq) {
                    break;
                }
                sq = sq + turn.offset();
            }
        }
        corner = corner + dir.offset();
    }
    false
}
