//! 指し手生成
//!
//! - 駒を取らない手: 手番側の駒ごとに各方向の利きの種類に従って空きマスを列挙する
//! - 駒を取る手: 利きマップを手がかりに、取られる駒のマスから逆向きに攻め駒を探す
//!   （[`captures_on`]）。二枚取りは価値の高い方の被取り駒のもとで一度だけ生成する
//! - パス: 獅子か 2 歩の動きを持つ駒が、その方向の隣の空きマスへ出て戻る手
//!
//! 生成器は自玉を取られる形かどうかは調べない。それは探索（玉取り判定）か
//! [`legal_moves`] の仕事。

mod capture;
mod legal;
mod quiet;

pub use capture::{captures_on, generate_captures};
pub use legal::{check_move, is_counterstrike, is_distant_lion_capture, legal_moves};
pub use quiet::generate_quiets;

use crate::attack::AttackMap;
use crate::piece::Range;
use crate::position::{PieceId, PromoChoice, Position};
use crate::types::{Direction, Move, Square};

/// 成り・不成の組を追加する
fn push_with_promotion(pos: &Position, id: PieceId, mv: Move, capture: bool, out: &mut Vec<Move>) {
    match pos.promotion_choice(id, mv.from(), mv.to(), capture) {
        PromoChoice::No => out.push(mv),
        PromoChoice::May => {
            out.push(mv.promoting());
            out.push(mv);
        }
        PromoChoice::MayDeferEntering => {
            out.push(mv.promoting());
            out.push(mv.deferring());
        }
        PromoChoice::Must => out.push(mv.promoting()),
    }
}

/// パスできるならパスを追加する
pub fn generate_null(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    // 獅子の動きか 2 歩の動きを持つ方向の 1 歩目が空いていること
    let can_pass = pos.pieces_of(us).any(|id| {
        let desc = pos.desc(id);
        let from = pos.piece(id).pos;
        Direction::ALL.iter().any(|&rel| {
            matches!(desc.range(rel), Range::Lion | Range::DoubleStep)
                && pos.is_empty(from + rel.for_color(us).offset())
        })
    });
    if can_pass {
        out.push(Move::NULL);
    }
}

/// 取る手・取らない手・パスをすべて生成する
pub fn generate_all(pos: &Position, attacks: &AttackMap, out: &mut Vec<Move>) {
    generate_captures(pos, attacks, out);
    generate_quiets(pos, out);
    generate_null(pos, out);
}

/// `from` の駒の移動先（合法手だけ、重複なし）
pub fn destinations(pos: &mut Position, from: Square) -> Vec<Square> {
    let mut out: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|mv| !mv.is_null() && mv.from() == from)
        .map(|mv| mv.to())
        .collect();
    out.sort();
    out.dedup();
    out
}
