//! 合法性の判定
//!
//! 生成器の出す手のうち、次のものを非合法とする。
//!
//! - 獅子を獅子以外で取られた直後に、獅子以外で獅子を取る手
//! - 離れた獅子を橋（歩・仲人以外の駒）なしに取り、取り返される手
//! - 指した後に自分の最後の王将を取られる形になる手

use crate::attack::AttackMap;
use crate::error::IllegalMove;
use crate::piece::class;
use crate::position::Position;
use crate::types::Move;

use super::generate_all;

/// 多段手で取る駒のマス（手順どおり）
fn victim_squares(pos: &Position, mv: Move) -> impl Iterator<Item = crate::types::Square> + '_ {
    let us = pos.side_to_move();
    mv.legs()
        .chain(std::iter::once(mv.to()))
        .filter(move |&sq| pos.piece_at(sq).is_some_and(|id| id.color() != us))
}

/// 獅子の取り返し制限にかかる手か（指す前の局面で判定する）
pub fn is_counterstrike(pos: &Position, mv: Move) -> bool {
    if !pos.variant().lion_trading || !pos.counterstrike() || mv.is_null() {
        return false;
    }
    let Some(mover) = pos.piece_at(mv.from()) else {
        return false;
    };
    if pos.desc(mover).has(class::LION) {
        return false;
    }
    victim_squares(pos, mv).any(|sq| {
        pos.piece_at(sq)
            .is_some_and(|id| pos.desc(id).has(class::LION))
    })
}

/// 獅子が離れた獅子を橋なしに取る手か
///
/// 指した後に取り返されるなら非合法になる。
pub fn is_distant_lion_capture(pos: &Position, mv: Move) -> bool {
    if !pos.variant().lion_trading || mv.is_null() {
        return false;
    }
    let Some(mover) = pos.piece_at(mv.from()) else {
        return false;
    };
    if !pos.desc(mover).has(class::LION) {
        return false;
    }
    let mut distant_lion = false;
    let mut bridge = false;
    for sq in victim_squares(pos, mv) {
        let Some(id) = pos.piece_at(sq) else {
            continue;
        };
        let desc = pos.desc(id);
        if desc.has(class::LION) {
            distant_lion |= !sq.is_adjacent(mv.from());
        } else if !desc.has(class::LOW) {
            bridge = true;
        }
    }
    distant_lion && !bridge
}

/// 手番側が `mv` を指せるか調べる
///
/// `after` には指した後の利きマップが残る（非合法の場合も含む）。
/// 局面は呼び出し前の状態に戻る。
pub fn check_move(pos: &mut Position, mv: Move, after: &mut AttackMap) -> Result<(), IllegalMove> {
    if is_counterstrike(pos, mv) {
        return Err(IllegalMove::Counterstrike);
    }
    let distant = is_distant_lion_capture(pos, mv);
    let us = pos.side_to_move();

    let undo = pos.make_move(mv);
    after.compute(pos);
    let exposed = match pos.royal_count(us) {
        0 => true,
        1 => pos.royals(us).any(|sq| after.is_attacked(sq, !us)),
        _ => false,
    };
    let verdict = if exposed {
        Err(IllegalMove::RoyalExposed)
    } else if distant && after.is_attacked(mv.to(), !us) {
        Err(IllegalMove::ProtectedLion)
    } else {
        Ok(())
    };
    pos.unmake_move(&undo);
    verdict
}

/// 手番側の合法手
pub fn legal_moves(pos: &mut Position) -> Vec<Move> {
    let attacks = AttackMap::from_position(pos);
    let mut moves = Vec::new();
    generate_all(pos, &attacks, &mut moves);
    let mut after = AttackMap::new();
    moves.retain(|&mv| check_move(pos, mv, &mut after).is_ok());
    moves
}
