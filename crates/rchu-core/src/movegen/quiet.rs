//! 駒を取らない手の生成

use crate::piece::Range;
use crate::position::{PieceId, Position};
use crate::types::{Direction, Move, Offset, Square};

use super::push_with_promotion;

/// 手番側の駒を取らない手をすべて生成する
pub fn generate_quiets(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    for id in pos.pieces_of(us) {
        piece_quiets(pos, id, out);
    }
}

fn piece_quiets(pos: &Position, id: PieceId, out: &mut Vec<Move>) {
    let desc = pos.desc(id);
    let from = pos.piece(id).pos;
    let color = id.color();
    let push = |to: Square, out: &mut Vec<Move>| {
        push_with_promotion(pos, id, Move::normal(from, to), false, out);
    };

    if desc.has_lion_power() {
        // 2 マス以内の空きマスはすべて行ける
        for dr in -2i16..=2 {
            for df in -2i16..=2 {
                if df == 0 && dr == 0 {
                    continue;
                }
                let to = from + Offset::new(df, dr);
                if pos.is_empty(to) {
                    push(to, out);
                }
            }
        }
    }

    let hook_start = out.len();
    for rel in Direction::ALL {
        let dir = rel.for_color(color);
        let off = dir.offset();
        match desc.range(rel) {
            Range::None | Range::Lion | Range::CaptureOnly => {}
            Range::Slide(_) | Range::Unlimited | Range::TripleStep => {
                let reach = desc.range(rel).reach();
                let mut to = from;
                for _ in 0..reach {
                    to = to + off;
                    if !pos.is_empty(to) {
                        break;
                    }
                    push(to, out);
                }
            }
            Range::Jump => {
                let to = from.step(off, 2);
                if pos.is_empty(to) {
                    push(to, out);
                }
            }
            Range::DoubleStep => {
                for n in 1..=2 {
                    let to = from.step(off, n);
                    if pos.is_empty(to) {
                        push(to, out);
                    }
                }
            }
            Range::Knight => {
                let to = from + dir.knight_offset();
                if pos.is_empty(to) {
                    push(to, out);
                }
            }
            Range::Hook => {
                let mut corner = from + off;
                while pos.is_empty(corner) {
                    push(corner, out);
                    for turn in [dir.turn_left(), dir.turn_right()] {
                        let mut to = corner + turn.offset();
                        while pos.is_empty(to) {
                            // 2 通りの曲がり角から同じマスに届くことがある
                            let mv = Move::normal(from, to);
                            if !out[hook_start..].iter().any(|m| m.same_path(mv)) {
                                push(to, out);
                            }
                            to = to + turn.offset();
                        }
                    }
                    corner = corner + off;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{CHU, PieceDesc, Variant};
    use crate::piece::notation::*;
    use crate::types::Color;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank)
    }

    fn quiets_from(pos: &Position, from: Square) -> Vec<Move> {
        let mut out = Vec::new();
        generate_quiets(pos, &mut out);
        out.retain(|m| m.from() == from);
        out
    }

    #[test]
    fn test_gold_general_steps() {
        let pos = Position::setup(&CHU, "k11/12/12/12/12/12/5G6/12/12/12/12/K11 b").unwrap();
        let moves = quiets_from(&pos, sq(5, 5));
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|m| !m.is_promotion()));
    }

    #[test]
    fn test_white_pawn_moves_down() {
        let pos = Position::setup(&CHU, "k11/12/12/12/12/12/5p6/12/12/12/12/K11 w").unwrap();
        let moves = quiets_from(&pos, sq(5, 5));
        assert_eq!(moves, vec![Move::normal(sq(5, 5), sq(5, 4))]);
    }

    #[test]
    fn test_pawn_entering_zone_offers_deferral() {
        let pos = Position::setup(&CHU, "k11/12/12/12/5P6/12/12/12/12/12/12/K11 b").unwrap();
        let moves = quiets_from(&pos, sq(5, 7));
        let to = sq(5, 8);
        assert_eq!(
            moves,
            vec![
                Move::normal(sq(5, 7), to).promoting(),
                Move::normal(sq(5, 7), to).deferring(),
            ]
        );
    }

    #[test]
    fn test_lion_quiets_fill_five_by_five() {
        let pos = Position::setup(&CHU, "k11/12/12/12/12/12/5N6/12/12/12/12/K11 b").unwrap();
        assert_eq!(quiets_from(&pos, sq(5, 5)).len(), 24);
    }

    static HOOK_PIECES: [PieceDesc; 2] = [
        PieceDesc::new("K", "King", 1000, [W, W, W, W, W, W, W, W]).classes(crate::piece::class::ROYAL),
        PieceDesc::new("C", "Capricorn", 1200, [O, H, O, H, O, H, O, H]),
    ];
    static HOOK_VARIANT: Variant = Variant {
        name: "hook-test",
        files: 5,
        ranks: 5,
        zone_depth: 1,
        pieces: &HOOK_PIECES,
        start: "k4/5/2C2/5/K4 b",
        lion_trading: false,
    };

    #[test]
    fn test_hook_reaches_each_square_once() {
        let pos = Position::start(&HOOK_VARIANT).unwrap();
        let moves = quiets_from(&pos, sq(2, 2));
        let mut targets: Vec<Square> = moves.iter().map(|m| m.to()).collect();
        let total = targets.len();
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), total);
        // 斜めに曲がる鉤は同じ色のマスにしか行けない
        assert!(targets.iter().all(|t| (t.file() + t.rank()) % 2 == 0));
        assert!(targets.contains(&sq(4, 4)));
        assert_eq!(pos.side_to_move(), Color::Black);
    }
}
