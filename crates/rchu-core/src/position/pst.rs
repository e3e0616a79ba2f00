//! 駒の位置評価テーブル
//!
//! 差分評価（`Position::eval_delta`）に含める駒の位置点。盤の大きさだけから作る。

use crate::piece::PstKind;
use crate::types::{BOARD_SIZE, Color, Square};

#[derive(Debug, Clone)]
pub struct PstTables {
    table: Vec<i16>,
}

#[inline]
fn slot(kind: PstKind, color: Color, sq: Square) -> usize {
    (kind.index() * Color::NUM + color.index()) * BOARD_SIZE + sq.index()
}

impl PstTables {
    pub fn new(files: u8, ranks: u8) -> Self {
        let mut table = vec![0i16; PstKind::NUM * Color::NUM * BOARD_SIZE];
        let kinds = [
            PstKind::Normal,
            PstKind::Royal,
            PstKind::Lion,
            PstKind::Pawn,
            PstKind::Slider,
        ];
        for rank in 0..ranks {
            for file in 0..files {
                let sq = Square::new(file, rank);
                // 盤端からの距離
                let cf = file.min(files - 1 - file) as i16;
                let cr = rank.min(ranks - 1 - rank) as i16;
                for color in Color::ALL {
                    let rr = sq.relative_rank(color, ranks) as i16;
                    for kind in kinds {
                        let v = match kind {
                            PstKind::Normal => 2 * (cf.min(3) + rr.min(4)),
                            PstKind::Royal => -4 * rr + 2 * cf.min(2),
                            PstKind::Lion => 6 * (cf.min(4) + cr.min(4)),
                            PstKind::Pawn => 5 * rr,
                            PstKind::Slider => 2 * cf.min(2),
                        };
                        table[slot(kind, color, sq)] = v;
                    }
                }
            }
        }
        PstTables { table }
    }

    #[inline]
    pub fn get(&self, kind: PstKind, color: Color, sq: Square) -> i32 {
        self.table[slot(kind, color, sq)] as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_mirrored_between_colors() {
        let pst = PstTables::new(12, 12);
        let a = Square::new(3, 2);
        let b = Square::new(3, 9);
        assert_eq!(pst.get(PstKind::Pawn, Color::Black, a), pst.get(PstKind::Pawn, Color::White, b));
        assert!(pst.get(PstKind::Lion, Color::Black, Square::new(5, 5)) > pst.get(PstKind::Lion, Color::Black, Square::new(0, 0)));
    }
}
