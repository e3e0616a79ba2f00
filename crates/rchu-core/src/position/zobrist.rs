//! 局面ハッシュ用の乱数テーブル
//!
//! ハッシュは 32bit の 2 系統を持ち、駒の寄与は「駒種×手番のキー」と「マスのキー」の積を
//! XOR で畳み込んだもの。手番はハッシュに含めず、千日手判定では同じ手番の局面同士だけを比べる。

use std::sync::LazyLock;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::{BOARD_SIZE, Color, Square};

/// 駒テーブルに載せられる駒種の上限
pub const MAX_KINDS: usize = 128;

pub struct Zobrist {
    square: [[u32; BOARD_SIZE]; 2],
    piece: [[[u32; 2]; Color::NUM]; MAX_KINDS],
}

impl Zobrist {
    fn new() -> Self {
        // 再現性のため固定シード
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x4348_5553_484F_4749);

        let mut table = Zobrist {
            square: [[0; BOARD_SIZE]; 2],
            piece: [[[0; 2]; Color::NUM]; MAX_KINDS],
        };
        for half in 0..2 {
            for sq in 0..BOARD_SIZE {
                // 奇数にしておけば積が 0 に潰れない
                table.square[half][sq] = rng.random::<u32>() | 1;
            }
        }
        for kind in 0..MAX_KINDS {
            for color in 0..Color::NUM {
                for half in 0..2 {
                    table.piece[kind][color][half] = rng.random::<u32>() | 1;
                }
            }
        }
        table
    }

    /// 駒種・手番のキー
    #[inline]
    pub fn piece_keys(&self, kind: usize, color: Color) -> [u32; 2] {
        self.piece[kind][color.index()]
    }

    /// 駒がマスにあるときのハッシュへの寄与
    #[inline]
    pub fn contribution(&self, keys: [u32; 2], sq: Square) -> [u32; 2] {
        [
            keys[0].wrapping_mul(self.square[0][sq.index()]),
            keys[1].wrapping_mul(self.square[1][sq.index()]),
        ]
    }
}

pub static ZOBRIST: LazyLock<Box<Zobrist>> = LazyLock::new(|| Box::new(Zobrist::new()));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_reproducible() {
        let a = Zobrist::new();
        assert_eq!(a.piece_keys(3, Color::White), ZOBRIST.piece_keys(3, Color::White));
    }

    #[test]
    fn test_contribution_depends_on_square_and_color() {
        let keys_b = ZOBRIST.piece_keys(5, Color::Black);
        let keys_w = ZOBRIST.piece_keys(5, Color::White);
        let a = Square::new(2, 3);
        let b = Square::new(3, 3);
        assert_ne!(ZOBRIST.contribution(keys_b, a), ZOBRIST.contribution(keys_b, b));
        assert_ne!(ZOBRIST.contribution(keys_b, a), ZOBRIST.contribution(keys_w, a));
    }
}
