//! 指し手・マスの表記
//!
//! - マス: 筋を `a`〜`p`、段を 1 始まりの数字で書く（`a1`〜`p16`、先手側が 1 段目）
//! - 指し手: 移動元と移動先を続けて書く（`e4e5`）。多段手は途中のマスを `,` で区切って挟む
//!   （`e5e6,e7`、居食いは `e5e6,e5`）
//! - 末尾の `+` は成り、`=` は明示的な不成。パスは `@@@@`

use crate::error::NotationError;
use crate::types::{MAX_FILES, MAX_RANKS, Move, Square};

const NULL_MOVE: &str = "@@@@";

pub fn format_square(sq: Square) -> String {
    format!("{}{}", (b'a' + sq.file()) as char, sq.rank() + 1)
}

pub fn parse_square(text: &str) -> Result<Square, NotationError> {
    match read_square(text.as_bytes()) {
        Some((sq, used)) if used == text.len() => Ok(sq),
        _ => Err(NotationError::Square(text.to_string())),
    }
}

/// 先頭のマスを読み、読んだバイト数と一緒に返す
fn read_square(bytes: &[u8]) -> Option<(Square, usize)> {
    let (&letter, rest) = bytes.split_first()?;
    if !letter.is_ascii_lowercase() || letter - b'a' >= MAX_FILES {
        return None;
    }
    let digits = rest.iter().take(2).take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rank: u8 = std::str::from_utf8(&rest[..digits]).ok()?.parse().ok()?;
    if rank == 0 || rank > MAX_RANKS {
        return None;
    }
    Some((Square::new(letter - b'a', rank - 1), 1 + digits))
}

pub fn format_move(mv: Move) -> String {
    if mv.is_null() {
        return NULL_MOVE.to_string();
    }
    let mut text = format_square(mv.from());
    for leg in mv.legs() {
        text.push_str(&format_square(leg));
        text.push(',');
    }
    text.push_str(&format_square(mv.to()));
    if mv.is_promotion() {
        text.push('+');
    }
    text
}

/// 表記から読み取った指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    /// 経路だけの手（成り・不成のフラグなし）
    pub path: Move,
    pub promote: bool,
}

/// 指し手の表記を読む（合法かどうかは見ない）
pub fn read_move(text: &str) -> Result<MoveText, NotationError> {
    let text = text.trim();
    let bad = || NotationError::Move(text.to_string());
    if text == NULL_MOVE {
        return Ok(MoveText {
            path: Move::NULL,
            promote: false,
        });
    }

    let (body, promote) = match text.as_bytes().last() {
        Some(b'+') => (&text[..text.len() - 1], true),
        Some(b'=') => (&text[..text.len() - 1], false),
        _ => (text, false),
    };

    let mut squares: Vec<Square> = Vec::with_capacity(4);
    let mut bytes = body.as_bytes();
    while !bytes.is_empty() {
        if bytes[0] == b',' && !squares.is_empty() {
            bytes = &bytes[1..];
            continue;
        }
        let (sq, used) = read_square(bytes).ok_or_else(bad)?;
        squares.push(sq);
        bytes = &bytes[used..];
    }

    let path = match squares.as_slice() {
        [from, to] => Move::normal(*from, *to),
        [from, leg, to] => Move::with_leg(*from, *leg, *to),
        [from, first, second, to] => Move::with_legs(*from, *first, *second, *to),
        _ => return Err(bad()),
    };
    Ok(MoveText { path, promote })
}

/// `legal` の中から表記に一致する手を探す
///
/// 成りを書かなければ成らない手（敵陣に入るときは不成を宣言した手）に一致する。
pub fn find_move(text: &MoveText, legal: &[Move]) -> Option<Move> {
    if text.path.is_null() {
        return legal.iter().copied().find(|m| m.is_null());
    }
    legal
        .iter()
        .copied()
        .find(|m| !m.is_null() && m.same_path(text.path) && m.is_promotion() == text.promote)
}

/// 表記を読み、`legal` の中の一致する手を返す
pub fn parse_move(text: &str, legal: &[Move]) -> Option<Move> {
    find_move(&read_move(text).ok()?, legal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank)
    }

    #[test]
    fn test_square_text() {
        assert_eq!(format_square(sq(4, 3)), "e4");
        assert_eq!(format_square(sq(11, 11)), "l12");
        assert_eq!(parse_square("p16"), Ok(sq(15, 15)));
        assert!(parse_square("q1").is_err());
        assert!(parse_square("a0").is_err());
        assert!(parse_square("a17").is_err());
        assert!(parse_square("a1x").is_err());
    }

    #[test]
    fn test_move_text() {
        assert_eq!(format_move(Move::normal(sq(4, 3), sq(4, 4))), "e4e5");
        assert_eq!(format_move(Move::with_leg(sq(4, 4), sq(4, 5), sq(4, 6))), "e5e6,e7");
        assert_eq!(format_move(Move::with_leg(sq(4, 4), sq(4, 5), sq(4, 4))), "e5e6,e5");
        assert_eq!(
            format_move(Move::with_legs(sq(0, 0), sq(0, 1), sq(0, 2), sq(0, 3)).promoting()),
            "a1a2,a3,a4+"
        );
        assert_eq!(format_move(Move::NULL), "@@@@");
    }

    #[test]
    fn test_read_multi_leg_and_two_digit_ranks() {
        let read = read_move("e10e11,e12").unwrap();
        assert_eq!(read.path, Move::with_leg(sq(4, 9), sq(4, 10), sq(4, 11)));
        assert!(!read.promote);
        let read = read_move("a1a2,a3,a4+").unwrap();
        assert_eq!(read.path, Move::with_legs(sq(0, 0), sq(0, 1), sq(0, 2), sq(0, 3)));
        assert!(read.promote);
        assert!(read_move("e4").is_err());
        assert!(read_move("e4e5e6e7e8").is_err());
        assert!(read_move(",e4e5").is_err());
    }

    #[test]
    fn test_find_prefers_written_promotion() {
        let plain = Move::normal(sq(4, 7), sq(4, 8));
        let legal = [plain.promoting(), plain.deferring()];
        assert_eq!(parse_move("e8e9", &legal), Some(plain.deferring()));
        assert_eq!(parse_move("e8e9=", &legal), Some(plain.deferring()));
        assert_eq!(parse_move("e8e9+", &legal), Some(plain.promoting()));
        assert_eq!(parse_move("e8e10", &legal), None);
        assert_eq!(parse_move("@@@@", &legal), None);
        assert_eq!(parse_move("@@@@", &[Move::NULL]), Some(Move::NULL));
    }
}
