//! マス（Square）と方向（Direction / Offset）
//!
//! 盤は 1 段あたり `STRIDE` (=32) 要素の配列で表す。左半分の 16 要素が実際の筋、
//! 右半分は番兵（EDGE）として使う。さらに上下に `GUARD_RANKS` 段の番兵を置くので、
//! 盤上のマスから 3 マス以内の移動は配列外に出ない。走り駒は番兵に当たった時点で止まる。

use super::Color;

/// 1 段あたりの配列幅（実マス 16 + 番兵 16）
pub const STRIDE: i16 = 32;
/// 上下の番兵段数
pub const GUARD_RANKS: i16 = 4;
/// 最大の筋数
pub const MAX_FILES: u8 = 16;
/// 最大の段数
pub const MAX_RANKS: u8 = 16;
/// 盤配列の大きさ
pub const BOARD_SIZE: usize = ((MAX_RANKS as i16 + 2 * GUARD_RANKS) * STRIDE) as usize;

/// 盤上のマス（盤配列へのインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Square(u16);

impl Square {
    /// 「マスなし」を表す値（配列の先頭は常に番兵なので衝突しない）
    pub const NONE: Square = Square(0);

    /// 筋・段（0 始まり）から生成
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        Square(((rank as i16 + GUARD_RANKS) * STRIDE + file as i16) as u16)
    }

    /// 配列インデックスから生成
    #[inline]
    pub const fn from_index(index: usize) -> Square {
        Square(index as u16)
    }

    /// 配列インデックス
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 筋（0 始まり）
    #[inline]
    pub const fn file(self) -> u8 {
        (self.0 as i16 % STRIDE) as u8
    }

    /// 段（0 始まり）
    #[inline]
    pub const fn rank(self) -> u8 {
        (self.0 as i16 / STRIDE - GUARD_RANKS) as u8
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 手番側から見た段（先手は下から、後手は上から数える）
    #[inline]
    pub const fn relative_rank(self, color: Color, ranks: u8) -> u8 {
        match color {
            Color::Black => self.rank(),
            Color::White => ranks - 1 - self.rank(),
        }
    }

    /// チェビシェフ距離
    #[inline]
    pub fn distance(self, other: Square) -> u8 {
        let df = (self.file() as i16 - other.file() as i16).unsigned_abs();
        let dr = (self.rank() as i16 - other.rank() as i16).unsigned_abs();
        df.max(dr) as u8
    }

    /// 2 マスが縦横斜めに隣接しているか（同一マスは含まない）
    #[inline]
    pub fn is_adjacent(self, other: Square) -> bool {
        self != other && self.distance(other) == 1
    }

    /// 指定方向に `n` 歩進んだマス
    #[inline]
    pub const fn step(self, offset: Offset, n: i16) -> Square {
        Square((self.0 as i16 + offset.0 * n) as u16)
    }
}

impl std::ops::Add<Offset> for Square {
    type Output = Square;

    #[inline]
    fn add(self, rhs: Offset) -> Square {
        Square((self.0 as i16 + rhs.0) as u16)
    }
}

impl std::ops::Sub<Offset> for Square {
    type Output = Square;

    #[inline]
    fn sub(self, rhs: Offset) -> Square {
        Square((self.0 as i16 - rhs.0) as u16)
    }
}

/// 盤配列上の変位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Offset(i16);

impl Offset {
    /// 筋・段の変位から生成
    #[inline]
    pub const fn new(df: i16, dr: i16) -> Offset {
        Offset(dr * STRIDE + df)
    }

    #[inline]
    pub const fn raw(self) -> i16 {
        self.0
    }
}

impl std::ops::Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        Offset(-self.0)
    }
}

/// 8 方向（先手から見て前方を N とし時計回り）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

/// 方向の数
pub const RAYS: usize = 8;

const DIR_OFFSETS: [Offset; RAYS] = [
    Offset::new(0, 1),
    Offset::new(1, 1),
    Offset::new(1, 0),
    Offset::new(1, -1),
    Offset::new(0, -1),
    Offset::new(-1, -1),
    Offset::new(-1, 0),
    Offset::new(-1, 1),
];

/// 桂跳びの変位（方向 d の時計回り隣との間に位置する跳び先）
const KNIGHT_OFFSETS: [Offset; RAYS] = [
    Offset::new(1, 2),
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(-1, 2),
];

impl Direction {
    pub const ALL: [Direction; RAYS] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(i: usize) -> Direction {
        Direction::ALL[i % RAYS]
    }

    /// 1 歩分の変位
    #[inline]
    pub const fn offset(self) -> Offset {
        DIR_OFFSETS[self as usize]
    }

    /// この方向に対応する桂跳びの変位
    #[inline]
    pub const fn knight_offset(self) -> Offset {
        KNIGHT_OFFSETS[self as usize]
    }

    /// 逆方向
    #[inline]
    pub const fn reverse(self) -> Direction {
        Direction::from_index(self as usize + 4)
    }

    /// 時計回りに 90 度回した方向
    #[inline]
    pub const fn turn_right(self) -> Direction {
        Direction::from_index(self as usize + 2)
    }

    /// 反時計回りに 90 度回した方向
    #[inline]
    pub const fn turn_left(self) -> Direction {
        Direction::from_index(self as usize + 6)
    }

    /// 駒から見た相対方向を盤上の方向に変換する（後手は 180 度回転）
    #[inline]
    pub const fn for_color(self, color: Color) -> Direction {
        match color {
            Color::Black => self,
            Color::White => self.reverse(),
        }
    }

    /// `from` から `to` への方向（同一直線上にない場合は None）
    pub fn between(from: Square, to: Square) -> Option<(Direction, u8)> {
        let df = to.file() as i16 - from.file() as i16;
        let dr = to.rank() as i16 - from.rank() as i16;
        if (df == 0 && dr == 0) || (df != 0 && dr != 0 && df.abs() != dr.abs()) {
            return None;
        }
        let dist = df.abs().max(dr.abs());
        let unit = Offset::new(df.signum(), dr.signum());
        let dir = Direction::ALL.into_iter().find(|d| d.offset() == unit)?;
        Some((dir, dist as u8))
    }
}
