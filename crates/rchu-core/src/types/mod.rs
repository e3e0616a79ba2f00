//! 基本型

mod color;
mod moves;
mod square;
mod value;

pub use color::Color;
pub use moves::Move;
pub use square::{
    BOARD_SIZE, Direction, GUARD_RANKS, MAX_FILES, MAX_RANKS, Offset, RAYS, STRIDE, Square,
};
pub use value::Value;

/// 最大探索深さ（手数）
pub const MAX_PLY: usize = 64;
