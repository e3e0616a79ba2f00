//! 評価値（Value）
//!
//! 中将棋系は駒数が多く駒価値の合計が大きいため、詰みスコアは十分離れた
//! `Value::MATE` 付近に予約している。通常の評価値は [-MATE_IN_MAX_PLY, MATE_IN_MAX_PLY] の範囲。

use serde::{Deserialize, Serialize};

/// 評価値
///
/// 通常の局面評価と、玉取り（`mate_in` / `mated_in` 系）を同一の整数スケールで扱う。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    /// ゼロ
    pub const ZERO: Value = Value(0);
    /// 引き分け
    pub const DRAW: Value = Value(0);
    /// 玉を取った側の最大スコア
    pub const MATE: Value = Value(250_000);
    /// 無限大
    pub const INFINITE: Value = Value(250_001);

    /// 最大探索深度内での勝ちスコア
    pub const MATE_IN_MAX_PLY: Value = Value(Self::MATE.0 - 1_000);
    /// 最大探索深度内での負けスコア
    pub const MATED_IN_MAX_PLY: Value = Value(-Self::MATE_IN_MAX_PLY.0);

    /// 値から生成
    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    /// ply手で玉を取るスコア
    #[inline]
    pub const fn mate_in(ply: i32) -> Value {
        Value(Self::MATE.0 - ply)
    }

    /// ply手で玉を取られるスコア
    #[inline]
    pub const fn mated_in(ply: i32) -> Value {
        Value(-Self::MATE.0 + ply)
    }

    /// 勝ちスコアかどうか
    #[inline]
    pub const fn is_win(self) -> bool {
        self.0 >= Self::MATE_IN_MAX_PLY.0
    }

    /// 負けスコアかどうか
    #[inline]
    pub const fn is_loss(self) -> bool {
        self.0 <= Self::MATED_IN_MAX_PLY.0
    }

    /// 詰みスコア（勝ちまたは負け）かどうか
    #[inline]
    pub const fn is_mate_score(self) -> bool {
        self.is_win() || self.is_loss()
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// 1 手番分だけ手番側寄りにずらした値（遅延損失ボーナス用）
    #[inline]
    pub const fn nudge(self, up: bool) -> Value {
        if up { Value(self.0 + 1) } else { Value(self.0 - 1) }
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Value {
    #[inline]
    fn add_assign(&mut self, rhs: Value) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Value {
    #[inline]
    fn sub_assign(&mut self, rhs: Value) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value(v)
    }
}

impl From<Value> for i32 {
    fn from(v: Value) -> i32 {
        v.0
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
