//! 指し手（Move）
//!
//! 通常の 1 手は `from`/`to` の組で表す。獅子の居食い・二回行動や、直線の二歩・三歩移動は
//! 途中で駒を取るマスを `legs` に最大 2 つ持つ多段手として表す。居食いは `to == from`。

use super::Square;

/// 指し手フラグ
mod flag {
    /// 成る
    pub const PROMOTE: u8 = 1 << 0;
    /// 成れる移動で成らずに敵陣へ入った（次の非取り手での成りを抑止する）
    pub const DEFER: u8 = 1 << 1;
    /// パス（獅子の一回休みに相当）
    pub const NULL: u8 = 1 << 2;
}

/// 指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    legs: [Square; 2],
    flags: u8,
}

impl Move {
    /// パス
    pub const NULL: Move = Move {
        from: Square::NONE,
        to: Square::NONE,
        legs: [Square::NONE; 2],
        flags: flag::NULL,
    };

    /// 通常の 1 段階の手
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            legs: [Square::NONE; 2],
            flags: 0,
        }
    }

    /// 途中で `via` の駒を取ってから `to` に至る手
    #[inline]
    pub const fn with_leg(from: Square, via: Square, to: Square) -> Move {
        Move {
            from,
            to,
            legs: [via, Square::NONE],
            flags: 0,
        }
    }

    /// 途中で 2 マスの駒を順に取ってから `to` に至る手
    #[inline]
    pub const fn with_legs(from: Square, first: Square, second: Square, to: Square) -> Move {
        Move {
            from,
            to,
            legs: [first, second],
            flags: 0,
        }
    }

    /// 成りフラグを付けた手
    #[inline]
    pub const fn promoting(self) -> Move {
        Move {
            flags: self.flags | flag::PROMOTE,
            ..self
        }
    }

    /// 敵陣への不成フラグを付けた手
    #[inline]
    pub const fn deferring(self) -> Move {
        Move {
            flags: self.flags | flag::DEFER,
            ..self
        }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// 途中で駒を取るマス（手順順）
    #[inline]
    pub fn legs(self) -> impl Iterator<Item = Square> {
        self.legs.into_iter().filter(|sq| !sq.is_none())
    }

    #[inline]
    pub const fn is_multi_leg(self) -> bool {
        !self.legs[0].is_none()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flags & flag::PROMOTE != 0
    }

    #[inline]
    pub const fn is_deferral(self) -> bool {
        self.flags & flag::DEFER != 0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.flags & flag::NULL != 0
    }

    /// 居食い（取ってから元のマスに戻る）
    #[inline]
    pub const fn is_igui(self) -> bool {
        self.is_multi_leg() && self.from.index() == self.to.index()
    }

    /// 成り・不成フラグを除いた盤上の経路が同じか
    #[inline]
    pub fn same_path(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to && self.legs == other.legs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_flags() {
        let a = Square::new(4, 4);
        let b = Square::new(4, 5);
        let mv = Move::normal(a, b);
        assert!(!mv.is_promotion());
        assert!(mv.promoting().is_promotion());
        assert!(mv.deferring().is_deferral());
        assert!(mv.same_path(mv.promoting()));
        assert!(Move::NULL.is_null());
    }

    #[test]
    fn test_legs_in_path_order() {
        let (a, b, c, d) = (Square::new(3, 0), Square::new(3, 1), Square::new(3, 2), Square::new(3, 3));
        assert_eq!(Move::with_legs(a, b, c, d).legs().collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(Move::normal(a, d).legs().count(), 0);
        assert!(Move::with_legs(a, b, c, d).is_multi_leg());
    }

    #[test]
    fn test_igui_detection() {
        let a = Square::new(4, 4);
        let b = Square::new(5, 5);
        let mv = Move::with_leg(a, b, a);
        assert!(mv.is_igui());
        assert_eq!(mv.legs().next(), Some(b));
        assert_eq!(mv.legs().count(), 1);
        assert!(!Move::with_leg(a, b, Square::new(6, 6)).is_igui());
    }
}
