//! 駒カタログ
//!
//! 変則ごとの駒定義テーブル。各駒は 8 方向（駒から見た前方を N とし時計回り）の
//! 利きの種類 [`Range`] と、成り先・分類フラグを持つ。テーブルは一度だけ参照され、
//! 局面側では駒リストのエントリに必要な値をコピーして使う。

mod chu;
mod dai;

use crate::types::{Direction, RAYS};

/// 1 方向の利きの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    /// 利きなし
    None,
    /// n マスまでの走り（1 なら 1 歩）
    Slide(u8),
    /// 盤端までの走り
    Unlimited,
    /// 桂跳び（この方向に対応する跳び先へ）
    Knight,
    /// 2 マス先への跳び
    Jump,
    /// 直線上の獅子の動き（1 歩・2 マス跳び・居食い・2 枚取り）
    DoubleStep,
    /// 直線上を 3 歩まで進む（途中の敵駒は順に取る、味方駒で止まる）
    TripleStep,
    /// 獅子の動き（全方向の 2 回行動）
    Lion,
    /// 走った後に 90 度曲がってもう一度走る
    Hook,
    /// 1 歩先の駒を取るときだけ動ける
    CaptureOnly,
}

impl Range {
    /// 直線上で `dist` マス先に届くか（間のマスの状態は別途確認する）
    #[inline]
    pub const fn reach(self) -> u8 {
        match self {
            Range::None => 0,
            Range::Slide(n) => n,
            Range::Unlimited | Range::Hook => u8::MAX,
            Range::Knight => 0,
            Range::Jump | Range::DoubleStep => 2,
            Range::TripleStep => 3,
            Range::Lion => 2,
            Range::CaptureOnly => 1,
        }
    }

    /// 途中の駒を跳び越えられるか（三歩は敵駒を取りながら進むだけで跳び越えない）
    #[inline]
    pub const fn jumps(self) -> bool {
        matches!(self, Range::Jump | Range::DoubleStep | Range::Lion)
    }
}

/// 駒の分類フラグ
pub mod class {
    /// 王（全て取られると負け）
    pub const ROYAL: u16 = 1 << 0;
    /// 獅子（獅子の取り合いルールの対象）
    pub const LION: u16 = 1 << 1;
    /// 火鬼（周囲を焼く）
    pub const FIRE_DEMON: u16 = 1 << 2;
    /// 後ろに戻れない駒（動かすと千日手判定用カウンタをリセット）
    pub const IRREVERSIBLE: u16 = 1 << 3;
    /// 玉の囲いに数える金将格の駒
    pub const GUARD: u16 = 1 << 4;
    /// 取った駒をその駒種に成らせる
    pub const CONTAGIOUS: u16 = 1 << 5;
    /// 歩・仲人などの低価値駒（獅子の取り合いでの「橋」にならない）
    pub const LOW: u16 = 1 << 6;
    /// 歩型の駒（歩の形の評価項目に使う）
    pub const PAWN: u16 = 1 << 7;
}

/// 成りに関する制約フラグ
pub mod promo_rule {
    /// 最奥段では不成にできない
    pub const MUST_LAST: u8 = 1 << 0;
    /// 奥 2 段では不成にできない
    pub const MUST_LAST_TWO: u8 = 1 << 1;
}

/// 駒の位置評価テーブルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PstKind {
    Normal = 0,
    Royal = 1,
    Lion = 2,
    Pawn = 3,
    Slider = 4,
}

impl PstKind {
    pub const NUM: usize = 5;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 駒定義
#[derive(Debug, Clone, Copy)]
pub struct PieceDesc {
    /// 表記（成駒は `+` 付き、拡張文字は `'` や `!` 付き）
    pub code: &'static str,
    pub name: &'static str,
    pub value: i32,
    pub ranges: [Range; RAYS],
    /// 成り先の表記
    pub promo: Option<&'static str>,
    /// 盤の「混み具合」への寄与
    pub bulk: i32,
    pub class: u16,
    /// 感染成りでの優先度（高い駒ほど強い）
    pub rank: u8,
    pub promo_rule: u8,
    pub pst: PstKind,
}

impl PieceDesc {
    /// 駒から見た方向の利き
    #[inline]
    pub const fn range(&self, dir: Direction) -> Range {
        self.ranges[dir.index()]
    }

    #[inline]
    pub const fn has(&self, flag: u16) -> bool {
        self.class & flag != 0
    }

    /// いずれかの方向に獅子の動きを持つか
    pub fn has_lion_power(&self) -> bool {
        self.ranges.iter().any(|r| matches!(r, Range::Lion))
    }
}

/// 変則の定義
#[derive(Debug)]
pub struct Variant {
    pub name: &'static str,
    pub files: u8,
    pub ranks: u8,
    /// 敵陣の深さ
    pub zone_depth: u8,
    pub pieces: &'static [PieceDesc],
    /// 初期配置（配置表記）
    pub start: &'static str,
    /// 中将棋の獅子の取り合いルールを適用するか
    pub lion_trading: bool,
}

impl Variant {
    /// 名前から組み込みの変則を引く
    pub fn by_name(name: &str) -> Option<&'static Variant> {
        BUILTIN.iter().copied().find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// 組み込みの変則の一覧
    pub fn builtin() -> &'static [&'static Variant] {
        BUILTIN
    }

    /// 表記から駒定義のインデックスを引く
    pub fn find(&self, code: &str) -> Option<usize> {
        self.pieces.iter().position(|p| p.code == code)
    }

    #[inline]
    pub fn desc(&self, index: usize) -> &'static PieceDesc {
        &self.pieces[index]
    }
}

static BUILTIN: &[&Variant] = &[&chu::CHU, &dai::DAI];

pub use chu::CHU;
pub use dai::DAI;

impl PieceDesc {
    /// テーブル記述用の基本コンストラクタ
    pub const fn new(
        code: &'static str,
        name: &'static str,
        value: i32,
        ranges: [Range; RAYS],
    ) -> PieceDesc {
        PieceDesc {
            code,
            name,
            value,
            ranges,
            promo: None,
            bulk: 2,
            class: 0,
            rank: 0,
            promo_rule: 0,
            pst: PstKind::Normal,
        }
    }

    pub const fn promotes(self, code: &'static str) -> PieceDesc {
        PieceDesc {
            promo: Some(code),
            ..self
        }
    }

    pub const fn classes(self, class: u16) -> PieceDesc {
        PieceDesc {
            class: self.class | class,
            ..self
        }
    }

    pub const fn bulk(self, bulk: i32) -> PieceDesc {
        PieceDesc { bulk, ..self }
    }

    pub const fn rank(self, rank: u8) -> PieceDesc {
        PieceDesc { rank, ..self }
    }

    pub const fn rule(self, promo_rule: u8) -> PieceDesc {
        PieceDesc { promo_rule, ..self }
    }

    pub const fn pst(self, pst: PstKind) -> PieceDesc {
        PieceDesc { pst, ..self }
    }
}

/// テーブル記述用の略記
pub mod notation {
    use super::Range;

    pub const O: Range = Range::None;
    pub const W: Range = Range::Slide(1);
    pub const T2: Range = Range::Slide(2);
    pub const X: Range = Range::Unlimited;
    pub const N: Range = Range::Knight;
    pub const J: Range = Range::Jump;
    pub const D: Range = Range::DoubleStep;
    pub const L: Range = Range::Lion;
    pub const T3: Range = Range::TripleStep;
    pub const H: Range = Range::Hook;
    pub const C: Range = Range::CaptureOnly;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_targets_resolve() {
        for variant in Variant::builtin() {
            for desc in variant.pieces {
                if let Some(target) = desc.promo {
                    let idx = variant.find(target);
                    assert!(idx.is_some(), "{}: promotion target {target} missing", variant.name);
                    let promoted = variant.desc(idx.unwrap());
                    assert!(promoted.promo.is_none(), "{target} must not promote again");
                }
            }
        }
    }

    #[test]
    fn test_codes_are_unique() {
        for variant in Variant::builtin() {
            for (i, a) in variant.pieces.iter().enumerate() {
                for b in &variant.pieces[i + 1..] {
                    assert_ne!(a.code, b.code, "{}: duplicate code", variant.name);
                }
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Variant::by_name("Chu").map(|v| v.files), Some(12));
        assert_eq!(Variant::by_name("dai").map(|v| v.files), Some(15));
        assert!(Variant::by_name("tenjiku").is_none());
    }
}
