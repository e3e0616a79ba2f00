//! 大将棋（15×15）
//!
//! 中将棋の駒に桂馬・鉄将・石将・悪狼・猛牛・飛龍・嗔猪・猫刄を加えたもの。
//! 追加の小駒はすべて金将に成る。

use super::notation::*;
use super::{PieceDesc, PstKind, Variant, class, promo_rule};

const GUARD: u16 = class::GUARD;
const GOLD: [super::Range; 8] = [W, W, W, O, W, O, W, W];

static PIECES: [PieceDesc; 55] = [
    PieceDesc::new("K", "King", 1000, [W, W, W, W, W, W, W, W])
        .classes(class::ROYAL)
        .pst(PstKind::Royal),
    PieceDesc::new("+E", "Crown Prince", 1000, [W, W, W, W, W, W, W, W])
        .classes(class::ROYAL)
        .pst(PstKind::Royal),
    PieceDesc::new("N", "Lion", 2000, [L, L, L, L, L, L, L, L])
        .classes(class::LION)
        .bulk(4)
        .rank(6)
        .pst(PstKind::Lion),
    PieceDesc::new("+O", "Lion", 2000, [L, L, L, L, L, L, L, L])
        .classes(class::LION)
        .bulk(4)
        .rank(6)
        .pst(PstKind::Lion),
    PieceDesc::new("Q", "Free King", 1400, [X, X, X, X, X, X, X, X])
        .bulk(4)
        .rank(5)
        .pst(PstKind::Slider),
    PieceDesc::new("+X", "Free King", 1400, [X, X, X, X, X, X, X, X])
        .bulk(4)
        .rank(5)
        .pst(PstKind::Slider),
    PieceDesc::new("D", "Dragon King", 1300, [X, W, X, W, X, W, X, W])
        .promotes("+D")
        .bulk(3)
        .rank(4)
        .pst(PstKind::Slider),
    PieceDesc::new("+D", "Soaring Eagle", 1600, [X, D, X, X, X, X, X, D])
        .bulk(3)
        .rank(5)
        .pst(PstKind::Slider),
    PieceDesc::new("H", "Dragon Horse", 1100, [W, X, W, X, W, X, W, X])
        .promotes("+H")
        .bulk(3)
        .rank(4)
        .pst(PstKind::Slider),
    PieceDesc::new("+H", "Horned Falcon", 1500, [D, X, X, X, X, X, X, X])
        .bulk(3)
        .rank(5)
        .pst(PstKind::Slider),
    PieceDesc::new("R", "Rook", 1000, [X, O, X, O, X, O, X, O])
        .promotes("+R")
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("+R", "Dragon King", 1300, [X, W, X, W, X, W, X, W])
        .bulk(3)
        .rank(4)
        .pst(PstKind::Slider),
    PieceDesc::new("B", "Bishop", 800, [O, X, O, X, O, X, O, X])
        .promotes("+B")
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("+B", "Dragon Horse", 1100, [W, X, W, X, W, X, W, X])
        .bulk(3)
        .rank(4)
        .pst(PstKind::Slider),
    PieceDesc::new("V", "Vertical Mover", 600, [X, O, W, O, X, O, W, O])
        .promotes("+V")
        .bulk(3)
        .rank(2)
        .pst(PstKind::Slider),
    PieceDesc::new("+V", "Flying Ox", 1100, [X, X, O, X, X, X, O, X])
        .bulk(3)
        .rank(4)
        .pst(PstKind::Slider),
    PieceDesc::new("M", "Side Mover", 600, [W, O, X, O, W, O, X, O])
        .promotes("+M")
        .bulk(3)
        .rank(2)
        .pst(PstKind::Slider),
    PieceDesc::new("+M", "Free Boar", 1100, [O, X, X, X, O, X, X, X])
        .bulk(3)
        .rank(4)
        .pst(PstKind::Slider),
    PieceDesc::new("A", "Reverse Chariot", 300, [X, O, O, O, X, O, O, O])
        .promotes("+A")
        .bulk(3)
        .rank(1)
        .pst(PstKind::Slider),
    PieceDesc::new("+A", "Whale", 950, [X, O, O, X, X, X, O, O])
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("L", "Lance", 300, [X, O, O, O, O, O, O, O])
        .promotes("+L")
        .classes(class::IRREVERSIBLE)
        .rule(promo_rule::MUST_LAST)
        .bulk(3)
        .rank(1)
        .pst(PstKind::Slider),
    PieceDesc::new("+L", "White Horse", 1000, [X, X, O, O, X, O, O, X])
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("O'", "Violent Ox", 400, [T2, O, T2, O, T2, O, T2, O])
        .promotes("+O'")
        .rank(1),
    PieceDesc::new("+O'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("D'", "Flying Dragon", 400, [O, T2, O, T2, O, T2, O, T2])
        .promotes("+D'")
        .rank(1),
    PieceDesc::new("+D'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("O", "Kirin", 450, [J, W, J, W, J, W, J, W])
        .promotes("+O")
        .rank(2),
    PieceDesc::new("X", "Phoenix", 450, [W, J, W, J, W, J, W, J])
        .promotes("+X")
        .rank(2),
    PieceDesc::new("N'", "Knight", 250, [N, O, O, O, O, O, O, N])
        .promotes("+N'")
        .classes(class::IRREVERSIBLE)
        .rule(promo_rule::MUST_LAST_TWO),
    PieceDesc::new("+N'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("E", "Drunk Elephant", 550, [W, W, W, W, O, W, W, W])
        .promotes("+E")
        .classes(GUARD)
        .rank(2),
    PieceDesc::new("T", "Blind Tiger", 350, [O, W, W, W, W, W, W, W])
        .promotes("+T")
        .classes(GUARD)
        .rank(1),
    PieceDesc::new("+T", "Flying Stag", 900, [X, W, W, W, X, W, W, W])
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("F", "Ferocious Leopard", 350, [W, W, O, W, W, W, O, W])
        .promotes("+F")
        .classes(GUARD)
        .rank(1),
    PieceDesc::new("+F", "Bishop", 800, [O, X, O, X, O, X, O, X])
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("W", "Evil Wolf", 300, [W, W, W, O, O, O, W, W])
        .promotes("+W")
        .rank(1),
    PieceDesc::new("+W", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("A'", "Angry Boar", 300, [W, O, W, O, W, O, W, O])
        .promotes("+A'")
        .rank(1),
    PieceDesc::new("+A'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("C'", "Cat Sword", 250, [O, W, O, W, O, W, O, W])
        .promotes("+C'")
        .rank(1),
    PieceDesc::new("+C'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("G", "Gold General", 450, GOLD)
        .promotes("+G")
        .classes(GUARD)
        .rank(1),
    PieceDesc::new("+G", "Rook", 1000, [X, O, X, O, X, O, X, O])
        .bulk(3)
        .rank(3)
        .pst(PstKind::Slider),
    PieceDesc::new("S", "Silver General", 350, [W, W, O, W, O, W, O, W])
        .promotes("+S")
        .classes(GUARD)
        .rank(1),
    PieceDesc::new("+S", "Vertical Mover", 600, [X, O, W, O, X, O, W, O])
        .bulk(3)
        .rank(2)
        .pst(PstKind::Slider),
    PieceDesc::new("C", "Copper General", 300, [W, W, O, O, W, O, O, W])
        .promotes("+C")
        .classes(GUARD)
        .rank(1),
    PieceDesc::new("+C", "Side Mover", 600, [W, O, X, O, W, O, X, O])
        .bulk(3)
        .rank(2)
        .pst(PstKind::Slider),
    PieceDesc::new("I'", "Iron General", 250, [W, W, O, O, O, O, O, W])
        .promotes("+I'")
        .classes(class::IRREVERSIBLE)
        .rule(promo_rule::MUST_LAST),
    PieceDesc::new("+I'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("S'", "Stone General", 150, [O, W, O, O, O, O, O, W])
        .promotes("+S'")
        .classes(class::IRREVERSIBLE)
        .rule(promo_rule::MUST_LAST)
        .bulk(1),
    PieceDesc::new("+S'", "Gold General", 450, GOLD).classes(GUARD).rank(1),
    PieceDesc::new("I", "Go-Between", 100, [W, O, O, O, W, O, O, O])
        .promotes("+I")
        .classes(class::LOW)
        .bulk(1),
    PieceDesc::new("+I", "Drunk Elephant", 550, [W, W, W, W, O, W, W, W])
        .classes(GUARD)
        .rank(2),
    PieceDesc::new("P", "Pawn", 100, [W, O, O, O, O, O, O, O])
        .promotes("+P")
        .classes(class::LOW | class::PAWN | class::IRREVERSIBLE)
        .rule(promo_rule::MUST_LAST)
        .bulk(1)
        .pst(PstKind::Pawn),
    PieceDesc::new("+P", "Tokin", 450, GOLD).classes(GUARD).rank(1),
];

pub static DAI: Variant = Variant {
    name: "dai",
    files: 15,
    ranks: 15,
    zone_depth: 5,
    pieces: &PIECES,
    start: "ln's'i'csgkgsci's'n'l/a1c'1f1tet1f1c'1a/1o'1a'1wonxw1a'1o'1/rd'mvbhdqdhbvmd'r/ppppppppppppppp/4i5i4/15/15/15/4I5I4/PPPPPPPPPPPPPPP/RD'MVBHDQDHBVMD'R/1O'1A'1WXNOW1A'1O'1/A1C'1F1TET1F1C'1A/LN'S'I'CSGKGSCI'S'N'L b",
    lion_trading: false,
};
