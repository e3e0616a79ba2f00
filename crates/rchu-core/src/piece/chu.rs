//! 中将棋（12×12）

use super::notation::*;
use super::{PieceDesc, PstKind, Variant, class, promo_rule};

const GUARD: u16 = class::GUARD;

static PIECES: [PieceDesc; 39] = [
    // 王
    PieceDesc::new("K", "King", 1000, [W, W, W, W, W, W, W, W])
        .classes(class::ROYAL)
        .pst(PstKind::Royal),
    PieceDesc::new("+E", "Crown Prince", 1000, [W, W, W, W, W, W, W, W])
        .classes(class::ROYAL)
        .pst(PstKind::Royal),
    // 獅子と奔王
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
    // 大駒
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
    // 跳び駒
    PieceDesc::new("O", "Kirin", 450, [J, W, J, W, J, W, J, W])
        .promotes("+O")
        .rank(2),
    PieceDesc::new("X", "Phoenix", 450, [W, J, W, J, W, J, W, J])
        .promotes("+X")
        .rank(2),
    // 小駒
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
    PieceDesc::new("G", "Gold General", 450, [W, W, W, O, W, O, W, W])
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
    PieceDesc::new("+P", "Tokin", 500, [W, W, W, O, W, O, W, W])
        .classes(GUARD)
        .rank(1),
];

pub static CHU: Variant = Variant {
    name: "chu",
    files: 12,
    ranks: 12,
    zone_depth: 4,
    pieces: &PIECES,
    start: "lfcsgkegscfl/a1b1toxt1b1a/mvrhdnqdhrvm/pppppppppppp/3i4i3/12/12/3I4I3/PPPPPPPPPPPP/MVRHDQNDHRVM/A1B1TXOT1B1A/LFCSGEKGSCFL b",
    lion_trading: true,
};
