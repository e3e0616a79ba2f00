use rchu_core::attack::AttackMap;
use rchu_core::movegen::{captures_on, generate_all, legal_moves};
use rchu_core::notation::format_move;
use rchu_core::piece::notation::*;
use rchu_core::piece::{PieceDesc, Variant, class};
use rchu_core::{CHU, Color, DAI, Move, Position, Square};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank)
}

fn captures_on_square(pos: &Position, target: Square) -> Vec<Move> {
    let attacks = AttackMap::from_position(pos);
    let mut out = Vec::new();
    captures_on(pos, &attacks, target, &mut out);
    out
}

fn texts(moves: &[Move]) -> Vec<String> {
    let mut texts: Vec<String> = moves.iter().map(|&m| format_move(m)).collect();
    texts.sort();
    texts
}

/// f4 の獅子、f5 の中間駒、f6 の金
fn lion_line(between: &str) -> Position {
    let notation = format!("k11/12/12/12/12/12/5g6/5{between}6/5N6/12/12/K11 b");
    Position::setup(&CHU, &notation).unwrap()
}

#[test]
fn test_lion_double_capture_under_more_valuable_victim() {
    let double = Move::with_leg(sq(5, 3), sq(5, 4), sq(5, 5));

    // 中間の歩は金より安いので、二枚取りは金のマスで生成される
    let pos = lion_line("p");
    assert!(captures_on_square(&pos, sq(5, 5)).contains(&double));
    assert!(!captures_on_square(&pos, sq(5, 4)).contains(&double));

    // 同値なら手順の早い方（一枚目）で生成される
    let pos = lion_line("g");
    assert!(!captures_on_square(&pos, sq(5, 5)).contains(&double));
    assert!(captures_on_square(&pos, sq(5, 4)).contains(&double));

    // 一枚目の方が高い
    let pos = lion_line("r");
    assert!(!captures_on_square(&pos, sq(5, 5)).contains(&double));
    assert!(captures_on_square(&pos, sq(5, 4)).contains(&double));
}

#[test]
fn test_full_generation_has_no_duplicates() {
    for between in ["p", "g", "r"] {
        let pos = lion_line(between);
        let attacks = AttackMap::from_position(&pos);
        let mut moves = Vec::new();
        generate_all(&pos, &attacks, &mut moves);
        let total = moves.len();
        moves.sort_by_key(|m| format!("{m:?}"));
        moves.dedup();
        assert_eq!(moves.len(), total, "duplicate moves with {between} in between");
    }
}

#[test]
fn test_pawn_push_is_irreversible() {
    let mut pos = Position::start(&CHU).unwrap();
    let eval = pos.eval_delta();
    let undo = pos.make_move(Move::normal(sq(4, 3), sq(4, 4)));
    assert_eq!(pos.rev_count(), 0);
    pos.unmake_move(&undo);
    assert_eq!(pos.eval_delta(), eval);

    let mut pos = Position::setup(&CHU, "k11/12/12/12/12/12/5G6/12/12/12/12/K11 b").unwrap();
    pos.make_move(Move::normal(sq(5, 5), sq(5, 6)));
    pos.make_move(Move::normal(sq(0, 11), sq(0, 10)));
    assert_eq!(pos.rev_count(), 2);
}

#[test]
fn test_setup_notation_round_trip() {
    for variant in [&CHU, &DAI] {
        let pos = Position::start(variant).unwrap();
        assert_eq!(pos.to_notation(), variant.start);
        assert_eq!(Position::setup(variant, &pos.to_notation()).unwrap(), pos);
    }
    let notation = "k11/12/12/12/12/12/5g6/5+D6/5N6/12/12/K11 w";
    assert_eq!(Position::setup(&CHU, notation).unwrap().to_notation(), notation);
}

#[test]
fn test_king_capture_wins_the_game() {
    let mut pos = Position::setup(&CHU, "1k10/12/12/12/12/12/12/12/12/12/1R10/K11 b").unwrap();
    let capture = legal_moves(&mut pos)
        .into_iter()
        .find(|m| m.to() == sq(1, 11))
        .unwrap();
    pos.make_move(capture);
    assert_eq!(pos.royal_count(Color::White), 0);
    assert!(legal_moves(&mut pos).is_empty());
}

// ============================================================================
// 火鬼と感染成り
// ============================================================================

static BURN_PIECES: [PieceDesc; 3] = [
    PieceDesc::new("K", "King", 1000, [W, W, W, W, W, W, W, W]).classes(class::ROYAL),
    PieceDesc::new("F", "Fire Demon", 3000, [W, W, W, W, W, W, W, W]).classes(class::FIRE_DEMON),
    PieceDesc::new("P", "Pawn", 100, [W, O, O, O, O, O, O, O]).classes(class::LOW),
];

static BURN_VARIANT: Variant = Variant {
    name: "burn-test",
    files: 7,
    ranks: 7,
    zone_depth: 2,
    pieces: &BURN_PIECES,
    start: "k6/7/2ppp2/7/3F3/7/K6 b",
    lion_trading: false,
};

#[test]
fn test_fire_demon_burns_neighbours() {
    let mut pos = Position::start(&BURN_VARIANT).unwrap();
    let before = pos.clone();
    let undo = pos.make_move(Move::normal(sq(3, 2), sq(3, 3)));
    for file in 2..=4 {
        assert_eq!(pos.piece_at(sq(file, 4)), None);
    }
    assert_eq!(undo.victims().count(), 3);
    assert!(pos.verify().is_ok());
    pos.unmake_move(&undo);
    assert_eq!(pos, before);
}

#[test]
fn test_fire_demon_next_to_enemy_demon_burns_itself() {
    let mut pos = Position::setup(&BURN_VARIANT, "k6/3f3/7/3F3/7/7/K6 b").unwrap();
    let before = pos.clone();
    assert_ne!(pos.burn_mask(Color::White, sq(3, 4)), 0);
    let undo = pos.make_move(Move::normal(sq(3, 3), sq(3, 4)));
    assert_eq!(pos.piece_at(sq(3, 4)), None);
    assert_eq!(pos.piece_at(sq(3, 3)), None);
    assert!(pos.piece_at(sq(3, 5)).is_some());
    assert!(pos.verify().is_ok());
    pos.unmake_move(&undo);
    assert_eq!(pos, before);
}

static CONTAGION_PIECES: [PieceDesc; 3] = [
    PieceDesc::new("K", "King", 1000, [W, W, W, W, W, W, W, W]).classes(class::ROYAL),
    PieceDesc::new("V", "Vice", 900, [W, W, W, W, W, W, W, W])
        .classes(class::CONTAGIOUS)
        .rank(5),
    PieceDesc::new("G", "Gold", 450, [W, W, W, O, W, O, W, W]).rank(1),
];

static CONTAGION_VARIANT: Variant = Variant {
    name: "contagion-test",
    files: 7,
    ranks: 7,
    zone_depth: 2,
    pieces: &CONTAGION_PIECES,
    start: "k6/7/7/3v3/3G3/7/K6 b",
    lion_trading: false,
};

#[test]
fn test_contagious_victim_converts_capturer() {
    let mut pos = Position::start(&CONTAGION_VARIANT).unwrap();
    let before = pos.clone();
    let undo = pos.make_move(Move::normal(sq(3, 2), sq(3, 3)));
    let id = pos.piece_at(sq(3, 3)).unwrap();
    assert_eq!(id.color(), Color::Black);
    assert_eq!(pos.desc(id).code, "V");
    assert!(pos.verify().is_ok());
    pos.unmake_move(&undo);
    assert_eq!(pos, before);
    assert_eq!(pos.desc(pos.piece_at(sq(3, 2)).unwrap()).code, "G");
}

#[test]
fn test_royal_is_not_converted() {
    let mut pos = Position::setup(&CONTAGION_VARIANT, "k6/7/7/3v3/3K3/7/7 b").unwrap();
    pos.make_move(Move::normal(sq(3, 2), sq(3, 3)));
    let id = pos.piece_at(sq(3, 3)).unwrap();
    assert_eq!(pos.desc(id).code, "K");
    assert_eq!(pos.royal_count(Color::Black), 1);
}

// ============================================================================
// 桂跳び・鉤・三歩・多マス走り
// ============================================================================

static STEP_PIECES: [PieceDesc; 6] = [
    PieceDesc::new("K", "King", 1000, [W, W, W, W, W, W, W, W]).classes(class::ROYAL),
    PieceDesc::new("P", "Pawn", 100, [W, O, O, O, O, O, O, O]).classes(class::LOW),
    PieceDesc::new("G", "Gold", 450, [W, W, W, O, W, O, W, W]),
    PieceDesc::new("N", "Knight", 250, [N, O, O, O, O, O, O, N]),
    PieceDesc::new("Q", "Hook Mover", 1000, [H, O, H, O, H, O, H, O]),
    PieceDesc::new("T", "Triple Stepper", 600, [T3, O, O, O, O, O, O, O]),
];

static STEP_VARIANT: Variant = Variant {
    name: "step-test",
    files: 7,
    ranks: 7,
    zone_depth: 2,
    pieces: &STEP_PIECES,
    start: "6k/7/7/7/7/7/6K b",
    lion_trading: false,
};

#[test]
fn test_knight_captures_only_forward_jumps() {
    let pos = Position::setup(&STEP_VARIANT, "6k/7/7/7/1p1p3/4p2/2N3K b").unwrap();
    assert_eq!(texts(&captures_on_square(&pos, sq(3, 2))), ["c1d3"]);
    assert_eq!(texts(&captures_on_square(&pos, sq(1, 2))), ["c1b3"]);
    assert!(captures_on_square(&pos, sq(4, 1)).is_empty());

    // 後手の桂は盤上で下向きに跳ぶ
    let pos = Position::setup(&STEP_VARIANT, "2n3k/7/3P3/7/7/7/6K w").unwrap();
    assert_eq!(texts(&captures_on_square(&pos, sq(3, 4))), ["c7d5"]);
}

#[test]
fn test_hook_capture_around_the_corner() {
    // 北へ出て東へ曲がる経路と、東へ出て北へ曲がる経路の両方で届くが、手は一つ
    let pos = Position::setup(&STEP_VARIANT, "6k/7/7/3p3/7/1Q5/6K b").unwrap();
    assert_eq!(texts(&captures_on_square(&pos, sq(3, 3))), ["b2d4"]);
    assert!(legal_moves(&mut pos.clone()).contains(&Move::normal(sq(1, 1), sq(3, 3))));

    // 曲がった先が塞がれると届かない
    let pos = Position::setup(&STEP_VARIANT, "6k/7/7/2pp3/3p3/1Q5/6K b").unwrap();
    assert!(captures_on_square(&pos, sq(3, 3)).is_empty());
}

#[test]
fn test_triple_step_captures() {
    // 一枚だけなら、取って止まる・取って 1 歩先・取って 2 歩先の 3 通り
    let pos = Position::setup(&STEP_VARIANT, "6k/7/7/7/7/3p3/3T2K b").unwrap();
    assert_eq!(texts(&captures_on_square(&pos, sq(3, 1))), ["d1d2", "d1d2,d3", "d1d2,d4"]);

    // 奥の金の方が高いので、金まで進む手は金のマスで生成される
    let pos = Position::setup(&STEP_VARIANT, "6k/7/7/7/3g3/3p3/3T2K b").unwrap();
    assert_eq!(texts(&captures_on_square(&pos, sq(3, 1))), ["d1d2"]);
    assert_eq!(texts(&captures_on_square(&pos, sq(3, 2))), ["d1d2,d3", "d1d2,d3,d4"]);

    let mut pos = pos;
    let before = pos.clone();
    let undo = pos.make_move(Move::with_legs(sq(3, 0), sq(3, 1), sq(3, 2), sq(3, 3)));
    assert_eq!(undo.victims().count(), 2);
    assert_eq!(pos.pieces_of(Color::White).count(), 1);
    assert!(pos.verify().is_ok());
    pos.unmake_move(&undo);
    assert_eq!(pos, before);
}

#[test]
fn test_violent_ox_slides_two_squares() {
    // h10 の猛牛。敵陣は 11 段目から
    let open = "k14/15/15/15/15/7O'7/15/15/15/15/15/15/15/15/K14 b";
    let mut pos = Position::setup(&DAI, open).unwrap();
    let from = sq(7, 9);
    let moves: Vec<Move> = legal_moves(&mut pos).into_iter().filter(|m| m.from() == from).collect();
    assert_eq!(
        texts(&moves),
        [
            "h10f10", "h10g10", "h10h11", "h10h11+", "h10h12", "h10h12+", "h10h8", "h10h9", "h10i10",
            "h10j10",
        ]
    );
    // 敵陣に入る不成は不成マーカー付き
    assert!(moves.iter().filter(|m| m.to().rank() >= 10).all(|m| m.is_promotion() || m.is_deferral()));
    assert!(moves.iter().filter(|m| m.to().rank() < 10).all(|m| !m.is_promotion() && !m.is_deferral()));

    // 自駒で塞がれた先には行けず、敵駒は取って止まる
    let blocked = "k14/15/15/15/7P7/7O'1p5/15/15/15/15/15/15/15/15/K14 b";
    let mut pos = Position::setup(&DAI, blocked).unwrap();
    let moves: Vec<Move> = legal_moves(&mut pos).into_iter().filter(|m| m.from() == from).collect();
    assert_eq!(texts(&moves), ["h10f10", "h10g10", "h10h8", "h10h9", "h10i10", "h10j10"]);
    assert_eq!(texts(&captures_on_square(&pos, sq(9, 9))), ["h10j10"]);
}
