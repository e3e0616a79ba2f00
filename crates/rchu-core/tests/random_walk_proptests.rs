use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rchu_core::movegen::legal_moves;
use rchu_core::position::UndoRecord;
use rchu_core::{CHU, DAI, Position, Variant};

/// 合法手をランダムに `plies` 手指し、各局面で整合性を確認してから全部戻す
fn walk_and_return(variant: &'static Variant, seed: u64, plies: usize) -> Result<(), TestCaseError> {
    let mut pos = Position::start(variant).unwrap();
    let start = pos.clone();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut stack: Vec<(UndoRecord, u64)> = Vec::new();

    for _ in 0..plies {
        let moves = legal_moves(&mut pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        let before = pos.hash();
        let undo = pos.make_move(mv);
        prop_assert!(pos.verify().is_ok(), "{:?}", pos.verify());
        if !mv.is_null() {
            prop_assert_ne!(pos.hash(), before);
        }
        stack.push((undo, before));
    }

    while let Some((undo, before)) = stack.pop() {
        pos.unmake_move(&undo);
        prop_assert_eq!(pos.hash(), before);
    }
    prop_assert_eq!(pos, start);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn prop_chu_make_unmake_round_trip(seed in any::<u64>(), plies in 1usize..40) {
        walk_and_return(&CHU, seed, plies)?;
    }

    #[test]
    fn prop_dai_make_unmake_round_trip(seed in any::<u64>(), plies in 1usize..24) {
        walk_and_return(&DAI, seed, plies)?;
    }

    #[test]
    fn prop_compact_keeps_hash_and_board(seed in any::<u64>(), plies in 1usize..40) {
        let mut pos = Position::start(&CHU).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        for _ in 0..plies {
            let moves = legal_moves(&mut pos);
            if moves.is_empty() {
                break;
            }
            pos.make_move(moves[rng.random_range(0..moves.len())]);
        }
        let before = pos.clone();
        pos.compact();
        prop_assert_eq!(pos.hash(), before.hash());
        prop_assert_eq!(pos.eval_delta(), before.eval_delta());
        prop_assert_eq!(pos.to_notation(), before.to_notation());
        prop_assert!(pos.pieces().len() <= before.pieces().len());
        prop_assert!(pos.verify().is_ok());
        prop_assert_eq!(legal_moves(&mut pos).len(), legal_moves(&mut before.clone()).len());
    }
}
