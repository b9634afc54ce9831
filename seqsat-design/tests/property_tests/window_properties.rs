//! Window shifting
//!
//! Tests:
//! - Subtracting `i * trial_size` from element `i` undoes the shift
//! - Width 1 never moves anything

use proptest::prelude::*;
use seqsat_design::{Combination, WindowKind, shift_window};

fn window_strategy() -> impl Strategy<Value = WindowKind> {
    prop_oneof![
        Just(WindowKind::WithinTrial),
        Just(WindowKind::Transition),
        (1usize..6, 1usize..4).prop_map(|(width, stride)| WindowKind::Window { width, stride }),
    ]
}

fn combinations(width: usize) -> impl Strategy<Value = Vec<Combination>> {
    prop::collection::vec(
        prop::collection::vec(0usize..32, width).prop_map(|c| c.into_iter().collect::<Combination>()),
        0..8,
    )
}

proptest! {
    #[test]
    fn unshift_recovers_combinations(
        (window, input) in window_strategy()
            .prop_flat_map(|window| (Just(window), combinations(window.width()))),
        trial_size in 1usize..20,
    ) {
        let shifted = shift_window(input.clone(), window, trial_size);
        prop_assert_eq!(shifted.len(), input.len());

        let unshifted: Vec<Combination> = shifted
            .into_iter()
            .map(|c| c.into_iter().enumerate().map(|(i, index)| index - i * trial_size).collect())
            .collect();
        prop_assert_eq!(unshifted, input);
    }

    #[test]
    fn width_one_is_identity(input in combinations(3), trial_size in 0usize..20) {
        let shifted = shift_window(input.clone(), WindowKind::WithinTrial, trial_size);
        prop_assert_eq!(shifted, input);
    }
}
