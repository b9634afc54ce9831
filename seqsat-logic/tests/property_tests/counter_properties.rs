//! Fresh variable counter properties
//!
//! Tests:
//! - Ids handed out across a session strictly increase and never repeat
//! - Auxiliaries never collide with pre-allocated variables

use super::*;
use seqsat_logic::{TseitinEncoder, VarCounter};
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn aux_ids_are_fresh_across_calls(
        seed in 0u32..50,
        formulas in prop::collection::vec(formula_strategy(), 1..8)
    ) {
        let mut counter = VarCounter::starting_after(seed.max(NUM_INPUTS));
        let floor = counter.last();
        let mut encoder = TseitinEncoder::new();
        let mut seen = BTreeSet::new();
        let mut previous = floor;

        for formula in &formulas {
            let root = encoder.encode(formula, &mut counter);
            prop_assert!(counter.last() >= previous);

            if !formula.is_literal() {
                // The root is the last auxiliary introduced by this call.
                prop_assert_eq!(root.var(), counter.last());
                prop_assert!(root.var() > previous);
                prop_assert!(seen.insert(root.var()));
            }
            previous = counter.last();
        }

        let introduced = formulas.iter().map(Formula::num_connectives).sum::<usize>();
        prop_assert_eq!((counter.last() - floor) as usize, introduced);
        prop_assert_eq!(encoder.stats().aux_vars as usize, introduced);
    }
}
