//! Tseitin encoding preserves satisfiability
//!
//! Tests:
//! - Input assignments extendable to a model of the clauses are exactly the
//!   assignments under which the formula is true
//! - The root literal agrees with the formula under the defining extension

use super::*;
use seqsat_logic::{VarCounter, encode, encode_and_assert};
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn asserted_encoding_is_equisatisfiable(formula in formula_strategy()) {
        prop_assume!(formula.num_connectives() <= 10);

        let mut counter = VarCounter::starting_after(NUM_INPUTS);
        let cnf = encode_and_assert(&formula, &mut counter);
        let total = counter.last();

        let mut extendable = BTreeSet::new();
        for bits in 0..(1u64 << total) {
            let model = assignment(bits, total);
            if cnf.is_satisfied_by(&model) {
                extendable.insert(bits & ((1 << NUM_INPUTS) - 1));
            }
        }

        let expected: BTreeSet<u64> = (0..(1u64 << NUM_INPUTS))
            .filter(|&bits| eval(&formula, &|var| bits >> (var - 1) & 1 == 1))
            .collect();

        prop_assert_eq!(extendable, expected);
    }

    #[test]
    fn clauses_only_mention_known_variables(formula in formula_strategy()) {
        let mut counter = VarCounter::starting_after(NUM_INPUTS);
        let (cnf, root) = encode(&formula, &mut counter);

        prop_assert!(cnf.max_var() <= counter.last());
        prop_assert!(root.var() <= counter.last());
        prop_assert_eq!(
            counter.last() - NUM_INPUTS,
            formula.num_connectives() as u32
        );
    }

    #[test]
    fn root_literal_tracks_formula(formula in formula_strategy(), inputs in 0u64..(1 << NUM_INPUTS)) {
        prop_assume!(formula.num_connectives() <= 10);

        let mut counter = VarCounter::starting_after(NUM_INPUTS);
        let (cnf, root) = encode(&formula, &mut counter);
        let total = counter.last();
        let aux = total - NUM_INPUTS;
        let expected = eval(&formula, &|var| inputs >> (var - 1) & 1 == 1);

        // Every model of the definitions that agrees with `inputs` must give
        // the root the formula's value, and at least one model must exist.
        let mut models = 0;
        for aux_bits in 0..(1u64 << aux) {
            let model = assignment(inputs | (aux_bits << NUM_INPUTS), total);
            if cnf.is_satisfied_by(&model) {
                models += 1;
                let root_value = model[root.var() as usize - 1] > 0;
                prop_assert_eq!(root_value == root.is_positive(), expected);
            }
        }
        prop_assert_eq!(models, 1);
    }
}
