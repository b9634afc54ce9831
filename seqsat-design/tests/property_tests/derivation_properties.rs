//! Within-trial derivations
//!
//! Tests:
//! - Generated combinations equal a reference product-and-filter over data
//!   indices, for random factor sizes and random truth tables

use proptest::prelude::*;
use seqsat_design::{Block, DerivedLevel, Derivation, Factor, Predicate, generate_derivations};
use std::sync::Arc;

/// Factor sizes plus a truth table over their product.
fn design_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<bool>)> {
    prop::collection::vec(1usize..4, 1..4).prop_flat_map(|sizes| {
        let cells: usize = sizes.iter().product();
        (Just(sizes), prop::collection::vec(any::<bool>(), cells))
    })
}

/// Row-major position of a tuple of level positions.
fn cell(sizes: &[usize], positions: &[usize]) -> usize {
    positions
        .iter()
        .zip(sizes)
        .fold(0, |acc, (&position, &size)| acc * size + position)
}

proptest! {
    #[test]
    fn within_trial_matches_reference((sizes, table) in design_strategy()) {
        let names: Vec<String> = (0..sizes.len()).map(|f| format!("f{f}")).collect();
        let table = Arc::new(table);

        let lookup = {
            let sizes = sizes.clone();
            let table = Arc::clone(&table);
            move |values: &[&str]| {
                let positions: Vec<usize> = values.iter().map(|v| v.parse().unwrap()).collect();
                table[cell(&sizes, &positions)]
            }
        };
        let negated = {
            let lookup = lookup.clone();
            move |values: &[&str]| !lookup(values)
        };

        let mut design: Vec<Factor> = sizes
            .iter()
            .zip(&names)
            .map(|(&size, name)| Factor::new(name.as_str(), (0..size).map(|l| l.to_string())))
            .collect();
        design.push(Factor::new(
            "derived",
            [
                DerivedLevel::within_trial("yes", Predicate::new(sizes.len(), lookup), names.clone()),
                DerivedLevel::within_trial("no", Predicate::new(sizes.len(), negated), names.clone()),
            ],
        ));
        let block = Block::new(design, [names[0].as_str()], sizes[0], vec![]).unwrap();

        // reference: nested loops, first factor slowest
        let offsets: Vec<usize> = sizes
            .iter()
            .scan(0, |next, &size| {
                let offset = *next;
                *next += size;
                Some(offset)
            })
            .collect();
        let total: usize = sizes.iter().sum();
        let mut yes = Vec::new();
        let mut no = Vec::new();
        for index in 0..table.len() {
            let mut rest = index;
            let mut positions = vec![0; sizes.len()];
            for f in (0..sizes.len()).rev() {
                positions[f] = rest % sizes[f];
                rest /= sizes[f];
            }
            let combination: Vec<usize> =
                positions.iter().zip(&offsets).map(|(&p, &o)| p + o).collect();
            if table[index] {
                yes.push(combination);
            } else {
                no.push(combination);
            }
        }

        prop_assert_eq!(
            generate_derivations(&block).unwrap(),
            vec![Derivation::new(total, yes), Derivation::new(total + 1, no)]
        );
    }
}
