//! Property-based tests for the logic layer

mod counter_properties;
mod tseitin_properties;

use proptest::prelude::*;
use seqsat_logic::{Formula, Lit, Var};

/// Variables 1..=NUM_INPUTS are inputs; everything above is auxiliary.
pub const NUM_INPUTS: Var = 3;

/// Small random formulas over the input variables.
pub fn formula_strategy() -> impl Strategy<Value = Formula> {
    let leaf = (1..=NUM_INPUTS, any::<bool>()).prop_map(|(v, pos)| Formula::lit(Lit::new(v, pos)));
    leaf.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Formula::And),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Formula::Or),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Formula::xor(a, b)),
            (inner.clone(), inner).prop_map(|(a, b)| Formula::iff(a, b)),
        ]
    })
}

/// Reference semantics, used only to check the encoder.
pub fn eval(formula: &Formula, value: &dyn Fn(Var) -> bool) -> bool {
    match formula {
        Formula::Literal(lit) => value(lit.var()) == lit.is_positive(),
        Formula::Not(inner) => !eval(inner, value),
        Formula::And(args) => args.iter().all(|arg| eval(arg, value)),
        Formula::Or(args) => args.iter().any(|arg| eval(arg, value)),
        Formula::Xor(lhs, rhs) => eval(lhs, value) != eval(rhs, value),
        Formula::Iff(lhs, rhs) => eval(lhs, value) == eval(rhs, value),
    }
}

/// Signed assignment for variables 1..=num_vars taken from the bits of `bits`.
pub fn assignment(bits: u64, num_vars: Var) -> Vec<i32> {
    (1..=num_vars)
        .map(|var| {
            if bits >> (var - 1) & 1 == 1 {
                var as i32
            } else {
                -(var as i32)
            }
        })
        .collect()
}
