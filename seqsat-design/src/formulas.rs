//! Per-trial formulas over the block layout.

use crate::block::Block;
use crate::derivation::Derivation;
use seqsat_logic::{Formula, Lit};

/// Positive literal of `level` of `factor` in `trial`.
#[must_use]
pub fn level_literal(block: &Block, factor: usize, level: usize, trial: usize) -> Lit {
    Lit::positive(block.variable(trial, block.data_index(factor, level)))
}

/// "The derivation's level holds in `trial`", in terms of its arguments.
///
/// One conjunction per accepted combination, read from the window ending at
/// `trial`. `None` where the derived factor does not apply. A derivation
/// with no combinations gives the empty disjunction, which is false.
#[must_use]
pub fn derived_level_formula(
    block: &Block,
    derivation: &Derivation,
    trial: usize,
) -> Option<Formula> {
    let (factor, _) = block.level_at(derivation.level())?;
    let window = block.factor(factor).window_kind()?;
    if !block.applies(factor, trial) {
        return None;
    }

    let start = trial - window.first_trial();
    let conjunctions = derivation.combinations().iter().map(|combination| {
        Formula::and(
            combination
                .iter()
                .map(|&index| Formula::var(block.variable(start, index))),
        )
    });
    Some(Formula::or(conjunctions))
}

/// Ties the level's own variable in `trial` to [`derived_level_formula`].
#[must_use]
pub fn derived_level_definition(
    block: &Block,
    derivation: &Derivation,
    trial: usize,
) -> Option<Formula> {
    let body = derived_level_formula(block, derivation, trial)?;
    let own = block.variable(trial, derivation.level());
    Some(Formula::iff(Formula::var(own), body))
}
