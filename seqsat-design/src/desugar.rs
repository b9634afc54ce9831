//! Constraint desugaring.
//!
//! Rewrites sequencing constraints into formulas over trial variables. A
//! derived level has its own variable in every trial where its factor
//! applies (tied to its derivation by the compiler), so constraints read
//! level variables directly regardless of how the level is defined.
//!
//! Windows are formed over the trials where the target factor *applies*.
//! When a factor applies in fewer than `k + 1` trials, `NoMoreThanKInARow`
//! produces nothing.

use crate::block::Block;
use crate::constraint::{Constraint, Target};
use crate::error::LookupError;
use crate::formulas::level_literal;
use seqsat_logic::Formula;

/// Formulas that together express `constraint` over `block`.
pub fn desugar(block: &Block, constraint: &Constraint) -> Result<Vec<Formula>, LookupError> {
    let formulas = match constraint {
        Constraint::NoMoreThanKInARow { k, target } => {
            let (factor, levels) = resolve_target(block, target)?;
            no_more_than_k_in_a_row(block, *k, factor, &levels)
        }
        Constraint::Exclude { factor, level } => {
            let (factor, level) = resolve_level(block, factor, level)?;
            block
                .applying_trials(factor)
                .map(|t| Formula::lit(!level_literal(block, factor, level, t)))
                .collect()
        }
    };

    tracing::debug!(?constraint, formulas = formulas.len(), "desugared constraint");
    Ok(formulas)
}

fn no_more_than_k_in_a_row(
    block: &Block,
    k: usize,
    factor: usize,
    levels: &[usize],
) -> Vec<Formula> {
    let trials: Vec<usize> = block.applying_trials(factor).collect();
    if k >= trials.len() {
        return Vec::new();
    }

    let mut formulas = Vec::new();
    for &level in levels {
        for run in trials.windows(k + 1) {
            formulas.push(Formula::not(Formula::and(
                run.iter()
                    .map(|&t| Formula::lit(level_literal(block, factor, level, t))),
            )));
        }
    }
    formulas
}

fn resolve_factor(block: &Block, name: &str) -> Result<usize, LookupError> {
    block
        .factor_index(name)
        .ok_or_else(|| LookupError::UnknownFactor(name.to_string()))
}

fn resolve_level(block: &Block, factor: &str, level: &str) -> Result<(usize, usize), LookupError> {
    let f = resolve_factor(block, factor)?;
    let l = block
        .factor(f)
        .level_index(level)
        .ok_or_else(|| LookupError::UnknownLevel {
            factor: factor.to_string(),
            level: level.to_string(),
        })?;
    Ok((f, l))
}

fn resolve_target(block: &Block, target: &Target) -> Result<(usize, Vec<usize>), LookupError> {
    match target {
        Target::Level { factor, level } => {
            let (f, l) = resolve_level(block, factor, level)?;
            Ok((f, vec![l]))
        }
        Target::Factor(name) => {
            let f = resolve_factor(block, name)?;
            Ok((f, (0..block.factor(f).num_levels()).collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::{DerivedLevel, Factor, Predicate};
    use seqsat_logic::Lit;

    fn design() -> Vec<Factor> {
        vec![
            Factor::new("color", ["red", "blue"]),
            Factor::new("text", ["red", "blue"]),
            Factor::new(
                "congruent?",
                [
                    DerivedLevel::within_trial("con", Predicate::equal(), ["color", "text"]),
                    DerivedLevel::within_trial("inc", Predicate::not_equal(), ["color", "text"]),
                ],
            ),
            Factor::new(
                "color transition",
                [
                    DerivedLevel::transition("repeat", Predicate::equal(), ["color", "color"]),
                    DerivedLevel::transition("switch", Predicate::not_equal(), ["color", "color"]),
                ],
            ),
        ]
    }

    fn block() -> Block {
        Block::new(design(), ["color", "text"], 4, vec![]).unwrap()
    }

    fn not_and(vars: &[u32]) -> Formula {
        Formula::not(Formula::and(vars.iter().map(|&v| Formula::var(v))))
    }

    #[test]
    fn test_no_more_than_once_in_a_row() {
        let formulas = desugar(&block(), &Constraint::no_more_than_k_in_a_row(1, ("congruent?", "con")))
            .unwrap();

        // trial size 8, "con" is data index 4
        assert_eq!(formulas, vec![not_and(&[5, 13]), not_and(&[13, 21]), not_and(&[21, 29])]);
    }

    #[test]
    fn test_whole_factor_target_skips_undefined_trials() {
        let formulas =
            desugar(&block(), &Constraint::no_more_than_k_in_a_row(2, "color transition")).unwrap();

        assert_eq!(formulas, vec![not_and(&[15, 23, 31]), not_and(&[16, 24, 32])]);
    }

    #[test]
    fn test_under_length_windows_are_skipped() {
        let formulas =
            desugar(&block(), &Constraint::no_more_than_k_in_a_row(3, "color transition")).unwrap();
        assert!(formulas.is_empty());

        let formulas = desugar(&block(), &Constraint::no_more_than_k_in_a_row(3, "color")).unwrap();
        assert_eq!(formulas.len(), 2);
    }

    #[test]
    fn test_run_longer_than_any_block() {
        let constraint: Constraint = serde_json::from_str(
            r#"{"NoMoreThanKInARow":{"k":18446744073709551615,"target":{"Factor":"color"}}}"#,
        )
        .unwrap();

        assert_eq!(desugar(&block(), &constraint), Ok(Vec::new()));
        assert_eq!(
            desugar(&block(), &Constraint::no_more_than_k_in_a_row(4, "color")),
            Ok(Vec::new())
        );
    }

    #[test]
    fn test_exclude() {
        let formulas = desugar(&block(), &Constraint::exclude("color transition", "switch")).unwrap();

        assert_eq!(
            formulas,
            vec![
                Formula::lit(Lit::negative(16)),
                Formula::lit(Lit::negative(24)),
                Formula::lit(Lit::negative(32)),
            ]
        );
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            desugar(&block(), &Constraint::no_more_than_k_in_a_row(1, "shape")),
            Err(LookupError::UnknownFactor("shape".to_string()))
        );
        assert_eq!(
            desugar(&block(), &Constraint::exclude("color", "green")),
            Err(LookupError::UnknownLevel {
                factor: "color".to_string(),
                level: "green".to_string(),
            })
        );
    }
}
