//! Shared designs and model helpers for the integration tests

#![allow(dead_code)]

use seqsat_design::{Block, DerivedLevel, Factor, Predicate};
use seqsat_logic::{Cnf, Var};

/// Route library events to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn color() -> Factor {
    Factor::new("color", ["red", "blue"])
}

pub fn text() -> Factor {
    Factor::new("text", ["red", "blue"])
}

pub fn congruent() -> Factor {
    Factor::new(
        "congruent?",
        [
            DerivedLevel::within_trial("con", Predicate::equal(), ["color", "text"]),
            DerivedLevel::within_trial("inc", Predicate::not_equal(), ["color", "text"]),
        ],
    )
}

pub fn color_repeats() -> Factor {
    Factor::new(
        "color repeats?",
        [
            DerivedLevel::transition("yes", Predicate::equal(), ["color", "color"]),
            DerivedLevel::transition("no", Predicate::not_equal(), ["color", "color"]),
        ],
    )
}

pub fn stroop() -> Vec<Factor> {
    vec![color(), text(), congruent()]
}

/// Trial-variable assignment describing a sequence.
///
/// `sequence` gives, per factor, one level name per trial; `""` marks a trial
/// where the factor does not apply (all its variables false).
pub fn model_for(block: &Block, sequence: &[(&str, Vec<&str>)]) -> Vec<i32> {
    let mut model: Vec<i32> = (1..=block.grid_variables() as i32).map(|v| -v).collect();
    for (name, levels) in sequence {
        let f = block.factor_index(name).unwrap();
        for (trial, level) in levels.iter().enumerate() {
            if level.is_empty() {
                continue;
            }
            let l = block.factor(f).level_index(level).unwrap();
            let var = block.variable(trial, block.data_index(f, l)) as usize;
            model[var - 1] = var as i32;
        }
    }
    model
}

/// Extend `fixed` (values of variables 1..=fixed.len()) to a model of `cnf`
/// by unit propagation.
///
/// Every auxiliary introduced by the compiler is defined by its children, so
/// once the trial variables are fixed propagation decides all of them. Returns
/// `None` on conflict or if some variable stays open.
pub fn extend_assignment(cnf: &Cnf, num_vars: Var, fixed: &[i32]) -> Option<Vec<i32>> {
    let mut value: Vec<Option<bool>> = vec![None; num_vars as usize];
    for &entry in fixed {
        value[entry.unsigned_abs() as usize - 1] = Some(entry > 0);
    }

    loop {
        let mut changed = false;
        for clause in cnf {
            let mut open = Vec::new();
            let mut satisfied = false;
            for lit in clause {
                match value[lit.var() as usize - 1] {
                    Some(v) if v == lit.is_positive() => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => open.push(*lit),
                }
            }
            if satisfied {
                continue;
            }
            match open.as_slice() {
                [] => return None,
                [unit] => {
                    value[unit.var() as usize - 1] = Some(unit.is_positive());
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            break;
        }
    }

    let model: Vec<i32> = value
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let var = index as i32 + 1;
            match v {
                Some(true) => Some(var),
                Some(false) => Some(-var),
                None => None,
            }
        })
        .collect::<Option<_>>()?;

    cnf.is_satisfied_by(&model).then_some(model)
}
