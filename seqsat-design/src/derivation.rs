//! Derivation generation.
//!
//! For every derived level, find the combinations of argument levels its
//! predicate accepts. Derived factors are visited in dependency order so that
//! a factor built on another derived factor only sees the levels of that
//! factor which can actually hold.

use crate::block::Block;
use crate::error::{DesignError, DesignResult};
use crate::factor::Factor;
use crate::window::{Combination, cartesian_product, shift_window};
use rustc_hash::FxHashMap;

/// Valid argument combinations of one derived level.
///
/// Combinations are data indices, already moved across the trials of the
/// level's window (see [`shift_window`]), but not yet placed at a specific
/// trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    level: usize,
    combinations: Vec<Combination>,
}

impl Derivation {
    /// Build a derivation for the level at data index `level`.
    pub fn new<C>(level: usize, combinations: impl IntoIterator<Item = C>) -> Self
    where
        C: IntoIterator<Item = usize>,
    {
        Self {
            level,
            combinations: combinations
                .into_iter()
                .map(|combination| combination.into_iter().collect())
                .collect(),
        }
    }

    /// Data index of the derived level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Accepted combinations, in nested-loop order.
    #[must_use]
    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// True when no combination satisfies the predicate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// Derivations addressed by level data index.
#[derive(Debug, Clone, Default)]
pub struct DerivationTable {
    slots: Vec<Option<Derivation>>,
}

impl DerivationTable {
    fn with_size(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    fn insert(&mut self, derivation: Derivation) {
        let level = derivation.level();
        self.slots[level] = Some(derivation);
    }

    /// Derivation of the level at `data_index`, if that level is derived.
    #[must_use]
    pub fn get(&self, data_index: usize) -> Option<&Derivation> {
        self.slots.get(data_index).and_then(Option::as_ref)
    }

    /// All derivations, ascending by data index.
    pub fn iter(&self) -> impl Iterator<Item = &Derivation> {
        self.slots.iter().flatten()
    }

    /// Number of derived levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when the design has no derived levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Derivations ascending by data index.
    #[must_use]
    pub fn into_vec(self) -> Vec<Derivation> {
        self.slots.into_iter().flatten().collect()
    }
}

/// Order factors so every derived factor comes after its argument factors.
///
/// Depth-first over the argument graph, starting from factors in declaration
/// order, so an already well-ordered design keeps its order.
pub fn dependency_order(design: &[Factor]) -> DesignResult<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        Active,
        Done,
    }

    struct Walk<'a> {
        design: &'a [Factor],
        by_name: FxHashMap<&'a str, usize>,
        marks: Vec<Mark>,
        path: Vec<usize>,
        order: Vec<usize>,
    }

    impl Walk<'_> {
        fn visit(&mut self, f: usize) -> DesignResult<()> {
            match self.marks[f] {
                Mark::Done => return Ok(()),
                Mark::Active => {
                    let start = self.path.iter().position(|&p| p == f).unwrap_or(0);
                    let mut cycle: Vec<String> = self.path[start..]
                        .iter()
                        .map(|&p| self.design[p].name().to_string())
                        .collect();
                    cycle.push(self.design[f].name().to_string());
                    return Err(DesignError::CyclicDependency(cycle));
                }
                Mark::Unvisited => {}
            }

            self.marks[f] = Mark::Active;
            self.path.push(f);
            let design = self.design;
            for (_, level) in design[f].derived_levels() {
                for argument in level.arguments() {
                    let Some(&a) = self.by_name.get(argument.as_str()) else {
                        return Err(DesignError::UnknownArgumentFactor {
                            factor: design[f].name().to_string(),
                            level: level.name().to_string(),
                            argument: argument.clone(),
                        });
                    };
                    self.visit(a)?;
                }
            }
            self.path.pop();
            self.marks[f] = Mark::Done;
            self.order.push(f);
            Ok(())
        }
    }

    let mut walk = Walk {
        design,
        by_name: design
            .iter()
            .enumerate()
            .map(|(index, factor)| (factor.name(), index))
            .collect(),
        marks: vec![Mark::Unvisited; design.len()],
        path: Vec::new(),
        order: Vec::with_capacity(design.len()),
    };
    for f in 0..design.len() {
        walk.visit(f)?;
    }
    Ok(walk.order)
}

/// Derivations of every derived level in the block, ascending by data index.
pub fn generate_derivations(block: &Block) -> DesignResult<Vec<Derivation>> {
    derivation_table(block).map(DerivationTable::into_vec)
}

/// Same as [`generate_derivations`], keeping the index-addressed table.
pub fn derivation_table(block: &Block) -> DesignResult<DerivationTable> {
    let mut table = DerivationTable::with_size(block.trial_size());

    for &f in block.dependency_order() {
        let factor = block.factor(f);
        let Some(window) = factor.window_kind() else {
            continue;
        };

        let mut total = 0;
        for (level_index, level) in factor.derived_levels() {
            let found = level.arguments().len();
            if level.predicate().arity() != found {
                return Err(DesignError::ArityMismatch {
                    factor: factor.name().to_string(),
                    level: level.name().to_string(),
                    expected: level.predicate().arity(),
                    found,
                });
            }

            let domains = level
                .arguments()
                .iter()
                .map(|argument| argument_domain(block, &table, argument, factor, level.name()))
                .collect::<DesignResult<Vec<_>>>()?;

            let accepted: Vec<Combination> = cartesian_product(&domains)
                .into_iter()
                .filter(|combination| {
                    let names: Vec<&str> = combination
                        .iter()
                        .filter_map(|&index| block.level_name(index))
                        .collect();
                    level.predicate().test(&names)
                })
                .collect();

            if accepted.is_empty() {
                tracing::warn!(
                    factor = factor.name(),
                    level = level.name(),
                    "derived level can never hold"
                );
            }
            total += accepted.len();

            let combinations = shift_window(accepted, window, block.trial_size());
            table.insert(Derivation {
                level: block.data_index(f, level_index),
                combinations,
            });
        }

        tracing::debug!(
            factor = factor.name(),
            levels = factor.num_levels(),
            combinations = total,
            "generated derivations"
        );
    }

    Ok(table)
}

/// Data indices an argument factor can take.
fn argument_domain(
    block: &Block,
    table: &DerivationTable,
    argument: &str,
    factor: &Factor,
    level: &str,
) -> DesignResult<Vec<usize>> {
    let a = block
        .factor_index(argument)
        .ok_or_else(|| DesignError::UnknownArgumentFactor {
            factor: factor.name().to_string(),
            level: level.to_string(),
            argument: argument.to_string(),
        })?;

    let indices = (0..block.factor(a).num_levels()).map(|l| block.data_index(a, l));
    Ok(if block.factor(a).is_derived() {
        indices
            .filter(|&index| table.get(index).is_some_and(|d| !d.is_empty()))
            .collect()
    } else {
        indices.collect()
    })
}
