//! Compiled block layout.
//!
//! Variables are numbered from 1 in one contiguous run per trial. Inside a
//! trial every factor owns a sub-block of `num_levels` variables, in
//! declaration order. The position of a (factor, level) pair inside a trial is
//! its *data index*; its variable in trial `t` is
//! `t * trial_size + data_index + 1`.
//!
//! A derived factor with a multi-trial window does not exist in every trial.
//! The block precomputes, per factor and trial, whether the factor *applies*.

use crate::constraint::Constraint;
use crate::derivation::dependency_order;
use crate::error::{DesignError, DesignResult};
use crate::factor::{Factor, WindowKind};
use rustc_hash::{FxHashMap, FxHashSet};
use seqsat_logic::Var;

/// A design laid out over a fixed number of trials.
#[derive(Debug, Clone)]
pub struct Block {
    design: Vec<Factor>,
    crossing: Vec<usize>,
    constraints: Vec<Constraint>,
    trials: usize,
    trial_size: usize,
    offsets: Vec<usize>,
    owners: Vec<(usize, usize)>,
    by_name: FxHashMap<String, usize>,
    order: Vec<usize>,
    applies: Vec<Vec<bool>>,
}

impl Block {
    /// Lay out `design` over an explicit number of trials.
    ///
    /// There must be at least as many trials where every crossed factor
    /// applies as there are combinations of crossed levels.
    pub fn new<S: AsRef<str>>(
        design: Vec<Factor>,
        crossing: impl IntoIterator<Item = S>,
        trials: usize,
        constraints: Vec<Constraint>,
    ) -> DesignResult<Self> {
        if trials == 0 {
            return Err(DesignError::NoTrials);
        }
        let by_name = validate_design(&design)?;
        let order = dependency_order(&design)?;
        let crossing = resolve_crossing(&by_name, crossing)?;
        let applies = applicability(&design, &by_name, &order, trials);

        let combinations: usize = crossing.iter().map(|&f| design[f].num_levels()).product();
        let available = (0..trials)
            .filter(|&t| crossing.iter().all(|&f| applies[f][t]))
            .count();
        if available == 0 {
            return Err(DesignError::CrossingNeverApplies);
        }
        if available < combinations {
            return Err(DesignError::TooFewTrials {
                combinations,
                available,
            });
        }

        Ok(Self::assemble(
            design,
            crossing,
            constraints,
            trials,
            by_name,
            order,
            applies,
        ))
    }

    /// Lay out `design` over the fewest trials in which every combination of
    /// crossed levels can occur exactly once.
    ///
    /// Leading trials where a windowed crossed factor does not exist yet are
    /// added on top of the combination count.
    pub fn fully_crossed<S: AsRef<str>>(
        design: Vec<Factor>,
        crossing: impl IntoIterator<Item = S>,
        constraints: Vec<Constraint>,
    ) -> DesignResult<Self> {
        let by_name = validate_design(&design)?;
        let order = dependency_order(&design)?;
        let crossing = resolve_crossing(&by_name, crossing)?;

        let combinations: usize = crossing.iter().map(|&f| design[f].num_levels()).product();
        let (period, lead) = design
            .iter()
            .filter_map(Factor::window_kind)
            .fold((1, 0), |(period, lead), window| {
                (period * window.stride(), lead + window.first_trial())
            });
        let horizon = lead + combinations * period;

        let table = applicability(&design, &by_name, &order, horizon);
        let last = (0..horizon)
            .filter(|&t| crossing.iter().all(|&f| table[f][t]))
            .nth(combinations - 1)
            .ok_or(DesignError::CrossingNeverApplies)?;
        let trials = last + 1;

        tracing::debug!(combinations, trials, "sized fully crossed block");

        let applies = table.into_iter().map(|mut row| {
            row.truncate(trials);
            row
        });
        Ok(Self::assemble(
            design,
            crossing,
            constraints,
            trials,
            by_name,
            order,
            applies.collect(),
        ))
    }

    fn assemble(
        design: Vec<Factor>,
        crossing: Vec<usize>,
        constraints: Vec<Constraint>,
        trials: usize,
        by_name: FxHashMap<String, usize>,
        order: Vec<usize>,
        applies: Vec<Vec<bool>>,
    ) -> Self {
        let mut offsets = Vec::with_capacity(design.len());
        let mut owners = Vec::new();
        for (f, factor) in design.iter().enumerate() {
            offsets.push(owners.len());
            owners.extend((0..factor.num_levels()).map(|level| (f, level)));
        }

        Self {
            trial_size: owners.len(),
            design,
            crossing,
            constraints,
            trials,
            offsets,
            owners,
            by_name,
            order,
            applies,
        }
    }

    /// Factors in declaration order.
    #[must_use]
    pub fn design(&self) -> &[Factor] {
        &self.design
    }

    /// Factor at `index`.
    #[must_use]
    pub fn factor(&self, index: usize) -> &Factor {
        &self.design[index]
    }

    /// Index of the factor called `name`.
    #[must_use]
    pub fn factor_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Indices of the crossed factors.
    #[must_use]
    pub fn crossing(&self) -> &[usize] {
        &self.crossing
    }

    /// Number of combinations of crossed levels.
    #[must_use]
    pub fn crossing_size(&self) -> usize {
        self.crossing
            .iter()
            .map(|&f| self.design[f].num_levels())
            .product()
    }

    /// Sequencing constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of trials.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Variables per trial (total level count).
    #[must_use]
    pub fn trial_size(&self) -> usize {
        self.trial_size
    }

    /// Factor indices such that every derived factor follows its arguments.
    #[must_use]
    pub fn dependency_order(&self) -> &[usize] {
        &self.order
    }

    /// Data index of the first level of `factor`.
    #[must_use]
    pub fn offset(&self, factor: usize) -> usize {
        self.offsets[factor]
    }

    /// Data index of `level` of `factor`.
    #[must_use]
    pub fn data_index(&self, factor: usize, level: usize) -> usize {
        self.offsets[factor] + level
    }

    /// (factor, level) owning a data index.
    #[must_use]
    pub fn level_at(&self, data_index: usize) -> Option<(usize, usize)> {
        self.owners.get(data_index).copied()
    }

    /// Level name at a data index.
    #[must_use]
    pub fn level_name(&self, data_index: usize) -> Option<&str> {
        self.level_at(data_index)
            .map(|(f, level)| self.design[f].levels()[level].name())
    }

    /// Variable for a data index in a trial.
    #[must_use]
    pub fn variable(&self, trial: usize, data_index: usize) -> Var {
        (trial * self.trial_size + data_index + 1) as Var
    }

    /// Number of trial variables (1..=grid_variables).
    #[must_use]
    pub fn grid_variables(&self) -> Var {
        (self.trials * self.trial_size) as Var
    }

    /// Whether `factor` has a value in `trial`.
    #[must_use]
    pub fn applies(&self, factor: usize, trial: usize) -> bool {
        self.applies
            .get(factor)
            .and_then(|row| row.get(trial))
            .copied()
            .unwrap_or(false)
    }

    /// Trials in which `factor` has a value, ascending.
    pub fn applying_trials(&self, factor: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.trials).filter(move |&t| self.applies(factor, t))
    }
}

fn validate_design(design: &[Factor]) -> DesignResult<FxHashMap<String, usize>> {
    let mut by_name = FxHashMap::default();

    for (index, factor) in design.iter().enumerate() {
        if factor.num_levels() == 0 {
            return Err(DesignError::EmptyFactor(factor.name().to_string()));
        }
        if by_name.insert(factor.name().to_string(), index).is_some() {
            return Err(DesignError::DuplicateFactor(factor.name().to_string()));
        }

        let mut seen = FxHashSet::default();
        for level in factor.levels() {
            if !seen.insert(level.name()) {
                return Err(DesignError::DuplicateLevel {
                    factor: factor.name().to_string(),
                    level: level.name().to_string(),
                });
            }
        }

        let derived = factor.derived_levels().count();
        if derived != 0 && derived != factor.num_levels() {
            return Err(DesignError::MixedLevels(factor.name().to_string()));
        }
        if let Some(window) = factor.window_kind() {
            if factor
                .derived_levels()
                .any(|(_, level)| level.window_kind() != window)
            {
                return Err(DesignError::MismatchedWindows(factor.name().to_string()));
            }
            for (_, level) in factor.derived_levels() {
                if let Some(reason) = window_problem(window, level.arguments().len()) {
                    return Err(DesignError::InvalidWindow {
                        factor: factor.name().to_string(),
                        level: level.name().to_string(),
                        reason,
                    });
                }
            }
        }
    }

    for factor in design {
        for (_, level) in factor.derived_levels() {
            if let Some(missing) = level
                .arguments()
                .iter()
                .find(|argument| !by_name.contains_key(argument.as_str()))
            {
                return Err(DesignError::UnknownArgumentFactor {
                    factor: factor.name().to_string(),
                    level: level.name().to_string(),
                    argument: missing.clone(),
                });
            }
        }
    }

    Ok(by_name)
}

fn window_problem(window: WindowKind, arguments: usize) -> Option<String> {
    if window.width() == 0 {
        Some("width must be at least 1".to_string())
    } else if window.stride() == 0 {
        Some("stride must be at least 1".to_string())
    } else if arguments == 0 {
        Some("no argument factors".to_string())
    } else if window.width() > 1 && arguments != window.width() {
        Some(format!(
            "a window of width {} reads {} arguments, found {}",
            window.width(),
            window.width(),
            arguments
        ))
    } else {
        None
    }
}

fn resolve_crossing<S: AsRef<str>>(
    by_name: &FxHashMap<String, usize>,
    crossing: impl IntoIterator<Item = S>,
) -> DesignResult<Vec<usize>> {
    let crossing = crossing
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| DesignError::UnknownCrossingFactor(name.to_string()))
        })
        .collect::<DesignResult<Vec<usize>>>()?;

    if crossing.is_empty() {
        return Err(DesignError::EmptyCrossing);
    }
    Ok(crossing)
}

/// Per factor, per trial: does the factor have a value there.
///
/// `order` must list arguments before the factors derived from them.
fn applicability(
    design: &[Factor],
    by_name: &FxHashMap<String, usize>,
    order: &[usize],
    trials: usize,
) -> Vec<Vec<bool>> {
    let mut table: Vec<Vec<bool>> = vec![Vec::new(); design.len()];

    for &f in order {
        let factor = &design[f];
        let row = match factor.window_kind() {
            None => vec![true; trials],
            Some(window) => {
                let first = window.first_trial();
                (0..trials)
                    .map(|t| {
                        t >= first
                            && (t - first) % window.stride() == 0
                            && factor.derived_levels().all(|(_, level)| {
                                level.arguments().iter().enumerate().all(|(i, argument)| {
                                    let at = if window.width() == 1 { t } else { t - first + i };
                                    by_name
                                        .get(argument.as_str())
                                        .is_some_and(|&a| table[a].get(at).copied().unwrap_or(false))
                                })
                            })
                    })
                    .collect()
            }
        };
        table[f] = row;
    }

    table
}
