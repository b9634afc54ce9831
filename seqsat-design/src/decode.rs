//! Solution decoding.

use crate::block::Block;
use crate::error::DecodeError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Level names per factor and trial.
///
/// Factors keep their declaration order. A trial where a factor does not
/// apply (the first trials of a windowed factor) holds no level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSequence {
    factors: Vec<(String, Vec<Option<String>>)>,
    trials: usize,
}

impl TrialSequence {
    /// Number of trials.
    #[must_use]
    pub fn num_trials(&self) -> usize {
        self.trials
    }

    /// Factor names, in declaration order.
    pub fn factor_names(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|(name, _)| name.as_str())
    }

    /// Level of `factor` in `trial`; `None` for a placeholder or unknown name.
    #[must_use]
    pub fn get(&self, factor: &str, trial: usize) -> Option<&str> {
        self.column(factor)?.get(trial)?.as_deref()
    }

    /// All levels of `factor`, with `""` where the factor does not apply.
    #[must_use]
    pub fn levels(&self, factor: &str) -> Option<Vec<&str>> {
        self.column(factor)
            .map(|column| column.iter().map(|level| level.as_deref().unwrap_or("")).collect())
    }

    fn column(&self, factor: &str) -> Option<&[Option<String>]> {
        self.factors
            .iter()
            .find(|(name, _)| name == factor)
            .map(|(_, column)| column.as_slice())
    }
}

impl Serialize for TrialSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.factors.len()))?;
        for (name, column) in &self.factors {
            let levels: Vec<&str> = column.iter().map(|l| l.as_deref().unwrap_or("")).collect();
            map.serialize_entry(name, &levels)?;
        }
        map.end()
    }
}

impl fmt::Display for TrialSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trial in 0..self.trials {
            write!(f, "{:>3}", trial + 1)?;
            for (name, column) in &self.factors {
                match &column[trial] {
                    Some(level) => write!(f, "  {name}={level}")?,
                    None => write!(f, "  {name}=-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Read the trial sequence out of a solver model.
///
/// `solution` holds one signed entry per variable, ascending from 1. Only the
/// trial variables are inspected; auxiliaries past them are ignored.
pub fn decode(block: &Block, solution: &[i32]) -> Result<TrialSequence, DecodeError> {
    let grid = block.grid_variables() as usize;
    if solution.len() < grid {
        return Err(DecodeError::SolutionTooShort {
            expected: grid,
            found: solution.len(),
        });
    }
    if let Some((index, &entry)) = solution
        .iter()
        .enumerate()
        .find(|&(index, entry)| entry.unsigned_abs() as usize != index + 1)
    {
        return Err(DecodeError::MisorderedSolution { index, entry });
    }

    let mut factors = Vec::with_capacity(block.design().len());
    for (f, factor) in block.design().iter().enumerate() {
        let mut column = Vec::with_capacity(block.trials());
        for trial in 0..block.trials() {
            if !block.applies(f, trial) {
                column.push(None);
                continue;
            }

            let mut chosen = None;
            let mut positives = 0;
            for level in 0..factor.num_levels() {
                let var = block.variable(trial, block.data_index(f, level)) as usize;
                if solution[var - 1] > 0 {
                    positives += 1;
                    chosen = Some(level);
                }
            }
            match chosen {
                Some(level) if positives == 1 => {
                    column.push(Some(factor.levels()[level].name().to_string()));
                }
                _ => {
                    return Err(DecodeError::EncodingInvariantViolation {
                        factor: factor.name().to_string(),
                        trial,
                        positives,
                    });
                }
            }
        }
        factors.push((factor.name().to_string(), column));
    }

    Ok(TrialSequence {
        factors,
        trials: block.trials(),
    })
}
