//! Sequencing constraints.

use serde::{Deserialize, Serialize};

/// What a repetition constraint counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// One level of one factor.
    Level {
        /// Factor name.
        factor: String,
        /// Level name.
        level: String,
    },
    /// Every level of a factor, each counted separately.
    Factor(String),
}

impl From<(&str, &str)> for Target {
    fn from((factor, level): (&str, &str)) -> Self {
        Target::Level {
            factor: factor.to_string(),
            level: level.to_string(),
        }
    }
}

impl From<&str> for Target {
    fn from(factor: &str) -> Self {
        Target::Factor(factor.to_string())
    }
}

/// A constraint on the order of trials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    /// The target level never holds in more than `k` consecutive trials
    /// where its factor applies.
    NoMoreThanKInARow {
        /// Longest permitted run.
        k: usize,
        /// Level or factor the run is counted on.
        target: Target,
    },
    /// The level never occurs.
    Exclude {
        /// Factor name.
        factor: String,
        /// Level name.
        level: String,
    },
}

impl Constraint {
    /// Runs of the target are at most `k` trials long.
    pub fn no_more_than_k_in_a_row(k: usize, target: impl Into<Target>) -> Self {
        Constraint::NoMoreThanKInARow {
            k,
            target: target.into(),
        }
    }

    /// `level` of `factor` is excluded from every trial.
    pub fn exclude(factor: impl Into<String>, level: impl Into<String>) -> Self {
        Constraint::Exclude {
            factor: factor.into(),
            level: level.into(),
        }
    }
}
