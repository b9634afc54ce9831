//! Error types for design compilation.
//!
//! Failures are reported at the earliest stage that can see them: design
//! problems when the block is built or derivations are generated, name lookups
//! when constraints are desugared, and model inconsistencies when decoding.

use seqsat_logic::LogicError;
use thiserror::Error;

/// A malformed or inconsistent experiment design.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    /// Factor without levels
    #[error("factor '{0}' has no levels")]
    EmptyFactor(String),
    /// Two factors share a name
    #[error("factor '{0}' is declared more than once")]
    DuplicateFactor(String),
    /// Two levels of one factor share a name
    #[error("factor '{factor}' declares level '{level}' more than once")]
    DuplicateLevel {
        /// Factor name
        factor: String,
        /// Repeated level name
        level: String,
    },
    /// Factor with both simple and derived levels
    #[error("factor '{0}' mixes simple and derived levels")]
    MixedLevels(String),
    /// Derived levels of one factor disagree on window width or stride
    #[error("derived levels of factor '{0}' use different window shapes")]
    MismatchedWindows(String),
    /// Zero width/stride, or argument count not matching a multi-trial window
    #[error("invalid window for level '{level}' of factor '{factor}': {reason}")]
    InvalidWindow {
        /// Factor name
        factor: String,
        /// Level name
        level: String,
        /// What is wrong with the window
        reason: String,
    },
    /// Derived level referencing a factor that is not in the design
    #[error("level '{level}' of factor '{factor}' depends on unknown factor '{argument}'")]
    UnknownArgumentFactor {
        /// Factor name
        factor: String,
        /// Level name
        level: String,
        /// Missing argument factor
        argument: String,
    },
    /// Predicate arity differs from the number of window arguments
    #[error(
        "predicate of level '{level}' in factor '{factor}' takes {expected} arguments, window supplies {found}"
    )]
    ArityMismatch {
        /// Factor name
        factor: String,
        /// Level name
        level: String,
        /// Declared predicate arity
        expected: usize,
        /// Number of argument factors
        found: usize,
    },
    /// Derived factors that (transitively) depend on themselves
    #[error("derived factors depend on each other cyclically: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),
    /// Crossing names a factor that is not in the design
    #[error("crossing references unknown factor '{0}'")]
    UnknownCrossingFactor(String),
    /// Crossing without factors
    #[error("crossing is empty")]
    EmptyCrossing,
    /// Block with zero trials
    #[error("block must have at least one trial")]
    NoTrials,
    /// Windows of the crossed factors never line up on a common trial
    #[error("crossed factors never apply at the same trial")]
    CrossingNeverApplies,
    /// Fewer trials where all crossed factors apply than crossed combinations
    #[error("crossing has {combinations} combinations but only {available} trials where all crossed factors apply")]
    TooFewTrials {
        /// Combinations of crossed levels
        combinations: usize,
        /// Trials where every crossed factor applies
        available: usize,
    },
}

/// A constraint names something the design does not have.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Unknown factor name
    #[error("unknown factor '{0}'")]
    UnknownFactor(String),
    /// Unknown level name within a known factor
    #[error("factor '{factor}' has no level '{level}'")]
    UnknownLevel {
        /// Factor name
        factor: String,
        /// Missing level name
        level: String,
    },
}

/// A claimed satisfying assignment that does not describe a trial sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A factor sub-block with zero or several true variables
    #[error(
        "encoding invariant violated: factor '{factor}' has {positives} true levels in trial {trial}"
    )]
    EncodingInvariantViolation {
        /// Factor name
        factor: String,
        /// 0-based trial
        trial: usize,
        /// Number of true variables found
        positives: usize,
    },
    /// Fewer entries than trial variables
    #[error("solution has {found} entries, block needs at least {expected}")]
    SolutionTooShort {
        /// Number of trial variables
        expected: usize,
        /// Entries supplied
        found: usize,
    },
    /// Entry at `index` is not the literal of variable `index + 1`
    #[error("solution entry {index} is {entry}, expected variable {}", .index + 1)]
    MisorderedSolution {
        /// 0-based position
        index: usize,
        /// Offending entry
        entry: i32,
    },
}

/// Any error surfaced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Design error
    #[error(transparent)]
    Design(#[from] DesignError),
    /// Lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Decode error
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// DIMACS or literal error
    #[error(transparent)]
    Logic(#[from] LogicError),
    /// Configuration could not be (de)serialized
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for design validation and derivation generation.
pub type DesignResult<T> = std::result::Result<T, DesignError>;
