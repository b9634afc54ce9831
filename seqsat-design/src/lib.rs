//! seqsat design - compile counterbalanced trial-sequence designs into SAT
//!
//! An experiment design is a list of [`Factor`]s. Some levels are *derived*:
//! they hold when a [`Predicate`] accepts the levels of other factors, read
//! from the same trial or from a window of consecutive trials. A [`Block`]
//! lays the design out over a number of trials, numbering one SAT variable
//! per trial, factor and level.
//!
//! The pipeline:
//! - [`generate_derivations`]: the argument combinations each derived level
//!   accepts, in dependency order
//! - [`desugar`]: sequencing [`Constraint`]s as [`Formula`]s
//! - [`compile`]: everything as CNF through one Tseitin session
//! - [`decode`]: a solver model back into a [`TrialSequence`]
//!
//! # Examples
//!
//! ```
//! use seqsat_design::{Block, CompileConfig, DerivedLevel, Factor, Predicate, compile, decode};
//!
//! let design = vec![
//!     Factor::new("color", ["red", "blue"]),
//!     Factor::new("text", ["red", "blue"]),
//!     Factor::new(
//!         "congruent?",
//!         [
//!             DerivedLevel::within_trial("con", Predicate::equal(), ["color", "text"]),
//!             DerivedLevel::within_trial("inc", Predicate::not_equal(), ["color", "text"]),
//!         ],
//!     ),
//! ];
//! let block = Block::fully_crossed(design, ["color", "text"], vec![])?;
//! assert_eq!(block.trials(), 4);
//!
//! let compiled = compile(&block, &CompileConfig::default())?;
//! assert_eq!(compiled.grid_variables(), 24);
//!
//! let model = [
//!     -1, 2, -3, 4, 5, -6, -7, 8, 9, -10, -11, 12,
//!     13, -14, -15, 16, -17, 18, 19, -20, 21, -22, 23, -24,
//! ];
//! let sequence = decode(&block, &model)?;
//! assert_eq!(sequence.levels("congruent?").unwrap(), ["con", "inc", "inc", "con"]);
//! # Ok::<(), seqsat_design::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod block;
pub mod compile;
pub mod config;
pub mod constraint;
pub mod decode;
pub mod derivation;
pub mod desugar;
pub mod error;
pub mod factor;
pub mod formulas;
pub mod window;

pub use block::Block;
pub use compile::{CompileStats, CompiledBlock, compile};
pub use config::CompileConfig;
pub use constraint::{Constraint, Target};
pub use decode::{TrialSequence, decode};
pub use derivation::{
    Derivation, DerivationTable, dependency_order, derivation_table, generate_derivations,
};
pub use desugar::desugar;
pub use error::{DecodeError, DesignError, DesignResult, Error, LookupError, Result};
pub use factor::{DerivedLevel, Factor, Level, Predicate, WindowKind};
pub use formulas::{derived_level_definition, derived_level_formula, level_literal};
pub use window::{Combination, shift_window};

pub use seqsat_logic::{Cnf, Formula, Lit, SolverOutcome, Var, VarCounter};
