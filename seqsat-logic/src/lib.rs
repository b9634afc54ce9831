//! seqsat logic - formulas, Tseitin CNF and DIMACS for the seqsat compiler
//!
//! This crate is the solver-facing half of seqsat:
//! - [`Formula`]: immutable Boolean expression trees over numbered variables
//! - [`VarCounter`]: the single fresh-variable source of a compilation session
//! - [`TseitinEncoder`]: linear-size, equisatisfiable CNF conversion
//! - [`Cnf`] and [`SolverOutcome`]: clause lists and solver answers in DIMACS
//!
//! # Examples
//!
//! ```
//! use seqsat_logic::{Formula, VarCounter, TseitinEncoder};
//!
//! // Variables 1 and 2 are owned by the caller; auxiliaries start at 3.
//! let mut counter = VarCounter::starting_after(2);
//! let mut encoder = TseitinEncoder::new();
//!
//! let f = Formula::not(Formula::and([Formula::var(1), Formula::var(2)]));
//! encoder.encode_and_assert(&f, &mut counter);
//!
//! let cnf = encoder.finish();
//! assert!(cnf.is_satisfied_by(&[1, -2, -3, 4]));
//! assert!(!cnf.is_satisfied_by(&[1, 2, 3, -4]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cnf;
pub mod counter;
pub mod dimacs;
pub mod error;
pub mod formula;
pub mod literal;
pub mod tseitin;

pub use cnf::{Clause, Cnf};
pub use counter::VarCounter;
pub use dimacs::SolverOutcome;
pub use error::{LogicError, LogicResult};
pub use formula::Formula;
pub use literal::{Lit, MAX_VAR, Var};
pub use tseitin::{TseitinConfig, TseitinEncoder, TseitinStats, encode, encode_and_assert};
