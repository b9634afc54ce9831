//! Errors raised by the logic layer.

use thiserror::Error;

/// Error type for literal construction and DIMACS I/O.
#[derive(Error, Debug)]
pub enum LogicError {
    /// Zero is the DIMACS clause terminator, never a literal
    #[error("0 is not a valid literal")]
    ZeroLiteral,
    /// Malformed DIMACS or solver output
    #[error("DIMACS line {line}: {message}")]
    Dimacs {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },
    /// IO error while reading or writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for logic-layer operations
pub type LogicResult<T> = Result<T, LogicError>;
