//! Literal type shared by formulas, clauses and solver assignments.
//!
//! Variables are numbered from 1, DIMACS style, so a literal is a non-zero
//! signed integer whose sign is its polarity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Boolean variable identifier (1-based).
pub type Var = u32;

/// Largest variable a literal can carry.
pub const MAX_VAR: Var = i32::MAX as Var;

/// A literal (signed Boolean variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub struct Lit(i32);

impl Lit {
    /// Create a positive literal from a variable.
    #[must_use]
    pub const fn positive(var: Var) -> Self {
        debug_assert!(var != 0 && var <= MAX_VAR, "variable out of literal range");
        Self(var as i32)
    }

    /// Create a negative literal from a variable.
    #[must_use]
    pub const fn negative(var: Var) -> Self {
        debug_assert!(var != 0 && var <= MAX_VAR, "variable out of literal range");
        Self(-(var as i32))
    }

    /// Create a literal with an explicit polarity.
    #[must_use]
    pub const fn new(var: Var, positive: bool) -> Self {
        if positive {
            Self::positive(var)
        } else {
            Self::negative(var)
        }
    }

    /// Create from a DIMACS integer. Returns `None` for zero.
    #[must_use]
    pub const fn from_dimacs(value: i32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// Get the variable of this literal.
    #[must_use]
    pub const fn var(self) -> Var {
        self.0.unsigned_abs()
    }

    /// Check if this literal is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Check if this literal is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Get the negation of this literal.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Get the DIMACS integer.
    #[must_use]
    pub const fn to_dimacs(self) -> i32 {
        self.0
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        self.negate()
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> i32 {
        lit.0
    }
}

impl TryFrom<i32> for Lit {
    type Error = crate::LogicError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Lit::from_dimacs(value).ok_or(crate::LogicError::ZeroLiteral)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
