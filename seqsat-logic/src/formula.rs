//! Boolean formula algebra.
//!
//! Formulas are immutable value trees. They carry no CNF concerns: turning a
//! formula into clauses is the job of [`crate::tseitin`].

use crate::literal::{Lit, Var};
use std::collections::BTreeSet;
use std::fmt;

/// A Boolean formula over numbered variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A variable with a polarity.
    Literal(Lit),
    /// Negation.
    Not(Box<Formula>),
    /// N-ary conjunction. The empty conjunction is true.
    And(Vec<Formula>),
    /// N-ary disjunction. The empty disjunction is false.
    Or(Vec<Formula>),
    /// Exclusive or.
    Xor(Box<Formula>, Box<Formula>),
    /// Biconditional.
    Iff(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Positive literal for `var`.
    #[must_use]
    pub fn var(var: Var) -> Self {
        Formula::Literal(Lit::positive(var))
    }

    /// Literal node.
    #[must_use]
    pub fn lit(lit: Lit) -> Self {
        Formula::Literal(lit)
    }

    /// Negation node.
    #[must_use]
    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    /// Conjunction node.
    pub fn and(args: impl IntoIterator<Item = Formula>) -> Self {
        Formula::And(args.into_iter().collect())
    }

    /// Disjunction node.
    pub fn or(args: impl IntoIterator<Item = Formula>) -> Self {
        Formula::Or(args.into_iter().collect())
    }

    /// Exclusive-or node.
    #[must_use]
    pub fn xor(lhs: Formula, rhs: Formula) -> Self {
        Formula::Xor(Box::new(lhs), Box::new(rhs))
    }

    /// Biconditional node.
    #[must_use]
    pub fn iff(lhs: Formula, rhs: Formula) -> Self {
        Formula::Iff(Box::new(lhs), Box::new(rhs))
    }

    /// Whether this node is a leaf.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Formula::Literal(_))
    }

    /// Variables occurring anywhere in the formula, ascending.
    #[must_use]
    pub fn free_variables(&self) -> BTreeSet<Var> {
        let mut vars = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Formula::Literal(lit) => {
                    vars.insert(lit.var());
                }
                Formula::Not(inner) => stack.push(inner),
                Formula::And(args) | Formula::Or(args) => stack.extend(args.iter()),
                Formula::Xor(lhs, rhs) | Formula::Iff(lhs, rhs) => {
                    stack.push(lhs);
                    stack.push(rhs);
                }
            }
        }
        vars
    }

    /// Number of non-literal nodes, i.e. how many auxiliary variables a
    /// Tseitin encoding without sharing introduces.
    #[must_use]
    pub fn num_connectives(&self) -> usize {
        match self {
            Formula::Literal(_) => 0,
            Formula::Not(inner) => 1 + inner.num_connectives(),
            Formula::And(args) | Formula::Or(args) => {
                1 + args.iter().map(Formula::num_connectives).sum::<usize>()
            }
            Formula::Xor(lhs, rhs) | Formula::Iff(lhs, rhs) => {
                1 + lhs.num_connectives() + rhs.num_connectives()
            }
        }
    }
}

impl From<Lit> for Formula {
    fn from(lit: Lit) -> Self {
        Formula::Literal(lit)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, op: &str, args: &[Formula]) -> fmt::Result {
    write!(f, "({}", op)?;
    for arg in args {
        write!(f, " {}", arg)?;
    }
    write!(f, ")")
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Literal(lit) => write!(f, "{}", lit),
            Formula::Not(inner) => write!(f, "(not {})", inner),
            Formula::And(args) => write_list(f, "and", args),
            Formula::Or(args) => write_list(f, "or", args),
            Formula::Xor(lhs, rhs) => write!(f, "(xor {} {})", lhs, rhs),
            Formula::Iff(lhs, rhs) => write!(f, "(iff {} {})", lhs, rhs),
        }
    }
}
