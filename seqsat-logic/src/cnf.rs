//! Clause lists in conjunctive normal form.

use crate::literal::{Lit, Var};
use smallvec::SmallVec;

/// Clause (disjunction of literals).
pub type Clause = SmallVec<[Lit; 4]>;

/// A conjunction of clauses. Append-only: clauses are never rewritten or
/// removed once added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Create an empty clause list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause.
    pub fn add_clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        self.clauses.push(lits.into_iter().collect());
    }

    /// Append every clause of `other`, preserving order.
    pub fn append(&mut self, other: Cnf) {
        self.clauses.extend(other.clauses);
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Get all clauses.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterate over clauses.
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Largest variable referenced by any clause (0 if none).
    #[must_use]
    pub fn max_var(&self) -> Var {
        self.clauses
            .iter()
            .flat_map(|clause| clause.iter())
            .map(|lit| lit.var())
            .max()
            .unwrap_or(0)
    }

    /// Clauses as plain signed integers, the shape solver bindings consume.
    #[must_use]
    pub fn to_dimacs_clauses(&self) -> Vec<Vec<i32>> {
        self.clauses
            .iter()
            .map(|clause| clause.iter().map(|lit| lit.to_dimacs()).collect())
            .collect()
    }

    /// Check every clause against a total assignment given as signed
    /// integers indexed by `var - 1`. Variables missing from the assignment
    /// count as false.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &[i32]) -> bool {
        let value = |var: Var| {
            assignment
                .get(var as usize - 1)
                .is_some_and(|&entry| entry > 0)
        };
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|lit| value(lit.var()) == lit.is_positive()))
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
