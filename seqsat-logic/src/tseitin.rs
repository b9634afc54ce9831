//! Tseitin transformation.
//!
//! Converts a [`Formula`] into an equisatisfiable clause list by introducing
//! one auxiliary variable per connective. Leaves are not given auxiliaries:
//! a literal node stands for itself.
//!
//! For a node `z = op(a1..an)` the emitted clauses are:
//!
//! | node       | clauses                                                |
//! |------------|--------------------------------------------------------|
//! | `not a`    | `(-z -a) (z a)`                                        |
//! | `and a..`  | `(-z ai)` for each i, `(z -a1 .. -an)`                 |
//! | `or a..`   | `(z -ai)` for each i, `(-z a1 .. an)`                  |
//! | `xor a b`  | `(-z a b) (-z -a -b) (z -a b) (z a -b)`                |
//! | `iff a b`  | `(-z -a b) (-z a -b) (z a b) (z -a -b)`                |
//!
//! An empty `or` therefore yields the unit clause `(-z)` and an empty `and`
//! yields `(z)`.

use crate::cnf::Cnf;
use crate::counter::VarCounter;
use crate::formula::Formula;
use crate::literal::Lit;
use rustc_hash::FxHashMap;

/// Configuration for the Tseitin encoder.
#[derive(Debug, Clone, Default)]
pub struct TseitinConfig {
    /// Reuse the root literal of structurally identical subformulas that
    /// were already encoded in this session.
    pub memoize: bool,
}

/// Statistics for the Tseitin encoder.
#[derive(Debug, Clone, Default)]
pub struct TseitinStats {
    /// Top-level formulas encoded.
    pub formulas: u64,
    /// Auxiliary variables introduced.
    pub aux_vars: u64,
    /// Clauses emitted, including asserted roots and raw clauses.
    pub clauses: u64,
    /// Subformulas answered from the memo table.
    pub cache_hits: u64,
}

/// Tseitin encoder for one compilation session.
///
/// Owns the session's growing clause list. The variable counter is passed
/// in on every call so that the caller decides which ids are pre-allocated.
#[derive(Debug, Default)]
pub struct TseitinEncoder {
    config: TseitinConfig,
    stats: TseitinStats,
    cnf: Cnf,
    cache: FxHashMap<Formula, Lit>,
}

impl TseitinEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TseitinConfig::default())
    }

    /// Create with configuration.
    #[must_use]
    pub fn with_config(config: TseitinConfig) -> Self {
        Self {
            config,
            stats: TseitinStats::default(),
            cnf: Cnf::new(),
            cache: FxHashMap::default(),
        }
    }

    /// Get statistics.
    #[must_use]
    pub fn stats(&self) -> &TseitinStats {
        &self.stats
    }

    /// Clauses emitted so far.
    #[must_use]
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Finish the session and take the clause list.
    #[must_use]
    pub fn finish(self) -> Cnf {
        self.cnf
    }

    /// Append a clause that needs no encoding.
    pub fn add_clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        self.cnf.add_clause(lits);
        self.stats.clauses += 1;
    }

    /// Encode `formula` and return the literal equivalent to its root.
    pub fn encode(&mut self, formula: &Formula, counter: &mut VarCounter) -> Lit {
        self.stats.formulas += 1;
        let clauses_before = self.cnf.len();
        let root = self.encode_node(formula, counter);
        tracing::trace!(
            root = %root,
            clauses = self.cnf.len() - clauses_before,
            "encoded formula"
        );
        root
    }

    /// Encode `formula` and force it true with a unit clause on its root.
    pub fn encode_and_assert(&mut self, formula: &Formula, counter: &mut VarCounter) {
        let root = self.encode(formula, counter);
        self.add_clause([root]);
    }

    fn encode_node(&mut self, formula: &Formula, counter: &mut VarCounter) -> Lit {
        if let Formula::Literal(lit) = formula {
            return *lit;
        }

        if self.config.memoize
            && let Some(&lit) = self.cache.get(formula)
        {
            self.stats.cache_hits += 1;
            return lit;
        }

        let result = match formula {
            Formula::Literal(lit) => *lit,
            Formula::Not(inner) => {
                let arg = self.encode_node(inner, counter);
                let z = self.fresh(counter);

                self.add_clause([z.negate(), arg.negate()]);
                self.add_clause([z, arg]);
                z
            }
            Formula::And(args) => {
                let arg_lits: Vec<Lit> = args
                    .iter()
                    .map(|arg| self.encode_node(arg, counter))
                    .collect();
                let z = self.fresh(counter);

                // z => each arg
                for &arg in &arg_lits {
                    self.add_clause([z.negate(), arg]);
                }
                // all args => z
                let mut clause: Vec<Lit> = vec![z];
                clause.extend(arg_lits.iter().map(|l| l.negate()));
                self.add_clause(clause);
                z
            }
            Formula::Or(args) => {
                let arg_lits: Vec<Lit> = args
                    .iter()
                    .map(|arg| self.encode_node(arg, counter))
                    .collect();
                let z = self.fresh(counter);

                // each arg => z
                for &arg in &arg_lits {
                    self.add_clause([z, arg.negate()]);
                }
                // z => some arg
                let mut clause: Vec<Lit> = vec![z.negate()];
                clause.extend(arg_lits.iter().copied());
                self.add_clause(clause);
                z
            }
            Formula::Xor(lhs, rhs) => {
                let a = self.encode_node(lhs, counter);
                let b = self.encode_node(rhs, counter);
                let z = self.fresh(counter);

                self.add_clause([z.negate(), a, b]);
                self.add_clause([z.negate(), a.negate(), b.negate()]);
                self.add_clause([z, a.negate(), b]);
                self.add_clause([z, a, b.negate()]);
                z
            }
            Formula::Iff(lhs, rhs) => {
                let a = self.encode_node(lhs, counter);
                let b = self.encode_node(rhs, counter);
                let z = self.fresh(counter);

                self.add_clause([z.negate(), a.negate(), b]);
                self.add_clause([z.negate(), a, b.negate()]);
                self.add_clause([z, a, b]);
                self.add_clause([z, a.negate(), b.negate()]);
                z
            }
        };

        if self.config.memoize {
            self.cache.insert(formula.clone(), result);
        }
        result
    }

    fn fresh(&mut self, counter: &mut VarCounter) -> Lit {
        self.stats.aux_vars += 1;
        Lit::positive(counter.fresh())
    }
}

/// Encode a single formula into a fresh clause list.
///
/// Returns the clauses and the literal standing for the formula's root.
pub fn encode(formula: &Formula, counter: &mut VarCounter) -> (Cnf, Lit) {
    let mut encoder = TseitinEncoder::new();
    let root = encoder.encode(formula, counter);
    (encoder.finish(), root)
}

/// Encode a single formula and assert it.
pub fn encode_and_assert(formula: &Formula, counter: &mut VarCounter) -> Cnf {
    let mut encoder = TseitinEncoder::new();
    encoder.encode_and_assert(formula, counter);
    encoder.finish()
}
