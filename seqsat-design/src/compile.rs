//! Compilation of a block into CNF.
//!
//! One session draws every variable from a single [`VarCounter`]: the trial
//! grid first, then Tseitin auxiliaries in the order formulas are encoded.
//!
//! The clause list is built in this order:
//! 1. per factor and trial, exactly one level where the factor applies and
//!    every level false where it does not
//! 2. each derived level tied to its derivation in every applying trial
//! 3. every combination of crossed levels occurs in some trial
//! 4. the block's sequencing constraints

use crate::block::Block;
use crate::config::CompileConfig;
use crate::decode::{TrialSequence, decode};
use crate::derivation::{Derivation, derivation_table};
use crate::desugar::desugar;
use crate::error::Result;
use crate::formulas::{derived_level_definition, level_literal};
use crate::window::cartesian_product;
use seqsat_logic::{
    Cnf, Formula, SolverOutcome, TseitinConfig, TseitinEncoder, TseitinStats, Var, VarCounter,
};
use std::io::Write;

/// Statistics for one compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileStats {
    /// Clauses from the exactly-one and not-applicable rules.
    pub layout_clauses: u64,
    /// Definitions tying derived level variables to their derivations.
    pub derived_formulas: u64,
    /// Crossing formulas, one per combination of crossed levels.
    pub crossing_formulas: u64,
    /// Formulas produced by desugaring constraints.
    pub constraint_formulas: u64,
    /// Tseitin encoder statistics.
    pub tseitin: TseitinStats,
}

/// A block compiled to CNF.
#[derive(Debug)]
pub struct CompiledBlock<'a> {
    block: &'a Block,
    cnf: Cnf,
    derivations: Vec<Derivation>,
    num_vars: Var,
    stats: CompileStats,
}

impl<'a> CompiledBlock<'a> {
    /// Block this CNF was compiled from.
    #[must_use]
    pub fn block(&self) -> &'a Block {
        self.block
    }

    /// The clause list.
    #[must_use]
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Take the clause list.
    #[must_use]
    pub fn into_cnf(self) -> Cnf {
        self.cnf
    }

    /// Derivations, ascending by level data index.
    #[must_use]
    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }

    /// Trial variables are `1..=grid_variables()`.
    #[must_use]
    pub fn grid_variables(&self) -> Var {
        self.block.grid_variables()
    }

    /// Highest variable id in use, auxiliaries included.
    #[must_use]
    pub fn num_vars(&self) -> Var {
        self.num_vars
    }

    /// Statistics.
    #[must_use]
    pub fn stats(&self) -> &CompileStats {
        &self.stats
    }

    /// Write the CNF in DIMACS format.
    pub fn write_dimacs<W: Write>(&self, writer: W) -> Result<()> {
        self.cnf.write_dimacs(self.num_vars, writer)?;
        Ok(())
    }

    /// The CNF as a DIMACS string.
    #[must_use]
    pub fn to_dimacs_string(&self) -> String {
        self.cnf.to_dimacs_string(self.num_vars)
    }

    /// Decode a solver answer. `None` when the solver found no model.
    pub fn decode(&self, outcome: &SolverOutcome) -> Result<Option<TrialSequence>> {
        match outcome {
            SolverOutcome::Unsatisfiable => Ok(None),
            SolverOutcome::Satisfiable(solution) => Ok(Some(decode(self.block, solution)?)),
        }
    }
}

/// Compile `block` to CNF.
pub fn compile<'a>(block: &'a Block, config: &CompileConfig) -> Result<CompiledBlock<'a>> {
    let table = derivation_table(block)?;

    let mut counter = VarCounter::new();
    let grid = counter.fresh_block(block.grid_variables());
    tracing::debug!(first = *grid.start(), last = *grid.end(), "allocated trial variables");

    let mut encoder = TseitinEncoder::with_config(TseitinConfig {
        memoize: config.memoize_subformulas,
    });
    let mut stats = CompileStats::default();

    stats.layout_clauses = encode_layout(block, config, &mut encoder);

    for derivation in table.iter() {
        let Some((factor, _)) = block.level_at(derivation.level()) else {
            continue;
        };
        for trial in block.applying_trials(factor) {
            if let Some(definition) = derived_level_definition(block, derivation, trial) {
                encoder.encode_and_assert(&definition, &mut counter);
                stats.derived_formulas += 1;
            }
        }
    }
    tracing::debug!(
        formulas = stats.derived_formulas,
        clauses = encoder.cnf().len(),
        "encoded derived levels"
    );

    if config.full_crossing {
        for formula in crossing_formulas(block) {
            encoder.encode_and_assert(&formula, &mut counter);
            stats.crossing_formulas += 1;
        }
        tracing::debug!(
            formulas = stats.crossing_formulas,
            clauses = encoder.cnf().len(),
            "encoded crossing"
        );
    }

    for constraint in block.constraints() {
        for formula in desugar(block, constraint)? {
            encoder.encode_and_assert(&formula, &mut counter);
            stats.constraint_formulas += 1;
        }
    }

    stats.tseitin = encoder.stats().clone();
    let cnf = encoder.finish();
    let num_vars = counter.last();

    tracing::info!(
        trials = block.trials(),
        grid_variables = block.grid_variables(),
        num_vars,
        clauses = cnf.len(),
        "compiled block"
    );

    Ok(CompiledBlock {
        block,
        cnf,
        derivations: table.into_vec(),
        num_vars,
        stats,
    })
}

/// Exactly-one clauses where a factor applies, negative units where not.
fn encode_layout(block: &Block, config: &CompileConfig, encoder: &mut TseitinEncoder) -> u64 {
    let mut clauses = 0;
    for (f, factor) in block.design().iter().enumerate() {
        let levels = factor.num_levels();
        for trial in 0..block.trials() {
            let lit = |level| level_literal(block, f, level, trial);

            if !block.applies(f, trial) {
                for level in 0..levels {
                    encoder.add_clause([!lit(level)]);
                    clauses += 1;
                }
                continue;
            }
            if !config.exactly_one {
                continue;
            }

            encoder.add_clause((0..levels).map(lit));
            clauses += 1;
            for a in 0..levels {
                for b in a + 1..levels {
                    encoder.add_clause([!lit(a), !lit(b)]);
                    clauses += 1;
                }
            }
        }
    }
    clauses
}

/// One formula per combination of crossed levels: it holds in some trial
/// where every crossed factor applies.
fn crossing_formulas(block: &Block) -> Vec<Formula> {
    let crossing = block.crossing();
    let trials: Vec<usize> = (0..block.trials())
        .filter(|&t| crossing.iter().all(|&f| block.applies(f, t)))
        .collect();
    let domains: Vec<Vec<usize>> = crossing
        .iter()
        .map(|&f| (0..block.factor(f).num_levels()).map(|l| block.data_index(f, l)).collect())
        .collect();

    cartesian_product(&domains)
        .into_iter()
        .map(|combination| {
            Formula::or(trials.iter().map(|&t| {
                Formula::and(
                    combination
                        .iter()
                        .map(|&index| Formula::var(block.variable(t, index))),
                )
            }))
        })
        .collect()
}
