//! DIMACS wire format.
//!
//! Writing: `p cnf <num_vars> <num_clauses>` followed by one zero-terminated
//! clause per line. Reading: solver answers in the SAT-competition format
//! (`s SATISFIABLE` / `s UNSATISFIABLE` plus `v` lines), MiniSat's result
//! file format (`SAT` / `UNSAT` plus a literal line), or a bare literal list.

use crate::cnf::Cnf;
use crate::error::{LogicError, LogicResult};
use crate::literal::Var;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

impl Cnf {
    /// Write the clause list in DIMACS CNF format.
    ///
    /// `num_vars` is declared explicitly because trailing variables may be
    /// unconstrained and so never appear in a clause.
    pub fn write_dimacs<W: Write>(&self, num_vars: Var, mut writer: W) -> LogicResult<()> {
        writeln!(writer, "p cnf {} {}", num_vars, self.len())?;

        for clause in self {
            for lit in clause {
                write!(writer, "{} ", lit)?;
            }
            writeln!(writer, "0")?;
        }

        Ok(())
    }

    /// Render the DIMACS text into a string.
    #[must_use]
    pub fn to_dimacs_string(&self, num_vars: Var) -> String {
        let mut out = format!("p cnf {} {}\n", num_vars, self.len());
        for clause in self {
            for lit in clause {
                out.push_str(&lit.to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }
}

/// What an external SAT solver reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverOutcome {
    /// A total assignment, one signed entry per variable, ascending by id.
    Satisfiable(Vec<i32>),
    /// No assignment exists.
    Unsatisfiable,
}

impl SolverOutcome {
    /// Parse solver output.
    pub fn parse<R: BufRead>(reader: R) -> LogicResult<Self> {
        let mut satisfiable = None;
        let mut assignment = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }

            let body = match trimmed.split_once(char::is_whitespace) {
                Some(("s", status)) => {
                    satisfiable = Some(parse_status(status.trim(), line_no)?);
                    continue;
                }
                Some(("v", literals)) => literals,
                _ => match trimmed {
                    "SAT" | "SATISFIABLE" => {
                        satisfiable = Some(true);
                        continue;
                    }
                    "UNSAT" | "UNSATISFIABLE" => {
                        satisfiable = Some(false);
                        continue;
                    }
                    "v" => continue,
                    other => other,
                },
            };

            for token in body.split_whitespace() {
                let value: i32 = token.parse().map_err(|_| LogicError::Dimacs {
                    line: line_no,
                    message: format!("invalid literal '{}'", token),
                })?;
                if value != 0 {
                    assignment.push(value);
                }
            }
        }

        match satisfiable {
            Some(false) => Ok(Self::Unsatisfiable),
            Some(true) | None if !assignment.is_empty() => {
                assignment.sort_by_key(|lit| lit.unsigned_abs());
                Ok(Self::Satisfiable(assignment))
            }
            Some(true) => Ok(Self::Satisfiable(assignment)),
            None => Err(LogicError::Dimacs {
                line: 0,
                message: "no solver status or assignment found".to_string(),
            }),
        }
    }

    /// Write in SAT-competition format.
    pub fn write<W: Write>(&self, mut writer: W) -> LogicResult<()> {
        match self {
            Self::Satisfiable(assignment) => {
                writeln!(writer, "s SATISFIABLE")?;
                write!(writer, "v ")?;
                for lit in assignment {
                    write!(writer, "{} ", lit)?;
                }
                writeln!(writer, "0")?;
            }
            Self::Unsatisfiable => writeln!(writer, "s UNSATISFIABLE")?,
        }
        Ok(())
    }

    /// Check if satisfiable.
    #[must_use]
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }
}

fn parse_status(status: &str, line: usize) -> LogicResult<bool> {
    match status {
        "SATISFIABLE" => Ok(true),
        "UNSATISFIABLE" => Ok(false),
        other => Err(LogicError::Dimacs {
            line,
            message: format!("unsupported solver status '{}'", other),
        }),
    }
}
