//! Compilation configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::compile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Emit the per-trial, per-factor "exactly one level" clauses.
    pub exactly_one: bool,
    /// Require every combination of crossed levels to occur.
    pub full_crossing: bool,
    /// Share auxiliaries between structurally identical subformulas.
    pub memoize_subformulas: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            exactly_one: true,
            full_crossing: true,
            memoize_subformulas: false,
        }
    }
}

impl CompileConfig {
    /// Load from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
