//! Factors, levels and derived-level windows.
//!
//! A derived level is true in a trial when its predicate accepts the level
//! names of its argument factors. The window says which trials those
//! arguments are read from:
//!
//! - [`WindowKind::WithinTrial`]: every argument from the current trial.
//! - [`WindowKind::Transition`]: argument 0 from the previous trial,
//!   argument 1 from the current one.
//! - [`WindowKind::Window`]: argument `i` from trial `t - (width - 1) + i`;
//!   the level only exists every `stride` trials.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shape of the trial window a derived level reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    /// Width 1, stride 1.
    WithinTrial,
    /// Width 2, stride 1.
    Transition,
    /// General window.
    Window {
        /// Number of consecutive trials read.
        width: usize,
        /// Distance between trials where the level exists.
        stride: usize,
    },
}

impl WindowKind {
    /// Number of consecutive trials the window spans.
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            WindowKind::WithinTrial => 1,
            WindowKind::Transition => 2,
            WindowKind::Window { width, .. } => width,
        }
    }

    /// Distance between consecutive trials where the window is defined.
    #[must_use]
    pub fn stride(self) -> usize {
        match self {
            WindowKind::WithinTrial | WindowKind::Transition => 1,
            WindowKind::Window { stride, .. } => stride,
        }
    }

    /// First trial at which a window of this width can end.
    #[must_use]
    pub fn first_trial(self) -> usize {
        self.width().saturating_sub(1)
    }
}

type PredicateFn = dyn Fn(&[&str]) -> bool + Send + Sync;

/// Fixed-arity predicate over level names.
#[derive(Clone)]
pub struct Predicate {
    arity: usize,
    func: Arc<PredicateFn>,
}

impl Predicate {
    /// Wrap a function taking exactly `arity` level names.
    pub fn new(arity: usize, func: impl Fn(&[&str]) -> bool + Send + Sync + 'static) -> Self {
        Self {
            arity,
            func: Arc::new(func),
        }
    }

    /// Both arguments name the same level.
    #[must_use]
    pub fn equal() -> Self {
        Self::new(2, |values| values[0] == values[1])
    }

    /// The two arguments name different levels.
    #[must_use]
    pub fn not_equal() -> Self {
        Self::new(2, |values| values[0] != values[1])
    }

    /// Declared number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Apply to a tuple of level names. Callers check the arity first.
    #[must_use]
    pub fn test(&self, values: &[&str]) -> bool {
        (self.func)(values)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A level whose truth is computed from other factors.
#[derive(Debug, Clone)]
pub struct DerivedLevel {
    name: String,
    window: WindowKind,
    predicate: Predicate,
    arguments: Vec<String>,
}

impl DerivedLevel {
    /// Derived level with an explicit window.
    pub fn new(
        name: impl Into<String>,
        window: WindowKind,
        predicate: Predicate,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            window,
            predicate,
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Level computed from arguments in the same trial.
    pub fn within_trial(
        name: impl Into<String>,
        predicate: Predicate,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(name, WindowKind::WithinTrial, predicate, arguments)
    }

    /// Level computed from the previous and the current trial.
    pub fn transition(
        name: impl Into<String>,
        predicate: Predicate,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(name, WindowKind::Transition, predicate, arguments)
    }

    /// Level computed from `width` consecutive trials, every `stride` trials.
    pub fn window(
        name: impl Into<String>,
        predicate: Predicate,
        arguments: impl IntoIterator<Item = impl Into<String>>,
        width: usize,
        stride: usize,
    ) -> Self {
        Self::new(name, WindowKind::Window { width, stride }, predicate, arguments)
    }

    /// Level name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Window shape.
    #[must_use]
    pub fn window_kind(&self) -> WindowKind {
        self.window
    }

    /// Predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Argument factor names, in predicate argument order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

/// A level of a factor.
#[derive(Debug, Clone)]
pub enum Level {
    /// Chosen directly.
    Simple(String),
    /// Computed from other factors.
    Derived(DerivedLevel),
}

impl Level {
    /// Level name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Level::Simple(name) => name,
            Level::Derived(derived) => derived.name(),
        }
    }

    /// Derivation details, if derived.
    #[must_use]
    pub fn as_derived(&self) -> Option<&DerivedLevel> {
        match self {
            Level::Simple(_) => None,
            Level::Derived(derived) => Some(derived),
        }
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Level::Simple(name.to_string())
    }
}

impl From<String> for Level {
    fn from(name: String) -> Self {
        Level::Simple(name)
    }
}

impl From<DerivedLevel> for Level {
    fn from(level: DerivedLevel) -> Self {
        Level::Derived(level)
    }
}

/// A named, ordered set of levels.
#[derive(Debug, Clone)]
pub struct Factor {
    name: String,
    levels: Vec<Level>,
}

impl Factor {
    /// Create a factor.
    pub fn new(name: impl Into<String>, levels: impl IntoIterator<Item = impl Into<Level>>) -> Self {
        Self {
            name: name.into(),
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Factor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Levels in declaration order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels.
    #[must_use]
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Position of the level called `name`.
    #[must_use]
    pub fn level_index(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|level| level.name() == name)
    }

    /// Whether the levels are derived.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.levels.first().is_some_and(|level| level.as_derived().is_some())
    }

    /// Window shared by the derived levels; `None` for simple factors.
    #[must_use]
    pub fn window_kind(&self) -> Option<WindowKind> {
        self.levels
            .first()
            .and_then(Level::as_derived)
            .map(DerivedLevel::window_kind)
    }

    /// Derived levels with their positions.
    pub fn derived_levels(&self) -> impl Iterator<Item = (usize, &DerivedLevel)> {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(index, level)| level.as_derived().map(|derived| (index, derived)))
    }
}
