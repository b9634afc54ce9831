//! Fresh variable allocation for one compilation session.

use crate::literal::Var;
use std::ops::RangeInclusive;

/// Monotonic source of variable ids.
///
/// Every pre-allocated variable and every Tseitin auxiliary must come from
/// the same counter, so ids never collide. The counter cannot be cloned or
/// rewound; each compilation owns its own instance.
#[derive(Debug, Default)]
pub struct VarCounter {
    last: Var,
}

impl VarCounter {
    /// Counter with nothing allocated; the first fresh id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter whose first fresh id is `last + 1`.
    #[must_use]
    pub fn starting_after(last: Var) -> Self {
        Self { last }
    }

    /// Allocate one fresh variable.
    pub fn fresh(&mut self) -> Var {
        self.last += 1;
        self.last
    }

    /// Allocate `count` contiguous variables.
    pub fn fresh_block(&mut self, count: u32) -> RangeInclusive<Var> {
        let first = self.last + 1;
        self.last += count;
        first..=self.last
    }

    /// Highest id handed out so far (0 if none).
    #[must_use]
    pub fn last(&self) -> Var {
        self.last
    }
}
