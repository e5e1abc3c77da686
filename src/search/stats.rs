//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one root decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Root candidates considered (moves, ghost moves, walls).
    pub candidates: u32,

    /// Positions statically evaluated at the leaves.
    pub leaves_evaluated: u64,

    /// Interior nodes expanded.
    pub nodes_expanded: u64,

    /// Wall and ghost probes that ran a path query.
    pub probes: u32,

    /// Total time spent deciding (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total nodes visited (interior plus leaves).
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes_expanded + self.leaves_evaluated
    }

    /// Nodes visited per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes() as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
