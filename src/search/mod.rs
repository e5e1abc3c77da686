//! Search: pathfinding, evaluation, and minimax.
//!
//! ## Components
//!
//! - `Pathfinder`: exact A* distances and next steps
//! - `Heuristic`: static evaluation from the runner's point of view
//! - `Minimax`: depth-limited adversarial search with consumable candidates
//! - `SearchContext`: the collaborators agents are handed each decision
//!
//! Every query takes the world by shared reference. Probes that need a
//! changed world work on a cloned snapshot.

pub mod astar;
pub mod config;
pub mod evaluate;
pub mod minimax;
pub mod stats;

pub use astar::Pathfinder;
pub use config::SearchConfig;
pub use evaluate::Heuristic;
pub use minimax::{Decision, Minimax};
pub use stats::SearchStats;

/// The search collaborators for one episode.
///
/// Built once by the simulator and passed to each agent when it decides.
#[derive(Clone, Debug)]
pub struct SearchContext {
    pathfinder: Pathfinder,
    minimax: Minimax,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> Self {
        let pathfinder = Pathfinder::new();
        Self {
            pathfinder,
            minimax: Minimax::new(pathfinder, config),
        }
    }

    #[must_use]
    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    #[must_use]
    pub fn minimax(&self) -> &Minimax {
        &self.minimax
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
