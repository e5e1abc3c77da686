//! # catchme
//!
//! A pursuit-evasion ("tag") game on a grid: a catcher hunts a runner for a
//! bounded number of turns, with walls, power-ups and adversarial search.
//!
//! ## Design Principles
//!
//! 1. **One legality predicate**: `GridWorld::is_legal_move` drives the
//!    simulator, the pathfinder and minimax move generation alike.
//!
//! 2. **Search never touches the live world**: "what if" probes run on
//!    cheap snapshots (`im-rs` persistent collections), so between
//!    simulator calls the world holds committed moves only.
//!
//! 3. **Deterministic episodes**: one seed fixes both the layout and the
//!    play; setup and play draw from separate RNG streams.
//!
//! ## Modules
//!
//! - `core`: cells, roles, actions, RNG, errors, configuration
//! - `world`: the grid, power-ups, built-in maps
//! - `search`: A*, static evaluation, minimax
//! - `agents`: strategies, inventory, speed boost state
//! - `sim`: episode setup, the turn loop, metrics

pub mod agents;
pub mod core;
pub mod search;
pub mod sim;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CaptureRule, Cell, Direction, GameConfig, GameError, GameRng, Result,
    Role, RoleMap,
};

pub use crate::world::{GridWorld, PowerUpKind, ARENA};

pub use crate::search::{Decision, Minimax, Pathfinder, SearchConfig, SearchContext, SearchStats};

pub use crate::agents::{Agent, Inventory, Strategy};

pub use crate::sim::{
    EpisodeMetrics, GameBuilder, GameStatus, MatchSummary, Simulator, Spawn, SpawnPlan,
};
