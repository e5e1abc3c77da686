//! Episodes: setup, the turn loop, and metrics.

pub mod builder;
pub mod metrics;
pub mod simulator;

pub use builder::{GameBuilder, Spawn, SpawnPlan};
pub use metrics::{EpisodeMetrics, MatchSummary, TurnStats};
pub use simulator::{GameStatus, Simulator};
