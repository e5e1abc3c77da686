//! Agents and their strategies.
//!
//! An `Agent` owns its per-game state (speed boost counter, stored charges)
//! and turns a world snapshot into an `Action`. The search engines it may
//! consult are not owned; they arrive through a `SearchContext`.

pub mod agent;
pub mod inventory;
pub mod strategy;

pub use agent::Agent;
pub use inventory::Inventory;
pub use strategy::Strategy;
