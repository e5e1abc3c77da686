//! Core game types: cells, roles, actions, RNG, configuration, errors.
//!
//! These are the shared vocabulary of the world, the search engine, and the
//! simulator. Nothing in here knows about walls or strategies.

pub mod action;
pub mod cell;
pub mod config;
pub mod error;
pub mod rng;
pub mod role;

pub use action::{Action, ActionRecord};
pub use cell::{Cell, Direction};
pub use config::{CaptureRule, GameConfig};
pub use error::{GameError, Result};
pub use rng::GameRng;
pub use role::{Role, RoleMap};
