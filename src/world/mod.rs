//! The grid world.
//!
//! - `grid`: walls, power-ups, agents, and the shared movement predicate
//! - `power_up`: item kinds and their pickup semantics
//! - `map`: the built-in arena and room helpers
//!
//! The world knows nothing about strategies or turns; it only answers
//! "is this legal" and applies committed changes.

pub mod grid;
pub mod map;
pub mod power_up;

pub use grid::{GridWorld, LegalMoves};
pub use map::{open_room, ARENA, ARENA_CATCHER_ROWS, ARENA_RUNNER_ROWS};
pub use power_up::PowerUpKind;
