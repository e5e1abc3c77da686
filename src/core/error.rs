//! Setup-time errors.
//!
//! Only configuration problems are errors. In-game conditions (no path,
//! no legal move, blocked teleport) are ordinary outcomes and are reported
//! through return values instead.

use thiserror::Error;

use super::cell::Cell;
use super::role::Role;

/// Errors raised while building a world or an episode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("map has no rows or no columns")]
    EmptyMap,
    #[error("map row {row} has {found} columns, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("map of {rows}x{cols} cells is too large to address")]
    MapTooLarge { rows: usize, cols: usize },
    #[error("cannot place {role} at {cell}: {reason}")]
    InvalidPlacement {
        role: Role,
        cell: Cell,
        reason: &'static str,
    },
    #[error("need {requested} free cells for {purpose}, only {available} available")]
    ExhaustedSpawnCells {
        purpose: &'static str,
        requested: usize,
        available: usize,
    },
    #[error("strategy `{strategy}` cannot drive the {role}")]
    UnsupportedStrategy { role: Role, strategy: String },
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),
    #[error("no {0} has been placed in the world")]
    MissingAgent(Role),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::InvalidPlacement {
            role: Role::Runner,
            cell: Cell::new(0, 0),
            reason: "cell is a wall",
        };
        assert_eq!(err.to_string(), "cannot place runner at (0, 0): cell is a wall");

        let err = GameError::RaggedMap {
            row: 2,
            expected: 5,
            found: 4,
        };
        assert_eq!(err.to_string(), "map row 2 has 4 columns, expected 5");

        assert_eq!(
            GameError::MissingAgent(Role::Catcher).to_string(),
            "no catcher has been placed in the world"
        );
    }
}
