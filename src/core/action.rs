//! Agent actions.
//!
//! An action is one of four shapes:
//! - `Move(dir)`: ordinary step, must respect walls
//! - `GhostMove(dir)`: step that ignores walls, costs a ghost-mode charge
//! - `PlaceWall(cell)`: agent stays put, costs a wall-builder charge
//! - `NoAction`: pass (no legal or useful action)
//!
//! Strategies always return one of these; the simulator decides whether it
//! can actually be applied.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Direction};
use super::role::Role;

/// A single decision taken by an agent.
///
/// ## Example
///
/// ```
/// use catchme::core::{Action, Cell, Direction};
///
/// let step = Action::Move(Direction::Up);
/// assert_eq!(step.direction(), Some(Direction::Up));
///
/// let wall = Action::PlaceWall(Cell::new(2, 3));
/// assert_eq!(wall.direction(), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Move(Direction),
    GhostMove(Direction),
    PlaceWall(Cell),
    #[default]
    NoAction,
}

impl Action {
    /// Movement direction, if this action moves the agent.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Move(dir) | Action::GhostMove(dir) => Some(dir),
            Action::PlaceWall(_) | Action::NoAction => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move(dir) => write!(f, "move {dir}"),
            Action::GhostMove(dir) => write!(f, "ghost {dir}"),
            Action::PlaceWall(cell) => write!(f, "wall at {cell}"),
            Action::NoAction => f.write_str("pass"),
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay, debugging, and inspection by external tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that acted.
    pub role: Role,

    /// The action the agent chose.
    pub action: Action,

    /// Turn number (0-based) when the action was taken.
    pub turn: u32,

    /// Episode-wide sequence number (for ordering).
    pub sequence: u32,

    /// Whether the world accepted the action.
    pub applied: bool,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(role: Role, action: Action, turn: u32, sequence: u32, applied: bool) -> Self {
        Self {
            role,
            action,
            turn,
            sequence,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_accessor() {
        assert_eq!(Action::Move(Direction::Left).direction(), Some(Direction::Left));
        assert_eq!(Action::GhostMove(Direction::Down).direction(), Some(Direction::Down));
        assert_eq!(Action::PlaceWall(Cell::new(1, 1)).direction(), None);
        assert_eq!(Action::NoAction.direction(), None);
    }

    #[test]
    fn test_default_is_no_action() {
        assert_eq!(Action::default(), Action::NoAction);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Move(Direction::Right).to_string(), "move right");
        assert_eq!(Action::PlaceWall(Cell::new(2, 3)).to_string(), "wall at (2, 3)");
        assert_eq!(Action::NoAction.to_string(), "pass");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Role::Runner, Action::GhostMove(Direction::Up), 4, 1, true);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
