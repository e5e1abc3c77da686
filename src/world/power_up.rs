//! Power-up kinds.

use serde::{Deserialize, Serialize};

/// An item lying on the grid.
///
/// Every kind except `Teleport` disappears when collected. A teleport pad is
/// a landmark: it fires for every agent that steps on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Extra action per turn for a few turns.
    SpeedBoost,
    /// One wall placement charge.
    WallBuilder,
    /// One wall-ignoring move charge.
    GhostMode,
    /// Sends the collector to a random free corner.
    Teleport,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::WallBuilder,
        PowerUpKind::GhostMode,
        PowerUpKind::Teleport,
    ];

    /// True if the item is removed from the grid on pickup.
    #[must_use]
    pub const fn is_consumed_on_pickup(self) -> bool {
        !matches!(self, PowerUpKind::Teleport)
    }

    /// Map symbol used by the text rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            PowerUpKind::SpeedBoost => 's',
            PowerUpKind::WallBuilder => 'w',
            PowerUpKind::GhostMode => 'g',
            PowerUpKind::Teleport => 't',
        }
    }
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PowerUpKind::SpeedBoost => "speed_boost",
            PowerUpKind::WallBuilder => "wall_builder",
            PowerUpKind::GhostMode => "ghost_mode",
            PowerUpKind::Teleport => "teleport",
        };
        f.write_str(name)
    }
}
