//! Stored power-up charges.

use serde::{Deserialize, Serialize};

use crate::world::PowerUpKind;

/// Charges an agent carries. Only wall builders and ghost modes are stored;
/// speed boosts and teleports take effect on pickup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    pub wall_builder: u32,
    pub ghost_mode: u32,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charges of `kind` (always 0 for non-stored kinds).
    #[must_use]
    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::WallBuilder => self.wall_builder,
            PowerUpKind::GhostMode => self.ghost_mode,
            PowerUpKind::SpeedBoost | PowerUpKind::Teleport => 0,
        }
    }

    #[must_use]
    pub fn has(&self, kind: PowerUpKind) -> bool {
        self.count(kind) > 0
    }

    /// Add one charge. Returns false for kinds that are not stored.
    pub fn add(&mut self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::WallBuilder => self.wall_builder += 1,
            PowerUpKind::GhostMode => self.ghost_mode += 1,
            PowerUpKind::SpeedBoost | PowerUpKind::Teleport => return false,
        }
        true
    }

    /// Spend one charge. Returns false if there was none to spend.
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        let slot = match kind {
            PowerUpKind::WallBuilder => &mut self.wall_builder,
            PowerUpKind::GhostMode => &mut self.ghost_mode,
            PowerUpKind::SpeedBoost | PowerUpKind::Teleport => return false,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}
