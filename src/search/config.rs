//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Minimax depth, heuristic weights, and consumable gating thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Look-ahead depth in plies, counting the root move.
    /// The tree is expanded exhaustively, so cost grows as 4^depth.
    pub max_depth: u32,

    /// Weight of the legal-move difference (runner minus catcher).
    pub mobility_weight: f64,

    /// Penalty applied when the runner has at most one way out.
    pub trap_penalty: f64,

    /// Absolute cap on the summed power-up bonus.
    /// Keeps power-ups a tie-breaker rather than a goal.
    pub powerup_cap: f64,

    /// Minimum distance gain (exclusive) before a ghost charge is spent.
    pub ghost_gain_threshold: f64,

    /// Minimum distance gain (exclusive) before the runner spends a wall.
    pub wall_gain_threshold: f64,

    /// Catcher only walls when the resulting distance is at most this.
    pub trap_distance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            mobility_weight: 0.5,
            trap_penalty: 3.0,
            powerup_cap: 0.5,
            ghost_gain_threshold: 2.0,
            wall_gain_threshold: 2.0,
            trap_distance: 5.0,
        }
    }
}

impl SearchConfig {
    /// Set the look-ahead depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the mobility weight.
    #[must_use]
    pub fn with_mobility_weight(mut self, weight: f64) -> Self {
        self.mobility_weight = weight;
        self
    }

    /// Set the catcher's wall trap distance.
    #[must_use]
    pub fn with_trap_distance(mut self, distance: f64) -> Self {
        self.trap_distance = distance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.mobility_weight, 0.5);
        assert_eq!(config.trap_penalty, 3.0);
        assert_eq!(config.powerup_cap, 0.5);
        assert_eq!(config.trap_distance, 5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_max_depth(6)
            .with_mobility_weight(1.0)
            .with_trap_distance(3.0);

        assert_eq!(config.max_depth, 6);
        assert_eq!(config.mobility_weight, 1.0);
        assert_eq!(config.trap_distance, 3.0);
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_max_depth(2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
