//! Strategy tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Role};

/// How an agent picks its actions. Fixed for the agent's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniform over legal moves.
    Random,
    /// Maximize Manhattan distance to the catcher (runner only).
    Greedy,
    /// Follow (catcher) or flee along (runner) true path distance.
    Astar,
    /// Depth-limited minimax, including consumable actions.
    Minimax,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Random,
        Strategy::Greedy,
        Strategy::Astar,
        Strategy::Minimax,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Astar => "astar",
            Strategy::Minimax => "minimax",
        }
    }

    /// Whether this strategy can drive `role`.
    #[must_use]
    pub const fn supports(self, role: Role) -> bool {
        !matches!((self, role), (Strategy::Greedy, Role::Catcher))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("minimax".parse::<Strategy>(), Ok(Strategy::Minimax));
        assert_eq!("AStar".parse::<Strategy>(), Ok(Strategy::Astar));
        assert_eq!(
            "dijkstra".parse::<Strategy>(),
            Err(GameError::UnknownStrategy("dijkstra".to_string()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_supports() {
        assert!(!Strategy::Greedy.supports(Role::Catcher));
        assert!(Strategy::Greedy.supports(Role::Runner));
        assert!(Strategy::Astar.supports(Role::Catcher));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Strategy::Astar).unwrap();
        assert_eq!(json, "\"astar\"");
        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Strategy::Astar);
    }
}
