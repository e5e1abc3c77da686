//! Episode configuration.
//!
//! Everything that shapes one episode's rules lives here:
//! - `CaptureRule`: what counts as a catch
//! - `GameConfig`: turn budget, item durations, seed, and search settings
//!
//! Strategies are chosen per agent, not here.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::error::{GameError, Result};
use crate::search::SearchConfig;

/// When the catcher is considered to have caught the runner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureRule {
    /// Both agents on the same cell.
    SameCell,
    /// Same cell, or touching diagonally.
    #[default]
    SameCellOrDiagonal,
}

impl CaptureRule {
    /// Check whether agents at `catcher` and `runner` constitute a capture.
    #[must_use]
    pub fn is_capture(self, catcher: Cell, runner: Cell) -> bool {
        match self {
            CaptureRule::SameCell => catcher == runner,
            CaptureRule::SameCellOrDiagonal => {
                catcher == runner || catcher.is_diagonal_to(runner)
            }
        }
    }
}

/// Complete episode configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Full turns (catcher + runner) before the runner wins.
    pub max_turns: u32,

    /// Capture predicate.
    pub capture_rule: CaptureRule,

    /// Turns a speed boost stays active after pickup.
    pub speed_boost_turns: u32,

    /// Episode seed. Setup and play derive separate streams from it.
    pub seed: u64,

    /// Shared search engine settings.
    pub search: SearchConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: 50,
            capture_rule: CaptureRule::default(),
            speed_boost_turns: 3,
            seed: 42,
            search: SearchConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the turn budget.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the capture rule.
    #[must_use]
    pub fn with_capture_rule(mut self, rule: CaptureRule) -> Self {
        self.capture_rule = rule;
        self
    }

    /// Set the speed boost duration.
    #[must_use]
    pub fn with_speed_boost_turns(mut self, turns: u32) -> Self {
        self.speed_boost_turns = turns;
        self
    }

    /// Set the episode seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the search configuration.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Reject configurations that cannot produce a meaningful episode.
    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(GameError::InvalidConfig("max_turns must be at least 1".into()));
        }
        if self.search.max_depth == 0 {
            return Err(GameError::InvalidConfig(
                "search.max_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
