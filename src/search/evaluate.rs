//! Static position evaluation.
//!
//! Score is from the runner's point of view: the runner maximizes it, the
//! catcher minimizes it.
//!
//! ```text
//! score = distance + mobility + power-up bonus
//! ```
//!
//! - **distance**: true path distance between the agents (+∞ if sealed off)
//! - **mobility**: weighted legal-move difference, with a penalty when the
//!   runner is nearly boxed in
//! - **power-up bonus**: small nudges toward items the runner can reach
//!   first, capped so it only ever breaks ties

use crate::core::Cell;
use crate::world::{GridWorld, PowerUpKind};

use super::astar::Pathfinder;
use super::config::SearchConfig;

/// Evaluates positions for the minimax engine.
#[derive(Clone, Debug)]
pub struct Heuristic {
    pathfinder: Pathfinder,
    config: SearchConfig,
}

impl Heuristic {
    pub fn new(pathfinder: Pathfinder, config: SearchConfig) -> Self {
        Self { pathfinder, config }
    }

    /// Full evaluation of the position.
    #[must_use]
    pub fn evaluate(&self, world: &GridWorld, catcher: Cell, runner: Cell) -> f64 {
        let distance = self.pathfinder.distance_or_infinity(world, catcher, runner);
        distance
            + self.mobility_score(world, catcher, runner)
            + self.powerup_bonus(world, catcher, runner, distance)
    }

    /// Mobility term.
    #[must_use]
    pub fn mobility_score(&self, world: &GridWorld, catcher: Cell, runner: Cell) -> f64 {
        let runner_moves = world.mobility(runner);
        let catcher_moves = world.mobility(catcher);

        let mut score = (runner_moves as f64 - catcher_moves as f64) * self.config.mobility_weight;
        if runner_moves <= 1 {
            score -= self.config.trap_penalty;
        }
        score
    }

    /// Power-up term, clamped to `±powerup_cap`.
    ///
    /// `distance` is the already computed catcher-runner distance.
    #[must_use]
    pub fn powerup_bonus(
        &self,
        world: &GridWorld,
        catcher: Cell,
        runner: Cell,
        distance: f64,
    ) -> f64 {
        let mut bonus: f64 = 0.0;

        for (cell, kind) in world.power_ups() {
            let to_runner = self.pathfinder.distance_or_infinity(world, runner, cell);
            let to_catcher = self.pathfinder.distance_or_infinity(world, catcher, cell);
            let runner_first = to_runner < to_catcher && to_runner <= 2.0;

            bonus += match kind {
                PowerUpKind::SpeedBoost => {
                    let mut b: f64 = 0.0;
                    if to_runner <= 2.0 {
                        b += (3.0 - to_runner) * 0.05;
                    }
                    if to_catcher <= 2.0 {
                        b -= (3.0 - to_catcher) * 0.05;
                    }
                    b
                }
                PowerUpKind::WallBuilder if runner_first => 0.1,
                PowerUpKind::WallBuilder if to_catcher <= 2.0 => -0.05,
                PowerUpKind::GhostMode if runner_first => 0.08,
                PowerUpKind::GhostMode if to_catcher <= 2.0 => -0.1,
                PowerUpKind::Teleport if distance <= 3.0 && to_runner <= 1.0 => 0.15,
                PowerUpKind::Teleport if runner_first => 0.08,
                PowerUpKind::Teleport if to_catcher <= 1.0 => -0.08,
                _ => 0.0,
            };
        }

        let cap = self.config.powerup_cap;
        bonus.clamp(-cap, cap)
    }
}
