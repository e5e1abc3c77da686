//! Depth-limited minimax over agent positions.
//!
//! The runner maximizes the heuristic score, the catcher minimizes it. The
//! tree is expanded exhaustively (no pruning, no transposition table), so
//! cost is roughly `4^depth` leaf evaluations, each of which runs A*.
//!
//! ## Root candidates
//!
//! At the root the mover also considers its consumables:
//! - **ghost moves** through interior walls, only when they improve the
//!   true distance by more than `ghost_gain_threshold`
//! - **wall placements** on adjacent free cells, only when they push the
//!   catcher back by more than `wall_gain_threshold` (runner) or leave the
//!   runner within `trap_distance` (catcher)
//!
//! Candidates are generated moves first, then ghost moves, then walls, each
//! in `Direction::ALL` order, and the first strictly best one wins.
//!
//! ## Probes
//!
//! "What if" questions never touch the live world. A wall probe is a cheap
//! snapshot (`GridWorld::with_temporary_wall`), and a wall candidate is
//! scored on that snapshot.

use std::time::Instant;

use tracing::trace;

use crate::agents::Inventory;
use crate::core::{Action, Cell, Direction, Role};
use crate::world::GridWorld;

use super::astar::Pathfinder;
use super::config::SearchConfig;
use super::evaluate::Heuristic;
use super::stats::SearchStats;

/// Result of a root decision.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// The chosen action (`NoAction` if nothing was worth doing).
    pub action: Action,

    /// Minimax value of the chosen action.
    pub score: Option<f64>,

    /// Work done to reach the decision.
    pub stats: SearchStats,
}

/// A root option: the action and the position (and world) it leads to.
struct Candidate {
    action: Action,
    catcher: Cell,
    runner: Cell,
    probe: Option<GridWorld>,
}

/// Minimax search engine.
///
/// Holds no per-game state, so one engine serves both agents for a whole
/// episode.
#[derive(Clone, Debug)]
pub struct Minimax {
    pathfinder: Pathfinder,
    heuristic: Heuristic,
    config: SearchConfig,
}

impl Minimax {
    /// Create an engine with the given settings.
    pub fn new(pathfinder: Pathfinder, config: SearchConfig) -> Self {
        Self {
            pathfinder,
            heuristic: Heuristic::new(pathfinder, config.clone()),
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Static evaluation (runner's point of view).
    #[must_use]
    pub fn evaluate(&self, world: &GridWorld, catcher: Cell, runner: Cell) -> f64 {
        self.heuristic.evaluate(world, catcher, runner)
    }

    /// Minimax value of a position with `depth` plies left.
    ///
    /// `maximizing` is true when the runner is to move.
    #[must_use]
    pub fn minimax(
        &self,
        world: &GridWorld,
        catcher: Cell,
        runner: Cell,
        depth: u32,
        maximizing: bool,
    ) -> f64 {
        let mut stats = SearchStats::new();
        self.search(world, catcher, runner, depth, maximizing, &mut stats)
    }

    fn search(
        &self,
        world: &GridWorld,
        catcher: Cell,
        runner: Cell,
        depth: u32,
        maximizing: bool,
        stats: &mut SearchStats,
    ) -> f64 {
        if depth == 0 || catcher == runner {
            stats.leaves_evaluated += 1;
            return self.evaluate(world, catcher, runner);
        }

        let mover = if maximizing { runner } else { catcher };
        let moves = world.legal_moves(mover);
        if moves.is_empty() {
            stats.leaves_evaluated += 1;
            return self.evaluate(world, catcher, runner);
        }

        stats.nodes_expanded += 1;
        if maximizing {
            moves
                .iter()
                .map(|&(_, next)| self.search(world, catcher, next, depth - 1, false, stats))
                .fold(f64::NEG_INFINITY, f64::max)
        } else {
            moves
                .iter()
                .map(|&(_, next)| self.search(world, next, runner, depth - 1, true, stats))
                .fold(f64::INFINITY, f64::min)
        }
    }

    /// Best action for `mover` in the current world.
    #[must_use]
    pub fn best_action_for(&self, world: &GridWorld, mover: Role, inventory: &Inventory) -> Action {
        self.decide(world, mover, inventory).action
    }

    /// Best action for `mover`, with its score and search statistics.
    ///
    /// Returns `NoAction` if either agent is missing, the mover has no
    /// candidates, or no candidate beats the worst case for the mover (for
    /// the catcher: every option leaves the runner unreachable).
    #[must_use]
    pub fn decide(&self, world: &GridWorld, mover: Role, inventory: &Inventory) -> Decision {
        let start = Instant::now();
        let mut stats = SearchStats::new();

        let (Some(catcher), Some(runner)) = (
            world.agent_cell(Role::Catcher),
            world.agent_cell(Role::Runner),
        ) else {
            return Decision {
                action: Action::NoAction,
                score: None,
                stats,
            };
        };

        let candidates = self.candidates(world, mover, catcher, runner, inventory, &mut stats);
        stats.candidates = candidates.len() as u32;

        // After the root move it is the other side's ply
        let runner_to_move = mover == Role::Catcher;
        let depth = self.config.max_depth.saturating_sub(1);

        let mut best: Option<(Action, f64)> = None;
        let mut best_value = match mover {
            Role::Catcher => f64::INFINITY,
            Role::Runner => f64::NEG_INFINITY,
        };

        for candidate in &candidates {
            let scope = candidate.probe.as_ref().unwrap_or(world);
            let value = self.search(
                scope,
                candidate.catcher,
                candidate.runner,
                depth,
                runner_to_move,
                &mut stats,
            );

            let improves = match mover {
                Role::Catcher => value < best_value,
                Role::Runner => value > best_value,
            };
            if improves {
                best_value = value;
                best = Some((candidate.action, value));
            }
        }

        stats.time_us = start.elapsed().as_micros() as u64;

        let action = best.map_or(Action::NoAction, |(action, _)| action);
        trace!(
            role = %mover,
            %action,
            score = ?best.map(|(_, v)| v),
            candidates = stats.candidates,
            nodes = stats.nodes(),
            nodes_per_sec = stats.nodes_per_second(),
            "minimax decision"
        );

        Decision {
            action,
            score: best.map(|(_, value)| value),
            stats,
        }
    }

    fn candidates(
        &self,
        world: &GridWorld,
        mover: Role,
        catcher: Cell,
        runner: Cell,
        inventory: &Inventory,
        stats: &mut SearchStats,
    ) -> Vec<Candidate> {
        let origin = match mover {
            Role::Catcher => catcher,
            Role::Runner => runner,
        };
        let relocate = |dest: Cell| match mover {
            Role::Catcher => (dest, runner),
            Role::Runner => (catcher, dest),
        };

        let mut out = Vec::new();

        for (dir, dest) in world.legal_moves(origin) {
            let (c, r) = relocate(dest);
            out.push(Candidate {
                action: Action::Move(dir),
                catcher: c,
                runner: r,
                probe: None,
            });
        }

        let has_ghost = inventory.ghost_mode > 0;
        let has_wall = inventory.wall_builder > 0;
        if !has_ghost && !has_wall {
            return out;
        }

        let current = self.pathfinder.distance_or_infinity(world, catcher, runner);

        if has_ghost {
            for dir in Direction::ALL {
                let dest = origin.step(dir);
                if !world.is_interior(dest) || !world.is_legal_move(origin, dir, true) {
                    continue;
                }

                let (c, r) = relocate(dest);
                stats.probes += 1;
                let after = self.pathfinder.distance_or_infinity(world, c, r);
                let gain = match mover {
                    Role::Catcher => current - after,
                    Role::Runner => after - current,
                };
                if gain > self.config.ghost_gain_threshold {
                    out.push(Candidate {
                        action: Action::GhostMove(dir),
                        catcher: c,
                        runner: r,
                        probe: None,
                    });
                }
            }
        }

        if has_wall {
            for dir in Direction::ALL {
                let target = origin.step(dir);
                if !world.is_free(target) {
                    continue;
                }

                let probe = world.with_temporary_wall(target);
                stats.probes += 1;
                let after = self.pathfinder.distance_or_infinity(&probe, catcher, runner);
                let worth_it = match mover {
                    Role::Runner => after - current > self.config.wall_gain_threshold,
                    Role::Catcher => after <= self.config.trap_distance,
                };
                if worth_it {
                    out.push(Candidate {
                        action: Action::PlaceWall(target),
                        catcher,
                        runner,
                        probe: Some(probe),
                    });
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::open_room;

    fn engine(depth: u32) -> Minimax {
        Minimax::new(Pathfinder::new(), SearchConfig::default().with_max_depth(depth))
    }

    fn world_with<S: AsRef<str>>(lines: &[S], catcher: Cell, runner: Cell) -> GridWorld {
        let mut world = GridWorld::from_map(lines).unwrap();
        world.add_agent(Role::Catcher, catcher).unwrap();
        world.add_agent(Role::Runner, runner).unwrap();
        world
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let mm = engine(1);
        let world = GridWorld::from_map(&open_room(7, 7)).unwrap();
        let (c, r) = (Cell::new(1, 1), Cell::new(5, 5));

        assert_eq!(mm.minimax(&world, c, r, 0, true), mm.evaluate(&world, c, r));
    }

    #[test]
    fn test_capture_is_terminal() {
        let mm = engine(3);
        let world = GridWorld::from_map(&open_room(7, 7)).unwrap();
        let cell = Cell::new(3, 3);

        assert_eq!(mm.minimax(&world, cell, cell, 3, true), mm.evaluate(&world, cell, cell));
    }

    #[test]
    fn test_runner_ply_maximizes() {
        let mm = engine(1);
        let world = GridWorld::from_map(&open_room(7, 7)).unwrap();
        let (c, r) = (Cell::new(3, 1), Cell::new(3, 3));

        let expected = world
            .legal_moves(r)
            .iter()
            .map(|&(_, next)| mm.evaluate(&world, c, next))
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(mm.minimax(&world, c, r, 1, true), expected);
    }

    #[test]
    fn test_catcher_closes_in() {
        let mm = engine(2);
        let world = world_with(&open_room(7, 7), Cell::new(3, 1), Cell::new(3, 5));

        let action = mm.best_action_for(&world, Role::Catcher, &Inventory::default());
        assert_eq!(action, Action::Move(Direction::Right));
    }

    #[test]
    fn test_runner_backs_away() {
        let mm = engine(2);
        let world = world_with(
            &[
                "#########", //
                "#.......#",
                "#########",
            ],
            Cell::new(1, 1),
            Cell::new(1, 3),
        );

        let decision = mm.decide(&world, Role::Runner, &Inventory::default());
        assert_eq!(decision.action, Action::Move(Direction::Right));
        assert_eq!(decision.score, Some(2.0));
        assert_eq!(decision.stats.candidates, 2);
        assert!(decision.stats.nodes() > 0);
    }

    #[test]
    fn test_missing_agent_passes() {
        let mm = engine(2);
        let world = GridWorld::from_map(&open_room(5, 5)).unwrap();
        let decision = mm.decide(&world, Role::Catcher, &Inventory::default());
        assert_eq!(decision.action, Action::NoAction);
        assert_eq!(decision.score, None);
    }

    #[test]
    fn test_ghost_move_through_wall() {
        let mm = engine(1);
        // Catcher and runner separated by an interior wall; walking round is long
        let world = world_with(
            &[
                "#######", //
                "#.....#",
                "#.###.#",
                "#.#.#.#",
                "#.#.#.#",
                "#.....#",
                "#######",
            ],
            Cell::new(3, 1),
            Cell::new(3, 3),
        );
        let inventory = Inventory {
            ghost_mode: 1,
            ..Inventory::default()
        };

        let decision = mm.decide(&world, Role::Catcher, &inventory);
        assert_eq!(decision.action, Action::GhostMove(Direction::Right));
    }

    #[test]
    fn test_no_ghost_without_charge() {
        let mm = engine(1);
        let world = world_with(
            &[
                "#######", //
                "#.....#",
                "#.###.#",
                "#.#.#.#",
                "#.#.#.#",
                "#.....#",
                "#######",
            ],
            Cell::new(3, 1),
            Cell::new(3, 3),
        );

        let action = mm.best_action_for(&world, Role::Catcher, &Inventory::default());
        assert!(!matches!(action, Action::GhostMove(_)));
    }

    #[test]
    fn test_small_ghost_gain_is_not_a_candidate() {
        let mm = engine(1);
        // Open room: a ghost step lands on floor and changes distance by 1
        let world = world_with(&open_room(7, 7), Cell::new(1, 1), Cell::new(3, 3));
        let inventory = Inventory {
            ghost_mode: 1,
            ..Inventory::default()
        };

        for role in Role::ALL {
            let me = world.agent_cell(role).unwrap();
            let decision = mm.decide(&world, role, &inventory);
            assert_eq!(decision.stats.candidates as usize, world.legal_moves(me).len());
            assert!(!matches!(decision.action, Action::GhostMove(_)));
        }
    }

    #[test]
    fn test_runner_ghosts_into_wall() {
        let mm = engine(1);
        // Runner above the centre block; inside it the catcher cannot reach
        let world = world_with(
            &[
                "#####", //
                "#...#",
                "#.#.#",
                "#...#",
                "#####",
            ],
            Cell::new(3, 1),
            Cell::new(1, 2),
        );
        let inventory = Inventory {
            ghost_mode: 1,
            ..Inventory::default()
        };

        let decision = mm.decide(&world, Role::Runner, &inventory);
        // Left and Right as moves, Down as the only ghost worth taking
        assert_eq!(decision.stats.candidates, 3);
        assert_eq!(decision.action, Action::GhostMove(Direction::Down));
        assert_eq!(decision.score, Some(f64::INFINITY));
    }

    #[test]
    fn test_runner_walls_off_corridor() {
        let mm = engine(1);
        // Single corridor: a wall between runner and catcher seals the runner in
        let world = world_with(
            &[
                "#########", //
                "#.......#",
                "#########",
            ],
            Cell::new(1, 1),
            Cell::new(1, 4),
        );
        let inventory = Inventory {
            wall_builder: 1,
            ..Inventory::default()
        };
        let before = world.clone();

        let action = mm.best_action_for(&world, Role::Runner, &inventory);

        assert_eq!(action, Action::PlaceWall(Cell::new(1, 3)));
        assert_eq!(world, before);
    }
}
