//! The turn loop.
//!
//! ## Turn structure
//!
//! A turn is a catcher sub-phase followed by a runner sub-phase. In each
//! sub-phase the acting agent takes one action, or two while its speed
//! boost is active. The allowance is re-read after every action, so a boost
//! collected by the first action grants a second one straight away. The
//! boost counter ticks down once at the end of the sub-phase.
//!
//! Every action goes through the same pipeline:
//!
//! ```text
//! choose (timed) -> apply -> pick up item -> capture check
//! ```
//!
//! Only a move that succeeds picks up an item. Passing or building a wall
//! leaves whatever lies under the agent alone.
//!
//! Capture ends the episode at once. If `max_turns` full turns pass without
//! a capture, the runner wins.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agents::Agent;
use crate::core::{Action, ActionRecord, GameConfig, GameError, GameRng, Result, Role, RoleMap};
use crate::search::SearchContext;
use crate::world::{GridWorld, PowerUpKind};

use super::metrics::EpisodeMetrics;

/// Where an episode stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    CatcherWon,
    RunnerWon,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Running)
    }

    /// The winning side, once the episode is over.
    #[must_use]
    pub const fn winner(self) -> Option<Role> {
        match self {
            GameStatus::Running => None,
            GameStatus::CatcherWon => Some(Role::Catcher),
            GameStatus::RunnerWon => Some(Role::Runner),
        }
    }
}

/// Runs one episode.
///
/// Owns the world, both agents, and the play RNG. The world is only ever
/// written here.
#[derive(Clone, Debug)]
pub struct Simulator {
    world: GridWorld,
    agents: RoleMap<Agent>,
    config: GameConfig,
    search: SearchContext,
    rng: GameRng,
    status: GameStatus,
    turn: u32,
    sequence: u32,
    history: Vec<ActionRecord>,
    decision_times: RoleMap<Vec<u64>>,
    elapsed_us: u64,
}

impl Simulator {
    /// Set up an episode on a world that already holds both agents.
    pub fn new(
        world: GridWorld,
        catcher: Agent,
        runner: Agent,
        config: GameConfig,
    ) -> Result<Self> {
        config.validate()?;

        for (agent, expected) in [(&catcher, Role::Catcher), (&runner, Role::Runner)] {
            if agent.role() != expected {
                return Err(GameError::InvalidConfig(format!(
                    "{} agent passed in the {expected} slot",
                    agent.role()
                )));
            }
        }

        let catcher_cell = world
            .agent_cell(Role::Catcher)
            .ok_or(GameError::MissingAgent(Role::Catcher))?;
        let runner_cell = world
            .agent_cell(Role::Runner)
            .ok_or(GameError::MissingAgent(Role::Runner))?;

        let status = if config.capture_rule.is_capture(catcher_cell, runner_cell) {
            GameStatus::CatcherWon
        } else {
            GameStatus::Running
        };

        Ok(Self {
            search: SearchContext::new(config.search.clone()),
            rng: GameRng::new(config.seed).for_context("play"),
            world,
            agents: RoleMap::new(catcher, runner),
            config,
            status,
            turn: 0,
            sequence: 0,
            history: Vec::new(),
            decision_times: RoleMap::default(),
            elapsed_us: 0,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    #[must_use]
    pub fn agent(&self, role: Role) -> &Agent {
        &self.agents[role]
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Turns played so far (including a capturing turn).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every action taken so far, in order.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    // === Running ===

    /// Play one full turn. Does nothing once the episode is over.
    pub fn step(&mut self) -> GameStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        let start = Instant::now();
        let captured = Role::ALL.into_iter().any(|role| self.play_phase(role));
        self.turn += 1;

        if captured {
            self.status = GameStatus::CatcherWon;
        } else if self.turn >= self.config.max_turns {
            self.status = GameStatus::RunnerWon;
        }
        self.elapsed_us += start.elapsed().as_micros() as u64;

        if let Some(winner) = self.status.winner() {
            info!(%winner, turns = self.turn, captured, "episode over");
        }
        self.status
    }

    /// Play until the episode ends.
    pub fn run(&mut self) -> EpisodeMetrics {
        loop {
            if let Some(winner) = self.step().winner() {
                return self.metrics_for(winner);
            }
        }
    }

    /// Metrics so far, or `None` while the episode is still running.
    #[must_use]
    pub fn metrics(&self) -> Option<EpisodeMetrics> {
        self.status.winner().map(|winner| self.metrics_for(winner))
    }

    fn metrics_for(&self, winner: Role) -> EpisodeMetrics {
        EpisodeMetrics {
            winner,
            turns: self.turn,
            captured: self.status == GameStatus::CatcherWon,
            catcher_times_us: self.decision_times[Role::Catcher].clone(),
            runner_times_us: self.decision_times[Role::Runner].clone(),
            total_time_us: self.elapsed_us,
        }
    }

    /// One sub-phase. Returns true if it ended in a capture.
    fn play_phase(&mut self, role: Role) -> bool {
        let mut taken = 0;
        while taken < self.agents[role].actions_allowed() {
            taken += 1;

            let started = Instant::now();
            let action = self.agents[role].choose_action(&self.world, &self.search, &mut self.rng);
            self.decision_times[role].push(started.elapsed().as_micros() as u64);

            let applied = self.apply(role, action);
            self.history
                .push(ActionRecord::new(role, action, self.turn, self.sequence, applied));
            self.sequence += 1;

            // Items are collected on arrival, never by standing still
            if applied && action.direction().is_some() {
                self.pick_up(role);
            }

            if self.is_captured() {
                return true;
            }
        }

        self.agents[role].decrease_boost_turns();
        false
    }

    /// Apply an action to the world. Charges are only spent on success.
    fn apply(&mut self, role: Role, action: Action) -> bool {
        let applied = match action {
            Action::NoAction => return false,
            Action::Move(dir) => self.world.apply_move(role, dir, false),
            Action::GhostMove(dir) => {
                self.agents[role].inventory().has(PowerUpKind::GhostMode)
                    && self.world.apply_move(role, dir, true)
                    && self.agents[role].inventory_mut().consume(PowerUpKind::GhostMode)
            }
            Action::PlaceWall(cell) => {
                let adjacent = self
                    .world
                    .agent_cell(role)
                    .is_some_and(|me| me.manhattan(cell) == 1);
                adjacent
                    && self.agents[role].inventory().has(PowerUpKind::WallBuilder)
                    && self.world.place_wall(cell)
                    && self.agents[role].inventory_mut().consume(PowerUpKind::WallBuilder)
            }
        };

        if applied {
            debug!(%role, %action, turn = self.turn, "action applied");
        } else {
            warn!(%role, %action, turn = self.turn, "action rejected");
        }
        applied
    }

    /// Collect whatever lies under the agent.
    fn pick_up(&mut self, role: Role) {
        let Some(cell) = self.world.agent_cell(role) else {
            return;
        };
        let Some(kind) = self.world.collect_power_up(cell) else {
            return;
        };

        match kind {
            PowerUpKind::SpeedBoost => {
                self.agents[role].activate_speed_boost(self.config.speed_boost_turns);
            }
            PowerUpKind::WallBuilder | PowerUpKind::GhostMode => {
                self.agents[role].inventory_mut().add(kind);
            }
            PowerUpKind::Teleport => {
                if !self.world.teleport(role, &mut self.rng) {
                    debug!(%role, %cell, "teleport blocked, every corner taken");
                }
            }
        }
        debug!(%role, %kind, %cell, "picked up");
    }

    fn is_captured(&self) -> bool {
        match (
            self.world.agent_cell(Role::Catcher),
            self.world.agent_cell(Role::Runner),
        ) {
            (Some(c), Some(r)) => self.config.capture_rule.is_capture(c, r),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Strategy;
    use crate::core::{CaptureRule, Cell, Direction};
    use crate::world::open_room;

    fn simulator(catcher: Cell, runner: Cell, config: GameConfig) -> Simulator {
        let mut world = GridWorld::from_map(&open_room(7, 7)).unwrap();
        world.add_agent(Role::Catcher, catcher).unwrap();
        world.add_agent(Role::Runner, runner).unwrap();
        Simulator::new(
            world,
            Agent::new(Role::Catcher, Strategy::Astar).unwrap(),
            Agent::new(Role::Runner, Strategy::Greedy).unwrap(),
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_agent() {
        let mut world = GridWorld::from_map(&open_room(5, 5)).unwrap();
        world.add_agent(Role::Catcher, Cell::new(1, 1)).unwrap();
        let err = Simulator::new(
            world,
            Agent::new(Role::Catcher, Strategy::Random).unwrap(),
            Agent::new(Role::Runner, Strategy::Random).unwrap(),
            GameConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, GameError::MissingAgent(Role::Runner));
    }

    #[test]
    fn test_swapped_agents_rejected() {
        let mut world = GridWorld::from_map(&open_room(5, 5)).unwrap();
        world.add_agent(Role::Catcher, Cell::new(1, 1)).unwrap();
        world.add_agent(Role::Runner, Cell::new(3, 3)).unwrap();
        let err = Simulator::new(
            world,
            Agent::new(Role::Runner, Strategy::Random).unwrap(),
            Agent::new(Role::Catcher, Strategy::Random).unwrap(),
            GameConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut world = GridWorld::from_map(&open_room(5, 5)).unwrap();
        world.add_agent(Role::Catcher, Cell::new(1, 1)).unwrap();
        world.add_agent(Role::Runner, Cell::new(3, 3)).unwrap();
        let result = Simulator::new(
            world,
            Agent::new(Role::Catcher, Strategy::Random).unwrap(),
            Agent::new(Role::Runner, Strategy::Random).unwrap(),
            GameConfig::default().with_max_turns(0),
        );
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_capture_at_start() {
        let sim = simulator(Cell::new(1, 1), Cell::new(2, 2), GameConfig::default());
        assert_eq!(sim.status(), GameStatus::CatcherWon);
        assert_eq!(sim.metrics().map(|m| m.turns), Some(0));
    }

    #[test]
    fn test_same_cell_rule_ignores_diagonal() {
        let config = GameConfig::default().with_capture_rule(CaptureRule::SameCell);
        let sim = simulator(Cell::new(1, 1), Cell::new(2, 2), config);
        assert_eq!(sim.status(), GameStatus::Running);
        assert_eq!(sim.metrics(), None);
    }

    #[test]
    fn test_history_records_every_action() {
        let config = GameConfig::default().with_max_turns(1);
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), config);
        let status = sim.step();

        assert_eq!(status, GameStatus::RunnerWon);
        let history = sim.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::Catcher);
        assert_eq!(history[1].role, Role::Runner);
        assert_eq!((history[0].sequence, history[1].sequence), (0, 1));
        assert!(history.iter().all(|r| r.applied && r.turn == 0));
    }

    #[test]
    fn test_step_after_end_is_noop() {
        let config = GameConfig::default().with_max_turns(1);
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), config);
        sim.step();
        let recorded = sim.history().len();

        assert_eq!(sim.step(), GameStatus::RunnerWon);
        assert_eq!(sim.history().len(), recorded);
        assert_eq!(sim.turn(), 1);
    }

    #[test]
    fn test_ghost_move_needs_charge() {
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), GameConfig::default());
        assert!(!sim.apply(Role::Catcher, Action::GhostMove(Direction::Down)));

        sim.agents[Role::Catcher].inventory_mut().add(PowerUpKind::GhostMode);
        assert!(sim.apply(Role::Catcher, Action::GhostMove(Direction::Down)));
        assert_eq!(sim.agent(Role::Catcher).inventory().ghost_mode, 0);
    }

    #[test]
    fn test_failed_ghost_move_keeps_charge() {
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), GameConfig::default());
        sim.agents[Role::Catcher].inventory_mut().add(PowerUpKind::GhostMode);

        // Up from row 1 would enter the outer ring through a wall
        assert!(!sim.apply(Role::Catcher, Action::GhostMove(Direction::Up)));
        assert_eq!(sim.agent(Role::Catcher).inventory().ghost_mode, 1);
    }

    #[test]
    fn test_place_wall_rules() {
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), GameConfig::default());

        // No charge
        assert!(!sim.apply(Role::Runner, Action::PlaceWall(Cell::new(4, 5))));

        sim.agents[Role::Runner].inventory_mut().add(PowerUpKind::WallBuilder);
        // Not adjacent
        assert!(!sim.apply(Role::Runner, Action::PlaceWall(Cell::new(3, 5))));
        assert_eq!(sim.agent(Role::Runner).inventory().wall_builder, 1);

        assert!(sim.apply(Role::Runner, Action::PlaceWall(Cell::new(4, 5))));
        assert!(sim.world().is_temporary_wall(Cell::new(4, 5)));
        assert_eq!(sim.agent(Role::Runner).inventory().wall_builder, 0);
    }

    #[test]
    fn test_pick_up_effects() {
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), GameConfig::default());
        sim.world.add_power_up(Cell::new(2, 1), PowerUpKind::SpeedBoost);
        sim.world.add_power_up(Cell::new(3, 1), PowerUpKind::WallBuilder);

        assert!(sim.apply(Role::Catcher, Action::Move(Direction::Down)));
        sim.pick_up(Role::Catcher);
        assert_eq!(sim.agent(Role::Catcher).speed_boost_turns(), 3);
        assert_eq!(sim.world().power_up_at(Cell::new(2, 1)), None);

        assert!(sim.apply(Role::Catcher, Action::Move(Direction::Down)));
        sim.pick_up(Role::Catcher);
        assert_eq!(sim.agent(Role::Catcher).inventory().wall_builder, 1);
    }

    #[test]
    fn test_no_action_is_not_applied() {
        let mut sim = simulator(Cell::new(1, 1), Cell::new(5, 5), GameConfig::default());
        let before = sim.world().clone();
        assert!(!sim.apply(Role::Catcher, Action::NoAction));
        assert_eq!(sim.world(), &before);
    }
}
