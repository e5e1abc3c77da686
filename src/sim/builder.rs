//! Episode setup: map, strategies, spawns, and items.
//!
//! ## Setup order
//!
//! 1. Parse the map.
//! 2. Place the catcher, then the runner, each at a fixed cell or at a
//!    random free cell of its band.
//! 3. Scatter the spawn plan's power-ups over the remaining free cells.
//!
//! Placing agents first means an agent never starts on an item. All
//! randomness comes from the `"setup"` stream of the episode seed, so the
//! layout depends only on the seed, the map and the spawn settings.
//!
//! ## Example
//!
//! ```
//! use catchme::agents::Strategy;
//! use catchme::core::{GameConfig, Role};
//! use catchme::sim::GameBuilder;
//!
//! let mut sim = GameBuilder::arena()
//!     .with_strategy(Role::Catcher, Strategy::Astar)
//!     .with_strategy(Role::Runner, Strategy::Greedy)
//!     .with_config(GameConfig::default().with_max_turns(10))
//!     .build()
//!     .unwrap();
//!
//! let metrics = sim.run();
//! assert!(metrics.turns <= 10);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agents::{Agent, Strategy};
use crate::core::{Cell, GameConfig, GameError, GameRng, Result, Role, RoleMap};
use crate::world::{GridWorld, PowerUpKind, ARENA, ARENA_CATCHER_ROWS, ARENA_RUNNER_ROWS};

use super::metrics::EpisodeMetrics;
use super::simulator::Simulator;

/// Where an agent starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Spawn {
    /// A fixed cell.
    At(Cell),
    /// A random free cell in a half-open row band.
    Band(Range<i32>),
    /// A random free cell anywhere.
    Anywhere,
}

/// How many of each power-up to scatter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPlan {
    pub speed_boosts: usize,
    pub wall_builders: usize,
    pub ghost_modes: usize,
    pub teleports: usize,
}

impl SpawnPlan {
    /// No items at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Two of each stored or boosting item and a single teleport pad.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            speed_boosts: 2,
            wall_builders: 2,
            ghost_modes: 2,
            teleports: 1,
        }
    }

    #[must_use]
    pub fn count(&self, kind: PowerUpKind) -> usize {
        match kind {
            PowerUpKind::SpeedBoost => self.speed_boosts,
            PowerUpKind::WallBuilder => self.wall_builders,
            PowerUpKind::GhostMode => self.ghost_modes,
            PowerUpKind::Teleport => self.teleports,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        PowerUpKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    /// Every item to place, grouped by kind.
    pub fn kinds(&self) -> impl Iterator<Item = PowerUpKind> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .flat_map(move |kind| std::iter::repeat(kind).take(self.count(kind)))
    }
}

/// Assembles a ready-to-run `Simulator`.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    map: Vec<String>,
    strategies: RoleMap<Strategy>,
    spawns: RoleMap<Spawn>,
    plan: SpawnPlan,
    config: GameConfig,
}

impl GameBuilder {
    /// Start from a map. Defaults: A* catcher, greedy runner, spawns
    /// anywhere, no items.
    pub fn new<S: AsRef<str>>(map: &[S]) -> Self {
        Self {
            map: map.iter().map(|line| line.as_ref().to_string()).collect(),
            strategies: RoleMap::new(Strategy::Astar, Strategy::Greedy),
            spawns: RoleMap::new(Spawn::Anywhere, Spawn::Anywhere),
            plan: SpawnPlan::none(),
            config: GameConfig::default(),
        }
    }

    /// The reference setup: the arena, opposite spawn bands, standard items.
    pub fn arena() -> Self {
        Self::new(&ARENA)
            .with_spawn(Role::Catcher, Spawn::Band(ARENA_CATCHER_ROWS))
            .with_spawn(Role::Runner, Spawn::Band(ARENA_RUNNER_ROWS))
            .with_spawn_plan(SpawnPlan::standard())
    }

    pub fn with_strategy(mut self, role: Role, strategy: Strategy) -> Self {
        self.strategies[role] = strategy;
        self
    }

    pub fn with_spawn(mut self, role: Role, spawn: Spawn) -> Self {
        self.spawns[role] = spawn;
        self
    }

    pub fn with_spawn_plan(mut self, plan: SpawnPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the episode described by the current settings.
    pub fn build(&self) -> Result<Simulator> {
        self.build_with_seed(self.config.seed)
    }

    /// Build and play `episodes` independent episodes.
    ///
    /// Episode seeds are forked from the configured seed, so a match is
    /// reproducible as a whole.
    pub fn run_match(&self, episodes: usize) -> Result<Vec<EpisodeMetrics>> {
        let mut seeds = GameRng::new(self.config.seed);
        (0..episodes)
            .map(|_| {
                let seed = seeds.fork().seed();
                self.build_with_seed(seed).map(|mut sim| sim.run())
            })
            .collect()
    }

    fn build_with_seed(&self, seed: u64) -> Result<Simulator> {
        let config = self.config.clone().with_seed(seed);
        config.validate()?;

        let catcher = Agent::new(Role::Catcher, self.strategies[Role::Catcher])?;
        let runner = Agent::new(Role::Runner, self.strategies[Role::Runner])?;

        let mut world = GridWorld::from_map(&self.map)?;
        let mut rng = GameRng::new(seed).for_context("setup");

        for role in Role::ALL {
            let cell = match &self.spawns[role] {
                Spawn::At(cell) => *cell,
                Spawn::Band(rows) => pick_spawn(&world, role, Some(rows.clone()), &mut rng)?,
                Spawn::Anywhere => pick_spawn(&world, role, None, &mut rng)?,
            };
            world.add_agent(role, cell)?;
        }

        let open = world.free_cells(None);
        let requested = self.plan.total();
        let cells = rng
            .sample(&open, requested)
            .ok_or(GameError::ExhaustedSpawnCells {
                purpose: "power-ups",
                requested,
                available: open.len(),
            })?;
        for (cell, kind) in cells.into_iter().zip(self.plan.kinds()) {
            world.add_power_up(cell, kind);
        }

        debug!(
            seed,
            catcher = ?world.agent_cell(Role::Catcher),
            runner = ?world.agent_cell(Role::Runner),
            power_ups = requested,
            "episode built"
        );

        Simulator::new(world, catcher, runner, config)
    }
}

fn pick_spawn(
    world: &GridWorld,
    role: Role,
    rows: Option<Range<i32>>,
    rng: &mut GameRng,
) -> Result<Cell> {
    let options = world.free_cells(rows);
    rng.choose(&options)
        .copied()
        .ok_or(GameError::ExhaustedSpawnCells {
            purpose: match role {
                Role::Catcher => "catcher spawn",
                Role::Runner => "runner spawn",
            },
            requested: 1,
            available: 0,
        })
}
