//! Agents: a role, a strategy, and the state items leave behind.

use tracing::trace;

use crate::core::{Action, Cell, GameError, GameRng, Result, Role};
use crate::search::SearchContext;
use crate::world::GridWorld;

use super::inventory::Inventory;
use super::strategy::Strategy;

/// One side of the game.
///
/// Agents never mutate the world. `choose_action` reads the current world
/// and returns an action; the simulator applies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    role: Role,
    strategy: Strategy,
    speed_boost_turns: u32,
    inventory: Inventory,
}

impl Agent {
    /// Create an agent. Fails if the strategy cannot drive this role.
    pub fn new(role: Role, strategy: Strategy) -> Result<Self> {
        if !strategy.supports(role) {
            return Err(GameError::UnsupportedStrategy {
                role,
                strategy: strategy.to_string(),
            });
        }
        Ok(Self {
            role,
            strategy,
            speed_boost_turns: 0,
            inventory: Inventory::default(),
        })
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    // === Speed boost ===

    #[must_use]
    pub fn speed_boost_turns(&self) -> u32 {
        self.speed_boost_turns
    }

    /// Start (or restart) a boost. Sets the counter; does not stack.
    pub fn activate_speed_boost(&mut self, turns: u32) {
        self.speed_boost_turns = turns;
    }

    #[must_use]
    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost_turns > 0
    }

    /// Actions allowed in the current sub-phase.
    #[must_use]
    pub fn actions_allowed(&self) -> u32 {
        if self.has_speed_boost() {
            2
        } else {
            1
        }
    }

    /// Tick the boost down by one turn.
    pub fn decrease_boost_turns(&mut self) {
        self.speed_boost_turns = self.speed_boost_turns.saturating_sub(1);
    }

    // === Decisions ===

    /// Pick an action for the current world.
    ///
    /// Returns `NoAction` if the agent is not on the board or has nothing
    /// legal to do.
    pub fn choose_action(
        &self,
        world: &GridWorld,
        search: &SearchContext,
        rng: &mut GameRng,
    ) -> Action {
        let Some(me) = world.agent_cell(self.role) else {
            return Action::NoAction;
        };
        let opponent = world.agent_cell(self.role.opponent());

        match (self.strategy, opponent) {
            (Strategy::Random, _) | (_, None) => random_move(world, me, rng),
            (Strategy::Greedy, Some(them)) => {
                farthest_move(world, me, |cell| f64::from(cell.manhattan(them)))
            }
            (Strategy::Astar, Some(them)) => match self.role {
                Role::Catcher => match search.pathfinder().next_step(world, me, them) {
                    Some(dir) => Action::Move(dir),
                    None => {
                        trace!(role = %self.role, "no path to opponent, moving at random");
                        random_move(world, me, rng)
                    }
                },
                Role::Runner => {
                    let pathfinder = search.pathfinder();
                    farthest_move(world, me, |cell| {
                        pathfinder.distance_or_infinity(world, cell, them)
                    })
                }
            },
            (Strategy::Minimax, Some(_)) => {
                search.minimax().best_action_for(world, self.role, &self.inventory)
            }
        }
    }
}

fn random_move(world: &GridWorld, from: Cell, rng: &mut GameRng) -> Action {
    let moves = world.legal_moves(from);
    rng.choose(&moves).map_or(Action::NoAction, |&(dir, _)| Action::Move(dir))
}

/// The legal move with the largest `distance`; the first one wins ties.
fn farthest_move(world: &GridWorld, from: Cell, distance: impl Fn(Cell) -> f64) -> Action {
    let mut best: Option<(Action, f64)> = None;
    for (dir, dest) in world.legal_moves(from) {
        let d = distance(dest);
        if best.map_or(true, |(_, best_d)| d > best_d) {
            best = Some((Action::Move(dir), d));
        }
    }
    best.map_or(Action::NoAction, |(action, _)| action)
}
