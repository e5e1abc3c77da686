//! A* pathfinding over the four-connected grid.
//!
//! Distances are exact: temporary walls block exactly like map walls, and
//! the search expands neighbours through `GridWorld::is_legal_move`. The
//! minimax heuristic depends on this being the true distance rather than a
//! Manhattan estimate.
//!
//! Ties on f-score are broken by insertion order, so the same world always
//! produces the same path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::core::{Cell, Direction};
use crate::world::GridWorld;

#[derive(Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    cell: Cell,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest (f, tie) first.
        (other.f, other.tie).cmp(&(self.f, self.tie))
    }
}

/// Shortest-path queries against a world snapshot.
///
/// Stateless; one instance is shared by every agent in an episode.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pathfinder;

impl Pathfinder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The sequence of moves from `start` to `goal`.
    ///
    /// Empty when `start == goal`, `None` when the goal is unreachable.
    #[must_use]
    pub fn find_path(&self, world: &GridWorld, start: Cell, goal: Cell) -> Option<Vec<Direction>> {
        if start == goal {
            return Some(Vec::new());
        }

        let mut open = BinaryHeap::new();
        let mut tie: u64 = 0;
        let mut g_score: FxHashMap<Cell, u32> = FxHashMap::default();
        let mut came_from: FxHashMap<Cell, (Cell, Direction)> = FxHashMap::default();

        g_score.insert(start, 0);
        open.push(OpenNode {
            f: start.manhattan(goal),
            g: 0,
            cell: start,
            tie,
        });

        while let Some(node) = open.pop() {
            if node.cell == goal {
                return Some(reconstruct(&came_from, start, goal));
            }

            if g_score.get(&node.cell).is_some_and(|&best| node.g > best) {
                // Stale heap entry.
                continue;
            }

            for dir in Direction::ALL {
                if !world.is_legal_move(node.cell, dir, false) {
                    continue;
                }
                let next = node.cell.step(dir);
                let tentative_g = node.g + 1;
                if g_score.get(&next).is_some_and(|&best| tentative_g >= best) {
                    continue;
                }

                g_score.insert(next, tentative_g);
                came_from.insert(next, (node.cell, dir));
                tie += 1;
                open.push(OpenNode {
                    f: tentative_g + next.manhattan(goal),
                    g: tentative_g,
                    cell: next,
                    tie,
                });
            }
        }

        None
    }

    /// Number of moves on a shortest path, or `None` if unreachable.
    #[must_use]
    pub fn shortest_distance(&self, world: &GridWorld, start: Cell, goal: Cell) -> Option<u32> {
        self.find_path(world, start, goal).map(|path| path.len() as u32)
    }

    /// First move of a shortest path. `None` if already there or unreachable.
    #[must_use]
    pub fn next_step(&self, world: &GridWorld, start: Cell, goal: Cell) -> Option<Direction> {
        self.find_path(world, start, goal)?.first().copied()
    }

    /// Shortest distance as a float, with unreachable mapped to +∞.
    ///
    /// This is the form the search heuristic works with.
    #[must_use]
    pub fn distance_or_infinity(&self, world: &GridWorld, start: Cell, goal: Cell) -> f64 {
        self.shortest_distance(world, start, goal)
            .map_or(f64::INFINITY, f64::from)
    }
}

fn reconstruct(
    came_from: &FxHashMap<Cell, (Cell, Direction)>,
    start: Cell,
    goal: Cell,
) -> Vec<Direction> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&(prev, dir)) => {
                path.push(dir);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
