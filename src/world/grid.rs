//! The grid world: walls, power-ups, and agent positions.
//!
//! ## Legality
//!
//! `is_legal_move` is the single movement predicate. The simulator, the
//! pathfinder, and the search engine all go through it, so a move the search
//! considers legal is exactly a move the simulator will accept.
//!
//! ## Snapshots
//!
//! Dynamic state lives in `im` persistent collections and the static layout
//! is shared behind an `Arc`, so cloning a world is O(1). The search engine
//! relies on this to evaluate "what if" worlds (`with_temporary_wall`)
//! without ever touching the live one.

use std::ops::Range;
use std::sync::Arc;

use im::{OrdMap, OrdSet};
use smallvec::SmallVec;

use super::power_up::PowerUpKind;
use crate::core::{Cell, Direction, GameError, GameRng, Result, Role, RoleMap};

/// Legal `(direction, destination)` pairs in canonical direction order.
pub type LegalMoves = SmallVec<[(Direction, Cell); 4]>;

/// The game board for one episode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    rows: i32,
    cols: i32,

    /// Row-major wall layout from the map. Never changes.
    static_walls: Arc<[bool]>,

    /// Walls placed at runtime with the wall builder.
    temporary_walls: OrdSet<Cell>,

    power_ups: OrdMap<Cell, PowerUpKind>,

    agents: RoleMap<Option<Cell>>,

    /// Teleport destinations: the four interior corners.
    teleport_corners: [Cell; 4],
}

impl GridWorld {
    /// Build a world from map rows. `#` is a wall, anything else is floor.
    ///
    /// Rows are compared by character count; all rows must be equally long.
    pub fn from_map<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let expected = lines.first().map_or(0, |l| l.as_ref().chars().count());
        if expected == 0 {
            return Err(GameError::EmptyMap);
        }
        let (rows, cols) = map_extent(lines.len(), expected)?;

        let mut walls = Vec::with_capacity(lines.len() * expected);
        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(GameError::RaggedMap {
                    row,
                    expected,
                    found,
                });
            }
            walls.extend(line.chars().map(|c| c == '#'));
        }

        Ok(Self {
            rows,
            cols,
            static_walls: walls.into(),
            temporary_walls: OrdSet::new(),
            power_ups: OrdMap::new(),
            agents: RoleMap::with_value(None),
            teleport_corners: interior_corners(rows, cols),
        })
    }

    // === Queries ===

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0 && cell.row < self.rows && cell.col < self.cols
    }

    /// True if the cell is inside the grid and not on its outer ring.
    #[must_use]
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.row > 0 && cell.col > 0 && cell.row < self.rows - 1 && cell.col < self.cols - 1
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        // In bounds, so every coordinate is non-negative
        Some(cell.row as usize * self.cols as usize + cell.col as usize)
    }

    /// True for map walls. Out-of-bounds cells are not walls.
    #[must_use]
    pub fn is_static_wall(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|idx| self.static_walls[idx])
    }

    #[must_use]
    pub fn is_temporary_wall(&self, cell: Cell) -> bool {
        self.temporary_walls.contains(&cell)
    }

    /// Static or temporary wall.
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.is_static_wall(cell) || self.is_temporary_wall(cell)
    }

    /// Runtime walls in row-major order.
    pub fn temporary_walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.temporary_walls.iter().copied()
    }

    /// Power-ups in row-major order.
    pub fn power_ups(&self) -> impl Iterator<Item = (Cell, PowerUpKind)> + '_ {
        self.power_ups.iter().map(|(&cell, &kind)| (cell, kind))
    }

    #[must_use]
    pub fn power_up_at(&self, cell: Cell) -> Option<PowerUpKind> {
        self.power_ups.get(&cell).copied()
    }

    #[must_use]
    pub fn agent_cell(&self, role: Role) -> Option<Cell> {
        self.agents[role]
    }

    /// The agent standing on `cell`, if any (catcher checked first).
    #[must_use]
    pub fn agent_at(&self, cell: Cell) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|&role| self.agents[role] == Some(cell))
    }

    /// In bounds, not a wall, and nobody standing there.
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_wall(cell) && self.agent_at(cell).is_none()
    }

    #[must_use]
    pub fn teleport_corners(&self) -> &[Cell; 4] {
        &self.teleport_corners
    }

    // === Movement legality ===

    /// Whether a step from `cell` in `direction` is allowed.
    ///
    /// The destination must be in bounds. Without `ignore_walls` it must not
    /// be a wall. With `ignore_walls` (ghost mode) it may be a wall, but only
    /// a strictly interior one: ghosts never enter the outer ring through a
    /// wall.
    #[must_use]
    pub fn is_legal_move(&self, cell: Cell, direction: Direction, ignore_walls: bool) -> bool {
        let dest = cell.step(direction);
        if !self.in_bounds(dest) {
            return false;
        }
        if !self.is_wall(dest) {
            return true;
        }
        ignore_walls && self.is_interior(dest)
    }

    /// All ordinary (wall-respecting) moves from `cell`.
    #[must_use]
    pub fn legal_moves(&self, cell: Cell) -> LegalMoves {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.is_legal_move(cell, dir, false))
            .map(|dir| (dir, cell.step(dir)))
            .collect()
    }

    /// Number of ordinary moves from `cell`.
    #[must_use]
    pub fn mobility(&self, cell: Cell) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.is_legal_move(cell, dir, false))
            .count()
    }

    // === Mutation ===

    /// Put an agent on the board (or move it there if already placed).
    pub fn add_agent(&mut self, role: Role, cell: Cell) -> Result<()> {
        let reason = if !self.in_bounds(cell) {
            Some("cell is out of bounds")
        } else if self.is_wall(cell) {
            Some("cell is a wall")
        } else if self.agent_at(cell).is_some_and(|other| other != role) {
            Some("cell is occupied by another agent")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(GameError::InvalidPlacement { role, cell, reason });
        }
        self.agents[role] = Some(cell);
        Ok(())
    }

    /// Move an agent one step. Returns false (and does nothing) if the agent
    /// is not on the board or the move is illegal.
    pub fn apply_move(&mut self, role: Role, direction: Direction, ignore_walls: bool) -> bool {
        let Some(cell) = self.agents[role] else {
            return false;
        };
        if !self.is_legal_move(cell, direction, ignore_walls) {
            return false;
        }
        self.agents[role] = Some(cell.step(direction));
        true
    }

    /// Turn a free cell into a temporary wall.
    pub fn place_wall(&mut self, cell: Cell) -> bool {
        if !self.is_free(cell) {
            return false;
        }
        self.temporary_walls.insert(cell);
        true
    }

    /// A copy of this world with one more temporary wall.
    ///
    /// Does not check the cell; callers probe only cells they could legally
    /// wall off.
    #[must_use]
    pub fn with_temporary_wall(&self, cell: Cell) -> Self {
        let mut probe = self.clone();
        probe.temporary_walls.insert(cell);
        probe
    }

    /// Remove every runtime wall.
    pub fn clear_temporary_walls(&mut self) {
        self.temporary_walls.clear();
    }

    /// Drop a power-up on a floor cell. Replaces anything already there.
    pub fn add_power_up(&mut self, cell: Cell, kind: PowerUpKind) -> bool {
        if !self.in_bounds(cell) || self.is_wall(cell) {
            return false;
        }
        self.power_ups.insert(cell, kind);
        true
    }

    /// Pick up whatever lies on `cell`. Teleport pads stay in place.
    pub fn collect_power_up(&mut self, cell: Cell) -> Option<PowerUpKind> {
        let kind = self.power_up_at(cell)?;
        if kind.is_consumed_on_pickup() {
            self.power_ups.remove(&cell);
        }
        Some(kind)
    }

    /// Send an agent to a random corner that is neither a wall nor occupied.
    ///
    /// Returns false, leaving the agent where it is, if no corner qualifies.
    pub fn teleport(&mut self, role: Role, rng: &mut GameRng) -> bool {
        if self.agents[role].is_none() {
            return false;
        }

        let mut open: SmallVec<[Cell; 4]> = SmallVec::new();
        for &corner in &self.teleport_corners {
            if self.is_free(corner) && !open.contains(&corner) {
                open.push(corner);
            }
        }

        match rng.choose(&open) {
            Some(&dest) => {
                self.agents[role] = Some(dest);
                true
            }
            None => false,
        }
    }

    /// Free cells in row-major order, optionally limited to a row band
    /// (half-open, clamped to the grid).
    #[must_use]
    pub fn free_cells(&self, rows: Option<Range<i32>>) -> Vec<Cell> {
        let rows = rows.unwrap_or(0..self.rows);
        let start = rows.start.max(0);
        let end = rows.end.min(self.rows);

        (start..end)
            .flat_map(|row| (0..self.cols).map(move |col| Cell::new(row, col)))
            .filter(|&cell| self.is_free(cell))
            .collect()
    }
}

/// Map size as grid coordinates, rejecting maps `i32` cells cannot address.
fn map_extent(rows: usize, cols: usize) -> Result<(i32, i32)> {
    match (i32::try_from(rows), i32::try_from(cols)) {
        (Ok(r), Ok(c)) => Ok((r, c)),
        _ => Err(GameError::MapTooLarge { rows, cols }),
    }
}

fn interior_corners(rows: i32, cols: i32) -> [Cell; 4] {
    let top = 1.min(rows - 1);
    let bottom = (rows - 2).max(0);
    let left = 1.min(cols - 1);
    let right = (cols - 2).max(0);
    [
        Cell::new(top, left),
        Cell::new(top, right),
        Cell::new(bottom, left),
        Cell::new(bottom, right),
    ]
}

impl std::fmt::Display for GridWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                let symbol = if let Some(role) = self.agent_at(cell) {
                    role.symbol()
                } else if self.is_static_wall(cell) {
                    '#'
                } else if self.is_temporary_wall(cell) {
                    '+'
                } else if let Some(kind) = self.power_up_at(cell) {
                    kind.symbol()
                } else {
                    '.'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
