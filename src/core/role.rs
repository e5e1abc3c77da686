//! Agent roles and per-role data storage.
//!
//! ## Role
//!
//! The game has exactly two sides: the Catcher (pursuer) and the Runner
//! (evader). Roles double as the agent identifiers in the world.
//!
//! ## RoleMap
//!
//! Fixed two-slot storage indexed by `Role`, used wherever the simulator
//! keeps the same kind of data for both sides (agents, latencies).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Catcher,
    Runner,
}

impl Role {
    /// Both roles in turn order (the Catcher always acts first).
    pub const ALL: [Role; 2] = [Role::Catcher, Role::Runner];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Role::Catcher => Role::Runner,
            Role::Runner => Role::Catcher,
        }
    }

    /// Slot index (0 = catcher, 1 = runner).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Role::Catcher => 0,
            Role::Runner => 1,
        }
    }

    /// Single-letter tag used by the text rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Role::Catcher => 'C',
            Role::Runner => 'R',
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Catcher => f.write_str("catcher"),
            Role::Runner => f.write_str("runner"),
        }
    }
}

/// Per-role data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use catchme::core::{Role, RoleMap};
///
/// let mut moves: RoleMap<u32> = RoleMap::with_value(0);
/// moves[Role::Runner] += 1;
///
/// assert_eq!(moves[Role::Catcher], 0);
/// assert_eq!(moves[Role::Runner], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMap<T> {
    data: [T; 2],
}

impl<T> RoleMap<T> {
    /// Create from explicit catcher and runner values.
    pub fn new(catcher: T, runner: T) -> Self {
        Self {
            data: [catcher, runner],
        }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Role) -> T) -> Self {
        Self::new(factory(Role::Catcher), factory(Role::Runner))
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    /// Get a reference to a role's data.
    #[must_use]
    pub fn get(&self, role: Role) -> &T {
        &self.data[role.index()]
    }

    /// Get a mutable reference to a role's data.
    pub fn get_mut(&mut self, role: Role) -> &mut T {
        &mut self.data[role.index()]
    }

    /// Iterate over (Role, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Role> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: Role) -> &Self::Output {
        self.get(role)
    }
}

impl<T> IndexMut<Role> for RoleMap<T> {
    fn index_mut(&mut self, role: Role) -> &mut Self::Output {
        self.get_mut(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Role::Catcher.opponent(), Role::Runner);
        assert_eq!(Role::Runner.opponent(), Role::Catcher);
    }

    #[test]
    fn test_display_and_symbol() {
        assert_eq!(Role::Catcher.to_string(), "catcher");
        assert_eq!(Role::Runner.to_string(), "runner");
        assert_eq!(Role::Catcher.symbol(), 'C');
    }

    #[test]
    fn test_role_map_from_fn() {
        let map = RoleMap::from_fn(|r| r.index() * 10);
        assert_eq!(map[Role::Catcher], 0);
        assert_eq!(map[Role::Runner], 10);
    }

    #[test]
    fn test_role_map_mutation() {
        let mut map: RoleMap<Vec<u32>> = RoleMap::default();
        map[Role::Runner].push(7);

        assert!(map[Role::Catcher].is_empty());
        assert_eq!(map[Role::Runner], vec![7]);
    }

    #[test]
    fn test_role_map_iter_order() {
        let map = RoleMap::new("c", "r");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Role::Catcher, &"c"), (Role::Runner, &"r")]);
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Runner).unwrap();
        assert_eq!(json, "\"runner\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Runner);
    }
}
