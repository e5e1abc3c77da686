//! Built-in maps.

/// The 17×17 reference arena.
///
/// The reference setup spawns the catcher in rows `1..4` and the runner in
/// rows `14..17`, so they start on opposite sides of the maze.
pub const ARENA: [&str; 17] = [
    "#################",
    "#...............#",
    "#.#####...#.#...#",
    "#.#.......#.#...#",
    "#.#.###.###.###.#",
    "#.#.#...........#",
    "#.#.#...###.###.#",
    "#.........#.#...#",
    "#...###...#.#...#",
    "#...###.........#",
    "#...###...#######",
    "#.........#.....#",
    "#.#...#.#.#...#.#",
    "#.#...#.#.#...#.#",
    "#.#####.#.....#.#",
    "#.......#.....#.#",
    "#################",
];

/// Catcher spawn band on the arena.
pub const ARENA_CATCHER_ROWS: std::ops::Range<i32> = 1..4;

/// Runner spawn band on the arena.
pub const ARENA_RUNNER_ROWS: std::ops::Range<i32> = 14..17;

/// A walled rectangular room with an open floor.
///
/// `rows` and `cols` include the wall ring, so `open_room(5, 5)` has a 3×3
/// floor.
///
/// ```
/// let room = catchme::world::open_room(4, 5);
/// assert_eq!(room, vec!["#####", "#...#", "#...#", "#####"]);
/// ```
#[must_use]
pub fn open_room(rows: usize, cols: usize) -> Vec<String> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    if r == 0 || c == 0 || r + 1 == rows || c + 1 == cols {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridWorld;

    #[test]
    fn test_arena_is_rectangular() {
        let world = GridWorld::from_map(&ARENA).unwrap();
        assert_eq!(world.rows(), 17);
        assert_eq!(world.cols(), 17);
    }

    #[test]
    fn test_arena_spawn_bands_have_room() {
        let world = GridWorld::from_map(&ARENA).unwrap();
        assert!(world.free_cells(Some(ARENA_CATCHER_ROWS)).len() > 10);
        assert!(world.free_cells(Some(ARENA_RUNNER_ROWS)).len() > 10);
    }

    #[test]
    fn test_open_room() {
        let world = GridWorld::from_map(&open_room(5, 5)).unwrap();
        assert_eq!(world.free_cells(None).len(), 9);
    }
}
