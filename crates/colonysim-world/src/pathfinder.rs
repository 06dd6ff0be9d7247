//! A* pathfinding over the 4-connected tile grid.
//!
//! Grounded on `src/world/pathfinding.py` (open/closed sets keyed by tile,
//! g-score map, Euclidean heuristic, move-cost-weighted edges). Rust's
//! `BinaryHeap` is a max-heap with no ordering guarantee between
//! equal-priority entries, so `OpenEntry` carries an explicit insertion
//! sequence number to break ties in first-pushed order, matching the
//! original's stable list-based open set.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::grid::{manhattan, Grid, Tile};

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenEntry {
    f_score: f64,
    sequence: u64,
    tile: Tile,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; we want the lowest f_score (and, among
        // ties, the earliest-inserted entry) to come out first, so both
        // comparisons are reversed.
        other
            .f_score
            .partial_cmp(&self.f_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(a: Tile, b: Tile) -> f64 {
    let dx = f64::from(a.0 - b.0);
    let dy = f64::from(a.1 - b.1);
    dx.hypot(dy)
}

/// Find a path from `start` to `goal` over `grid`'s walkable tiles.
///
/// Returns the sequence of tiles from just after `start` through `goal`
/// (the start tile itself is not included). Returns an empty vector if
/// `start == goal`, if `goal` is not walkable, or if no path exists.
#[must_use]
pub fn find_path(grid: &Grid, start: Tile, goal: Tile) -> Vec<Tile> {
    if start == goal {
        return Vec::new();
    }
    if !grid.is_walkable(goal.0, goal.1) || !grid.is_walkable(start.0, start.1) {
        return Vec::new();
    }

    let mut open_heap = BinaryHeap::new();
    let mut sequence: u64 = 0;
    let mut g_score: HashMap<Tile, f64> = HashMap::new();
    let mut came_from: HashMap<Tile, Tile> = HashMap::new();
    let mut closed: HashMap<Tile, bool> = HashMap::new();

    g_score.insert(start, 0.0);
    open_heap.push(OpenEntry {
        f_score: heuristic(start, goal),
        sequence,
        tile: start,
    });

    while let Some(current) = open_heap.pop() {
        if closed.get(&current.tile).copied().unwrap_or(false) {
            continue;
        }
        if current.tile == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        closed.insert(current.tile, true);

        let current_g = g_score.get(&current.tile).copied().unwrap_or(f64::INFINITY);

        for (nx, ny) in Grid::neighbors4(current.tile.0, current.tile.1) {
            if !grid.is_walkable(nx, ny) {
                continue;
            }
            let neighbor = (nx, ny);
            if closed.get(&neighbor).copied().unwrap_or(false) {
                continue;
            }
            let step_cost = f64::from(grid.move_cost(nx, ny));
            let tentative_g = current_g + step_cost;
            let existing_g = g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if tentative_g < existing_g {
                came_from.insert(neighbor, current.tile);
                g_score.insert(neighbor, tentative_g);
                sequence = sequence.wrapping_add(1);
                open_heap.push(OpenEntry {
                    f_score: tentative_g + heuristic(neighbor, goal),
                    sequence,
                    tile: neighbor,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct_path(came_from: &HashMap<Tile, Tile>, start: Tile, goal: Tile) -> Vec<Tile> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                current = prev;
                if current != start {
                    path.push(current);
                }
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use colonysim_types::TerrainKind;

    #[test]
    fn same_start_and_goal_is_empty() {
        let grid = Grid::new(5, 5);
        assert!(find_path(&grid, (1, 1), (1, 1)).is_empty());
    }

    #[test]
    fn straight_line_path_on_open_grid() {
        let grid = Grid::new(5, 5);
        let path = find_path(&grid, (0, 0), (3, 0));
        assert_eq!(path, vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn unwalkable_goal_returns_empty() {
        let mut grid = Grid::new(5, 5);
        grid.set_terrain(3, 0, TerrainKind::Water);
        assert!(find_path(&grid, (0, 0), (3, 0)).is_empty());
    }

    #[test]
    fn path_routes_around_obstacle() {
        let mut grid = Grid::new(5, 5);
        for y in 0..4 {
            grid.set_terrain(2, y, TerrainKind::Water);
        }
        let path = find_path(&grid, (0, 0), (4, 0));
        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&(4, 0)));
        assert!(path.iter().all(|&(x, y)| grid.is_walkable(x, y)));
    }

    #[test]
    fn no_path_when_fully_enclosed() {
        let mut grid = Grid::new(5, 5);
        for x in 0..5 {
            grid.set_terrain(x, 1, TerrainKind::Water);
        }
        assert!(find_path(&grid, (0, 0), (0, 4)).is_empty());
    }

    #[test]
    fn path_excludes_start_tile() {
        let grid = Grid::new(5, 5);
        let path = find_path(&grid, (0, 0), (1, 0));
        assert_eq!(path, vec![(1, 0)]);
        assert!(!path.contains(&(0, 0)));
    }
}
