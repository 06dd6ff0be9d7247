//! Cached per-zone-kind tile sets and nearest-tile queries.
//!
//! Grounded on `src/world/zone_manager.py`: `mark_zone` is idempotent (a
//! tile re-marked with the same kind is a no-op; re-marked with a different
//! kind is removed from its old set first), and `get_nearest_zone_tile`
//! does a linear Manhattan-distance scan over the requested kind's set,
//! returning `None` when that kind has no tiles.

use std::collections::{BTreeSet, HashMap};

use colonysim_types::ZoneKind;

use crate::grid::{manhattan, Grid, Tile};

/// Cached index from zone kind to the set of tiles carrying that kind.
///
/// Kept in sync with a [`Grid`]'s zone layer by routing all zone writes
/// through [`ZoneIndex::mark`] rather than [`Grid::set_zone`] directly.
#[derive(Debug, Clone, Default)]
pub struct ZoneIndex {
    tiles_by_kind: HashMap<ZoneKind, BTreeSet<Tile>>,
}

impl ZoneIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by scanning every tile of `grid`.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let mut index = Self::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let kind = grid.zone(x, y);
                if kind != ZoneKind::None {
                    index.tiles_by_kind.entry(kind).or_default().insert((x, y));
                }
            }
        }
        index
    }

    /// Mark `(x, y)` as `kind` in both the grid and this index. Idempotent:
    /// marking a tile with the kind it already has does nothing further.
    pub fn mark(&mut self, grid: &mut Grid, x: i32, y: i32, kind: ZoneKind) {
        let previous = grid.zone(x, y);
        if previous == kind {
            return;
        }
        if previous != ZoneKind::None {
            if let Some(set) = self.tiles_by_kind.get_mut(&previous) {
                set.remove(&(x, y));
            }
        }
        grid.set_zone(x, y, kind);
        if kind != ZoneKind::None {
            self.tiles_by_kind.entry(kind).or_default().insert((x, y));
        }
    }

    /// All tiles currently carrying `kind`.
    #[must_use]
    pub fn tiles_of(&self, kind: ZoneKind) -> impl Iterator<Item = Tile> + '_ {
        self.tiles_by_kind
            .get(&kind)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// The tile of `kind` nearest to `from` by Manhattan distance, or
    /// `None` if no tile carries `kind`. Ties broken by the tile's natural
    /// `(x, y)` ordering (the `BTreeSet` iteration order), matching the
    /// stable-first-match behavior of a linear scan over a fixed list.
    #[must_use]
    pub fn nearest_tile_of(&self, from: Tile, kind: ZoneKind) -> Option<Tile> {
        let set = self.tiles_by_kind.get(&kind)?;
        set.iter().copied().min_by_key(|&tile| manhattan(from, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_adds_to_set_and_grid() {
        let mut grid = Grid::new(10, 10);
        let mut index = ZoneIndex::new();
        index.mark(&mut grid, 2, 3, ZoneKind::Stockpile);
        assert_eq!(grid.zone(2, 3), ZoneKind::Stockpile);
        assert_eq!(index.nearest_tile_of((0, 0), ZoneKind::Stockpile), Some((2, 3)));
    }

    #[test]
    fn remarking_same_kind_is_noop() {
        let mut grid = Grid::new(10, 10);
        let mut index = ZoneIndex::new();
        index.mark(&mut grid, 2, 3, ZoneKind::Stockpile);
        index.mark(&mut grid, 2, 3, ZoneKind::Stockpile);
        assert_eq!(index.tiles_of(ZoneKind::Stockpile).count(), 1);
    }

    #[test]
    fn remarking_different_kind_moves_tile() {
        let mut grid = Grid::new(10, 10);
        let mut index = ZoneIndex::new();
        index.mark(&mut grid, 2, 3, ZoneKind::Stockpile);
        index.mark(&mut grid, 2, 3, ZoneKind::Farm);
        assert_eq!(index.tiles_of(ZoneKind::Stockpile).count(), 0);
        assert_eq!(grid.zone(2, 3), ZoneKind::Farm);
        assert_eq!(index.nearest_tile_of((0, 0), ZoneKind::Farm), Some((2, 3)));
    }

    #[test]
    fn nearest_tile_of_missing_kind_is_none() {
        let index = ZoneIndex::new();
        assert_eq!(index.nearest_tile_of((0, 0), ZoneKind::Residential), None);
    }

    #[test]
    fn nearest_tile_picks_closest() {
        let mut grid = Grid::new(20, 20);
        let mut index = ZoneIndex::new();
        index.mark(&mut grid, 10, 10, ZoneKind::Stockpile);
        index.mark(&mut grid, 1, 1, ZoneKind::Stockpile);
        assert_eq!(index.nearest_tile_of((0, 0), ZoneKind::Stockpile), Some((1, 1)));
    }

    #[test]
    fn from_grid_rebuilds_index() {
        let mut grid = Grid::new(5, 5);
        grid.set_zone(2, 2, ZoneKind::Farm);
        let index = ZoneIndex::from_grid(&grid);
        assert_eq!(index.nearest_tile_of((0, 0), ZoneKind::Farm), Some((2, 2)));
    }
}
