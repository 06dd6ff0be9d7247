//! The tile grid: a dense 2-D array with terrain, move-cost, and zone
//! layers.
//!
//! Grounded algorithmically on `src/world/grid.py` (layered array, no-op
//! out-of-bounds setters, sentinel out-of-bounds getters), re-expressed as
//! flat `Vec<T>` layers indexed by `y * width + x` instead of a `numpy`
//! three-dimensional array -- the teacher's own dense-collection style
//! (`world_map.rs`'s `BTreeMap`-per-concern layout) favors one typed
//! collection per concern over a single multi-typed tensor.

use colonysim_types::{TerrainKind, ZoneKind};

/// Move-cost value treated as impassable.
pub const IMPASSABLE: u8 = 255;

/// Move-cost value for ordinary walkable terrain.
pub const DEFAULT_MOVE_COST: u8 = 1;

/// A tile coordinate. Signed so that out-of-bounds queries (negative
/// coordinates) are representable without wrapping.
pub type Tile = (i32, i32);

/// A dense 2-D tile grid with terrain, move-cost, and zone layers.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    terrain: Vec<TerrainKind>,
    move_cost: Vec<u8>,
    zone: Vec<ZoneKind>,
}

impl Grid {
    /// Create a new grid of the given dimensions, all grass, all walkable,
    /// no zones assigned.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let area = usize::try_from(width.max(0)).unwrap_or(0) * usize::try_from(height.max(0)).unwrap_or(0);
        Self {
            width,
            height,
            terrain: vec![TerrainKind::Grass; area],
            move_cost: vec![DEFAULT_MOVE_COST; area],
            zone: vec![ZoneKind::None; area],
        }
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(y.checked_mul(width)?.checked_add(x)?)
    }

    /// Set the terrain at `(x, y)`, updating move-cost in lockstep (water
    /// becomes impassable, everything else becomes the default move cost).
    /// A no-op out of bounds.
    pub fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainKind) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if let Some(slot) = self.terrain.get_mut(idx) {
            *slot = terrain;
        }
        let cost = if terrain.is_walkable() {
            DEFAULT_MOVE_COST
        } else {
            IMPASSABLE
        };
        if let Some(slot) = self.move_cost.get_mut(idx) {
            *slot = cost;
        }
    }

    /// Get the terrain at `(x, y)`, or `None` out of bounds (the boundary
    /// sentinel `-1` from the distilled spec is represented here as `None`
    /// rather than a magic terrain value, since `TerrainKind` is a closed
    /// enum with no room for a sentinel variant).
    #[must_use]
    pub fn terrain(&self, x: i32, y: i32) -> Option<TerrainKind> {
        self.index(x, y).and_then(|idx| self.terrain.get(idx).copied())
    }

    /// Directly override the move-cost at `(x, y)` (e.g. difficult terrain
    /// within a walkable tile). A no-op out of bounds.
    pub fn set_move_cost(&mut self, x: i32, y: i32, cost: u8) {
        if let Some(idx) = self.index(x, y) {
            if let Some(slot) = self.move_cost.get_mut(idx) {
                *slot = cost;
            }
        }
    }

    /// Move-cost at `(x, y)`; `IMPASSABLE` out of bounds.
    #[must_use]
    pub fn move_cost(&self, x: i32, y: i32) -> u8 {
        self.index(x, y)
            .and_then(|idx| self.move_cost.get(idx).copied())
            .unwrap_or(IMPASSABLE)
    }

    /// Whether `(x, y)` is walkable: in bounds and move-cost below
    /// [`IMPASSABLE`].
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.move_cost(x, y) < IMPASSABLE
    }

    /// Set the zone tag at `(x, y)`. A no-op out of bounds. Callers that
    /// need the zone index kept consistent should go through
    /// [`crate::zone_index::ZoneIndex::mark`] instead of calling this
    /// directly.
    pub fn set_zone(&mut self, x: i32, y: i32, zone: ZoneKind) {
        if let Some(idx) = self.index(x, y) {
            if let Some(slot) = self.zone.get_mut(idx) {
                *slot = zone;
            }
        }
    }

    /// Zone tag at `(x, y)`; `ZoneKind::None` out of bounds.
    #[must_use]
    pub fn zone(&self, x: i32, y: i32) -> ZoneKind {
        self.index(x, y)
            .and_then(|idx| self.zone.get(idx).copied())
            .unwrap_or(ZoneKind::None)
    }

    /// The four 4-connected neighbor tiles of `(x, y)`, in a fixed order
    /// (east, west, south, north), without any bounds or walkability
    /// filtering.
    #[must_use]
    pub fn neighbors4(x: i32, y: i32) -> [Tile; 4] {
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
    }

    /// The 4-connected neighbors of `(x, y)` that are walkable, closest
    /// first (ties broken by the fixed `neighbors4` order).
    #[must_use]
    pub fn walkable_neighbors4(&self, x: i32, y: i32) -> Vec<Tile> {
        let mut neighbors: Vec<Tile> = Self::neighbors4(x, y)
            .into_iter()
            .filter(|&(nx, ny)| self.is_walkable(nx, ny))
            .collect();
        neighbors.sort_by_key(|&(nx, ny)| manhattan((x, y), (nx, ny)));
        neighbors
    }
}

/// Manhattan distance between two tiles.
#[must_use]
pub fn manhattan(a: Tile, b: Tile) -> i64 {
    let dx = i64::from(a.0) - i64::from(b.0);
    let dy = i64::from(a.1) - i64::from(b.1);
    dx.abs().saturating_add(dy.abs())
}
