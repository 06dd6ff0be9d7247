//! Tile grid, zone index, pathfinding, and crop growth for the colony
//! simulation.
//!
//! This crate models the physical world: a dense tile grid with terrain and
//! zone layers, an A* pathfinder over that grid, a cached zone-tile index
//! for nearest-zone queries, and the pure growth-rate math used by planted
//! crops.
//!
//! # Modules
//!
//! - [`grid`] -- the tile grid itself: terrain, move-cost, and zone layers.
//! - [`zone_index`] -- cached per-zone-kind tile sets and nearest-tile queries.
//! - [`pathfinder`] -- A* search over the grid's walkable tiles.
//! - [`farming`] -- crop growth-progress math.
//! - [`error`] -- error types for this crate's API boundary.

pub mod error;
pub mod farming;
pub mod grid;
pub mod pathfinder;
pub mod zone_index;

pub use error::WorldError;
pub use farming::{advance_progress, is_ripe, CropState};
pub use grid::{manhattan, Grid, Tile, IMPASSABLE};
pub use pathfinder::find_path;
pub use zone_index::ZoneIndex;
