//! Closed enumerations shared across the simulation: terrain, zones, the
//! calendar, and the structured-log category taxonomy.
//!
//! Open-vocabulary identifiers (item kinds, crop kinds, skill kinds -- all
//! driven by configuration rather than a fixed Rust enum) live in [`crate::
//! kind`] instead.

use serde::{Deserialize, Serialize};

/// Terrain kind occupying a grid tile.
///
/// Stable small-integer ids at the external boundary (grid / zone table):
/// grass=0, dirt=1, water=2, stone=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Default walkable terrain.
    Grass,
    /// Walkable terrain, visually distinct from grass.
    Dirt,
    /// Impassable; move-cost is the grid's impassable sentinel.
    Water,
    /// Walkable terrain.
    Stone,
}

impl TerrainKind {
    /// Stable boundary id for this terrain kind.
    #[must_use]
    pub const fn boundary_id(self) -> i32 {
        match self {
            Self::Grass => 0,
            Self::Dirt => 1,
            Self::Water => 2,
            Self::Stone => 3,
        }
    }

    /// Whether a tile of this terrain kind is walkable absent any other
    /// move-cost override. Water is the only impassable terrain kind.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Water)
    }
}

/// Zone tag occupying a grid tile, used as a destination class by jobs and
/// agent AI (stockpile, farm, residential).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// No zone assigned.
    None,
    /// Destination for hauled items.
    Stockpile,
    /// Plantable/harvestable farmland.
    Farm,
    /// Sleeping destination for tired agents.
    Residential,
}

impl ZoneKind {
    /// Stable boundary id for this zone kind.
    #[must_use]
    pub const fn boundary_id(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Stockpile => 1,
            Self::Farm => 2,
            Self::Residential => 3,
        }
    }
}

/// A calendar season. Advances spring -> summer -> autumn -> winter -> spring
/// every `season_length_days` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// Spring.
    Spring,
    /// Summer.
    Summer,
    /// Autumn.
    Autumn,
    /// Winter.
    Winter,
}

impl Season {
    /// The season following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Lowercase name matching configuration key paths
    /// (`time.seasons.<name>`).
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

/// Four-valued day/night state, derived from the current hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPhase {
    /// `[5, 7)`.
    Dawn,
    /// The configured day window minus dawn and dusk.
    Day,
    /// `[19, 21)`.
    Dusk,
    /// Everything else.
    Night,
}

/// Structured-log category taxonomy. Carried as a `category` field on
/// `tracing` events rather than a bespoke sink, so a collaborator gets the
/// same four-part `(timestamp, tick, category, message)` shape for free
/// from any `tracing_subscriber` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogCategory {
    /// Engine/infrastructure events: config fallback, clock overflow, startup.
    System,
    /// World-state events: chopped tree, harvested crop, crafted item.
    Gameplay,
    /// Agent decision-making events: job accepted, target unreachable.
    Ai,
    /// Presentation-layer events (reserved; the core itself never emits these).
    Render,
    /// Input-dispatch events (reserved; the core itself never emits these).
    Input,
    /// Unrecoverable or noteworthy failure events.
    Error,
}

impl LogCategory {
    /// The string carried as the `category` field on the `tracing` event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::Gameplay => "GAMEPLAY",
            Self::Ai => "AI",
            Self::Render => "RENDER",
            Self::Input => "INPUT",
            Self::Error => "ERROR",
        }
    }
}

impl core::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_boundary_ids_match_spec_table() {
        assert_eq!(TerrainKind::Grass.boundary_id(), 0);
        assert_eq!(TerrainKind::Dirt.boundary_id(), 1);
        assert_eq!(TerrainKind::Water.boundary_id(), 2);
        assert_eq!(TerrainKind::Stone.boundary_id(), 3);
    }

    #[test]
    fn zone_boundary_ids_match_spec_table() {
        assert_eq!(ZoneKind::None.boundary_id(), 0);
        assert_eq!(ZoneKind::Stockpile.boundary_id(), 1);
        assert_eq!(ZoneKind::Farm.boundary_id(), 2);
        assert_eq!(ZoneKind::Residential.boundary_id(), 3);
    }

    #[test]
    fn water_is_the_only_impassable_terrain() {
        assert!(!TerrainKind::Water.is_walkable());
        assert!(TerrainKind::Grass.is_walkable());
        assert!(TerrainKind::Dirt.is_walkable());
        assert!(TerrainKind::Stone.is_walkable());
    }

    #[test]
    fn season_cycles_back_to_spring() {
        let s = Season::Spring;
        assert_eq!(s.next().next().next().next(), s);
    }

    #[test]
    fn log_category_display_matches_taxonomy_name() {
        assert_eq!(LogCategory::Ai.to_string(), "AI");
        assert_eq!(LogCategory::Gameplay.to_string(), "GAMEPLAY");
    }
}
