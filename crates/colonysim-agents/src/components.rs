//! Component data records stored per entity in the [`crate::entity::EntityManager`].
//!
//! Grounded on `original_source/src/components/data_components.py`'s plain
//! dataclass-per-component catalog, re-expressed as Rust structs/enums. Each
//! component is a plain data record; behavior lives in the system modules
//! that operate on them.

use std::collections::BTreeMap;

use colonysim_types::{Action, EntityId, JobId, Kind};
use colonysim_world::{CropState, Tile};

/// Integer tile position. Mutated only by the Action Executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Tile x coordinate.
    pub x: i32,
    /// Tile y coordinate.
    pub y: i32,
}

impl Position {
    /// Construct a position at the given tile.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This position as a `(x, y)` tuple, the shape the world crate's grid
    /// and pathfinder functions expect.
    #[must_use]
    pub const fn tile(self) -> Tile {
        (self.x, self.y)
    }
}

/// Remaining path and movement state for an entity currently walking.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Movement {
    /// Remaining tiles to visit, in order; the first tile is 4-adjacent to
    /// the entity's current [`Position`].
    pub path: Vec<Tile>,
    /// Tiles traversed per game-second.
    pub speed: f64,
    /// The ultimate destination tile, if a walk is in progress.
    pub target: Option<Tile>,
    /// Fractional progress toward the next tile in `path`, in `[0, 1)`.
    pub progress: f64,
}

/// A harvestable/choppable world object: trees, ore veins, and similar.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceComponent {
    /// The resource kind, e.g. `tree_oak`.
    pub kind: Kind,
    /// Current remaining health.
    pub health: f64,
    /// Health at full integrity.
    pub max_health: f64,
    /// Item kind to `[min, max]` drop amount when the resource is depleted.
    pub drop_table: BTreeMap<Kind, (u32, u32)>,
}

/// A dropped or carried item entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemComponent {
    /// The item kind.
    pub kind: Kind,
    /// Stack amount.
    pub amount: u32,
    /// Hunger points restored per unit eaten; zero means non-food.
    pub food_value: f64,
}

/// An entity's carried items, subject to a capacity limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryComponent {
    /// Item kind to held count.
    pub items: BTreeMap<Kind, u32>,
    /// Maximum total units this inventory can hold.
    pub capacity: u32,
}

/// An entity's skill proficiencies, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillComponent {
    /// Skill kind to proficiency level.
    pub proficiencies: BTreeMap<Kind, f64>,
}

impl SkillComponent {
    /// Proficiency in the given skill, or `0.0` if the agent has never
    /// practiced it.
    #[must_use]
    pub fn level(&self, kind: &Kind) -> f64 {
        self.proficiencies.get(kind).copied().unwrap_or(0.0)
    }
}

/// The job an agent is currently assigned to, mirroring a Job Board record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobComponent {
    /// The Job Board record this component mirrors.
    pub job_id: JobId,
    /// The kind of work.
    pub kind: crate::job::JobKind,
    /// Destination tile for the work, if any.
    pub target_tile: Option<Tile>,
    /// Target entity for the work, if any (e.g. the tree being chopped).
    pub target_entity: Option<EntityId>,
}

/// Hunger, tiredness, and mood, each clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needs {
    /// How hungry the agent is; higher is worse.
    pub hunger: f64,
    /// How tired the agent is; higher is worse.
    pub tiredness: f64,
    /// General morale; higher is better.
    pub mood: f64,
}

impl Default for Needs {
    fn default() -> Self {
        // Mood starts at 50.0 per original_source, not 0 -- a freshly
        // spawned agent is neither despondent nor euphoric.
        Self { hunger: 0.0, tiredness: 0.0, mood: 50.0 }
    }
}

/// How cold an agent is, clamped to `[0, 100]`. Kept separate from
/// [`Needs`] since it is optional -- not every entity with needs tracks
/// cold (e.g. a test fixture villager with no winter exposure modeled).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cold {
    /// Current cold level.
    pub cold: f64,
}

/// A planted crop's lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    /// The crop kind, e.g. `wheat`.
    pub kind: Kind,
    /// Growth progress in `[0, 1]`.
    pub growth_progress: f64,
    /// Current lifecycle stage.
    pub state: CropState,
}

/// Whether an agent is currently asleep, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SleepState {
    /// Whether the agent is sleeping right now.
    pub is_sleeping: bool,
    /// The bed tile the agent is using, if any.
    pub bed_tile: Option<Tile>,
}

/// An agent's daily-schedule-suggested activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routine {
    /// The schedule's current suggestion.
    pub current_state: crate::routine::RoutineState,
    /// The next scheduled activity, if known.
    pub next_activity: Option<crate::routine::RoutineState>,
}

/// A placed animal trap.
#[derive(Debug, Clone, PartialEq)]
pub struct Trap {
    /// The trap kind (affects catch table, currently unused beyond naming).
    pub kind: Kind,
    /// Remaining structural durability.
    pub durability: f64,
    /// Durability at full integrity.
    pub max_durability: f64,
    /// Base probability of a successful catch per check.
    pub catch_probability: f64,
}

impl Default for Trap {
    fn default() -> Self {
        Self {
            kind: Kind::new("snare"),
            durability: 10.0,
            max_durability: 10.0,
            catch_probability: 0.15,
        }
    }
}

/// A burning fire providing warmth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fire {
    /// Remaining fuel, in logs-equivalent units.
    pub fuel_remaining: f64,
    /// Manhattan radius within which the fire provides warmth.
    pub warmth_radius: i32,
    /// Fuel consumed per elapsed game-hour.
    pub fuel_consumption_per_hour: f64,
}

impl Default for Fire {
    fn default() -> Self {
        Self { fuel_remaining: 10.0, warmth_radius: 5, fuel_consumption_per_hour: 1.0 }
    }
}

/// Wear tracking for an equippable tool.
///
/// Implements the distilled spec's Open Question resolution: tool
/// durability is modeled, rather than left as the original's unapplied
/// stub.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Durability {
    /// Remaining durability.
    pub durability: f64,
    /// Durability at full integrity.
    pub max_durability: f64,
    /// Durability lost per successful use.
    pub durability_loss_per_use: f64,
}
