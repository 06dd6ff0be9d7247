//! Configuration for agent vitals, schedule, farming, and survival systems.
//!
//! Mirrors the distilled spec's `entities.*` configuration sections as
//! strongly-typed, `#[serde(default)]`-annotated structs rather than the
//! original's dynamic dot-path lookup, matching the teacher's
//! `VitalsConfig` pattern: every tunable has a documented default, and a
//! missing field falls back to it (the caller that deserializes the whole
//! document logs a SYSTEM warning per missing top-level section; see
//! `colonysim-core`'s configuration loader).

use std::collections::BTreeMap;

use colonysim_types::Kind;
use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` hour interval. `start > end` means the
/// interval wraps past midnight (used by `sleep`).
pub type HourRange = (f64, f64);

/// Needs-update rates, from `entities.villager.needs.*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsConfig {
    /// Hunger points gained per game-hour.
    pub hunger_per_hour: f64,
    /// Tiredness points gained per game-hour while working.
    pub tiredness_per_hour_working: f64,
    /// Tiredness points lost per game-hour while sleeping (negative).
    pub tiredness_per_hour_resting: f64,
    /// Cold points gained per game-hour during the day.
    pub cold_gain_per_hour_day: f64,
    /// Cold points gained per game-hour at night.
    pub cold_gain_per_hour_night: f64,
    /// Base probability of cold damage per game-hour, before multipliers.
    pub cold_damage_probability_base: f64,
    /// Hunger threshold above which mood begins decaying.
    pub hunger_mood_threshold: f64,
    /// Tiredness threshold above which mood begins decaying.
    pub tiredness_mood_threshold: f64,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            hunger_per_hour: 2.0,
            tiredness_per_hour_working: 5.0,
            tiredness_per_hour_resting: -10.0,
            cold_gain_per_hour_day: 1.0,
            cold_gain_per_hour_night: 5.0,
            cold_damage_probability_base: 0.1,
            hunger_mood_threshold: 80.0,
            tiredness_mood_threshold: 90.0,
        }
    }
}

/// Daily schedule, from `entities.villager.daily_schedule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Breakfast window.
    pub breakfast: HourRange,
    /// Morning work window.
    pub work_morning: HourRange,
    /// Lunch window.
    pub lunch: HourRange,
    /// Afternoon work window.
    pub work_afternoon: HourRange,
    /// Dinner window.
    pub dinner: HourRange,
    /// Leisure window.
    pub leisure: HourRange,
    /// Sleep window; `start > end` wraps past midnight.
    pub sleep: HourRange,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            breakfast: (6.0, 8.0),
            work_morning: (8.0, 12.0),
            lunch: (12.0, 13.0),
            work_afternoon: (13.0, 18.0),
            dinner: (18.0, 19.0),
            leisure: (19.0, 22.0),
            sleep: (22.0, 6.0),
        }
    }
}

/// Movement/work parameters, from `entities.villager.*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillagerConfig {
    /// Tiles walked per game-second.
    pub move_speed: f64,
    /// Base resource health removed per game-second while chopping.
    pub chop_speed: f64,
    /// Starting skill proficiencies for newly created villagers.
    pub default_skills: BTreeMap<Kind, f64>,
    /// Urgent-needs thresholds and rates.
    pub needs: NeedsConfig,
    /// Daily schedule windows.
    pub daily_schedule: ScheduleConfig,
}

impl Default for VillagerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            chop_speed: 5.0,
            default_skills: BTreeMap::new(),
            needs: NeedsConfig::default(),
            daily_schedule: ScheduleConfig::default(),
        }
    }
}

/// Trapping parameters, from `entities.trapping`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrappingConfig {
    /// Base catch probability before skill bonus.
    pub trap_catch_probability_base: f64,
    /// Catch probability added per point of trapping skill.
    pub trap_catch_probability_per_skill: f64,
    /// Durability of a freshly placed trap.
    pub trap_durability: f64,
    /// Minimum trapping skill required to use the trap-food fallback.
    pub trapping_skill_threshold: f64,
    /// Manhattan search radius for an existing trap.
    pub search_radius: i32,
}

impl Default for TrappingConfig {
    fn default() -> Self {
        Self {
            trap_catch_probability_base: 0.15,
            trap_catch_probability_per_skill: 0.3,
            trap_durability: 10.0,
            trapping_skill_threshold: 0.1,
            search_radius: 15,
        }
    }
}

/// Fishing parameters, from `entities.fishing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingConfig {
    /// Base catch probability before skill bonus.
    pub fishing_catch_probability_base: f64,
    /// Catch probability added per point of fishing skill.
    pub fishing_catch_probability_per_skill: f64,
    /// Game-seconds required per fishing attempt.
    pub fishing_time_per_attempt_seconds: f64,
    /// Hours of day with a catch-probability bonus.
    pub fishing_best_hours: Vec<f64>,
    /// Catch-probability bonus during `fishing_best_hours`.
    pub fishing_best_hours_bonus: f64,
    /// Minimum fishing skill required to use the fish-food fallback.
    pub fishing_skill_threshold: f64,
    /// Manhattan search radius for a water tile.
    pub search_radius: i32,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            fishing_catch_probability_base: 0.2,
            fishing_catch_probability_per_skill: 0.3,
            fishing_time_per_attempt_seconds: 8.0,
            fishing_best_hours: vec![6.0, 7.0, 18.0, 19.0],
            fishing_best_hours_bonus: 0.15,
            fishing_skill_threshold: 0.1,
            search_radius: 20,
        }
    }
}

/// Fire parameters, from `entities.fire`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Logs consumed to create a new fire.
    pub fire_creation_cost_logs: u32,
    /// Manhattan radius within which a fire warms entities.
    pub fire_warmth_radius: i32,
    /// Fuel consumed per game-hour.
    pub fire_fuel_consumption_per_hour: f64,
    /// Cold reduced per game-hour for an entity within warmth radius.
    pub fire_cold_reduction_per_hour: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            fire_creation_cost_logs: 1,
            fire_warmth_radius: 5,
            fire_fuel_consumption_per_hour: 1.0,
            fire_cold_reduction_per_hour: 10.0,
        }
    }
}

/// Per-crop-kind configuration, from `entities.crops.<kind>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Days of growth (at multiplier 1.0) from seed to ripe.
    pub growth_days: f64,
    /// Harvest yield: item kind to `[min, max]` amount.
    pub yield_table: BTreeMap<Kind, (u32, u32)>,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self { growth_days: 3.0, yield_table: BTreeMap::new() }
    }
}

/// Per-item-kind configuration, from `entities.items.<kind>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Hunger points restored per unit eaten; zero means non-food.
    pub food_value: f64,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self { food_value: 0.0 }
    }
}

/// Per-tool-kind configuration, from `entities.tools.<kind>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Multiplier applied to the base action speed while equipped.
    pub efficiency: f64,
    /// Durability lost per successful use.
    pub durability_loss_per_use: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { efficiency: 1.0, durability_loss_per_use: 1.0 }
    }
}

/// Job generation cadence and caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobGenerationConfig {
    /// Job generation runs at most once every this many ticks.
    pub interval_ticks: u32,
    /// Maximum number of outstanding chop jobs generated automatically.
    pub max_chop_jobs: usize,
    /// Manhattan search radius for dropped food during urgent hunger.
    pub food_search_radius: i32,
}

impl Default for JobGenerationConfig {
    fn default() -> Self {
        Self { interval_ticks: 10, max_chop_jobs: 10, food_search_radius: 30 }
    }
}

/// Urgent-needs thresholds shared by Routine and Agent AI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgentThresholds {
    /// Hunger above which Phase 1 pre-empts the agent's current job.
    pub hunger: f64,
    /// Tiredness above which Phase 1 pre-empts the agent's current job.
    pub tiredness: f64,
}

impl Default for UrgentThresholds {
    fn default() -> Self {
        Self { hunger: 80.0, tiredness: 90.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn villager_config_defaults() {
        let cfg = VillagerConfig::default();
        assert_eq!(cfg.move_speed, 5.0);
        assert_eq!(cfg.needs.hunger_per_hour, 2.0);
    }

    #[test]
    fn job_generation_defaults() {
        let cfg = JobGenerationConfig::default();
        assert_eq!(cfg.interval_ticks, 10);
        assert_eq!(cfg.max_chop_jobs, 10);
    }

    #[test]
    fn urgent_thresholds_match_spec() {
        let cfg = UrgentThresholds::default();
        assert_eq!(cfg.hunger, 80.0);
        assert_eq!(cfg.tiredness, 90.0);
    }
}
