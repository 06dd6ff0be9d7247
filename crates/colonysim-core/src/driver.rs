//! The Simulation Driver: owns every system's state and steps the fixed
//! `Clock -> Needs -> Routine -> Farming -> Survival -> AI -> Action`
//! tick order.
//!
//! Grounded on `original_source/src/core/simulation.py`'s orchestration
//! role, but single-threaded and command-queue-free: this data model has
//! no concurrent writer to guard against, so controller commands apply
//! directly between ticks rather than through the teacher's
//! atomics-and-`Notify` handoff.

use std::collections::BTreeMap;

use colonysim_agents::config::UrgentThresholds;
use colonysim_agents::entity::EntityManager;
use colonysim_agents::job::JobBoard;
use colonysim_agents::ActionConfig;
use colonysim_types::{EntityId, IdSpaceExhausted, Season, ZoneKind};
use colonysim_world::{Grid, Tile, ZoneIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::clock::WorldClock;
use crate::config::SimulationConfig;

/// Errors raised stepping or commanding a [`SimulationDriver`].
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The clock could not be constructed from the loaded configuration.
    #[error("invalid clock configuration: {0}")]
    Clock(#[from] crate::clock::ClockError),
    /// The entity-id space was exhausted generating jobs or spawning an
    /// item, crop, trap, or fire this tick.
    #[error("entity-id space exhausted: {0}")]
    IdSpace(#[from] IdSpaceExhausted),
    /// A controller command referenced an entity that no longer exists.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
}

/// A command the presentation layer submits between ticks.
///
/// Applied only by [`SimulationDriver::apply_command`], never mid-tick --
/// the single-threaded tick loop has no concurrent writer to guard
/// against, so commands simply wait for the next `apply_command` call
/// rather than being queued for a lock-protected drain.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerCommand {
    /// Pause the clock.
    Pause,
    /// Resume a paused clock.
    Resume,
    /// Set the clock's game-time-per-real-second multiplier.
    SetTimeScale(f64),
    /// Mark an entity as the presentation layer's selection. The driver
    /// only validates the entity exists; selection state itself lives in
    /// the presentation layer.
    SelectEntity(EntityId),
    /// Request that an entity path to a tile.
    RequestMoveTo(EntityId, Tile),
    /// Request that one entity interact with another (e.g. pick up an
    /// item). Left unimplemented pending a richer interaction model; the
    /// entities are validated and an AI informational event is logged.
    RequestInteract(EntityId, EntityId),
    /// Paint a zone tag onto a tile.
    PlaceZone(Tile, ZoneKind),
}

/// A read-only snapshot of calendar state after a completed tick, for
/// presentation or a headless runner to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    /// Monotonic tick counter, incremented once per [`SimulationDriver::step`] call.
    pub tick: u64,
    /// In-game day.
    pub day: u64,
    /// Hour of day, in `[0, 24)`.
    pub hour: f64,
    /// Current season.
    pub season: Season,
    /// Current day phase.
    pub day_phase: colonysim_types::DayPhase,
    /// Number of live entities.
    pub entity_count: usize,
    /// Number of outstanding (unassigned or assigned, not yet completed) jobs.
    pub job_count: usize,
}

/// Owns every system's state and advances it one real-time step at a time.
pub struct SimulationDriver {
    clock: WorldClock,
    grid: Grid,
    zone_index: ZoneIndex,
    entities: EntityManager,
    jobs: JobBoard,
    config: SimulationConfig,
    rng: StdRng,
    tick: u64,
    last_job_gen_tick: u64,
    fishing_progress: BTreeMap<EntityId, f64>,
    elapsed_game_seconds: f64,
    last_logged_second: f64,
}

impl SimulationDriver {
    /// Build a driver from a loaded configuration document, with an empty
    /// grid of the configured dimensions and no entities.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Clock`] if `config`'s time section does not
    /// form a valid clock (e.g. `season_length_days == 0`).
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        let clock = WorldClock::new(config.time_config())?;
        let grid = Grid::new(config.world.width, config.world.height);
        let zone_index = ZoneIndex::from_grid(&grid);
        let rng = StdRng::seed_from_u64(config.world.seed);

        Ok(Self {
            clock,
            grid,
            zone_index,
            entities: EntityManager::new(),
            jobs: JobBoard::new(),
            config,
            rng,
            tick: 0,
            last_job_gen_tick: 0,
            fishing_progress: BTreeMap::new(),
            elapsed_game_seconds: 0.0,
            last_logged_second: 0.0,
        })
    }

    /// Advance the simulation by `real_dt` seconds of wall-clock time,
    /// running every system phase in the fixed order:
    /// Clock, Needs, Routine, Farming, Survival, Agent AI, Action Executor.
    /// Emits one SYSTEM-category heartbeat log per simulated game-second.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IdSpace`] if the entity- or job-id space is
    /// exhausted while generating jobs or spawning an item, crop, trap, or
    /// fire this tick. The tick is not retried or rolled back; by the
    /// error-handling policy this crate follows, only an id-space
    /// exhaustion aborts a tick early -- every other per-entity failure is
    /// localized to that entity.
    pub fn step(&mut self, real_dt: f64) -> Result<TickSummary, SimError> {
        self.tick = self.tick.saturating_add(1);

        let game_dt = self.clock.step(real_dt);
        self.elapsed_game_seconds += game_dt;
        if self.elapsed_game_seconds - self.last_logged_second >= 1.0 {
            self.last_logged_second = self.elapsed_game_seconds;
            info!(category = "SYSTEM", tick = self.tick, day = self.clock.day(), hour = self.clock.hour(), "simulation heartbeat");
        }

        let day_length_seconds = self.config.time_config().day_length_seconds;
        let game_hours = (game_dt / day_length_seconds) * 24.0;
        let days_elapsed = game_dt / day_length_seconds;
        let hour = self.clock.hour();
        let season = self.clock.season();
        let is_night = self.clock.day_phase(hour) == colonysim_types::DayPhase::Night;
        let season_cfg = self.config.season_config(season);

        colonysim_agents::update_needs(
            &mut self.entities,
            &self.config.entities.villager.needs,
            game_hours,
            season_cfg.food_consumption_multiplier,
            is_night,
        );

        let urgent = UrgentThresholds {
            hunger: self.config.entities.villager.needs.hunger_mood_threshold,
            tiredness: self.config.entities.villager.needs.tiredness_mood_threshold,
        };
        colonysim_agents::update_routines(&mut self.entities, &self.config.entities.villager.daily_schedule, &urgent, hour, season);

        colonysim_agents::farming::update_crops(&mut self.entities, &self.config.entities.crops, days_elapsed, season_cfg.crop_growth_multiplier);
        colonysim_agents::farming::enqueue_harvest_jobs(&self.entities, &mut self.jobs)?;

        colonysim_agents::update_fires(&mut self.entities, game_hours, &self.config.entities.fire);
        colonysim_agents::update_cold(
            &mut self.entities,
            game_hours,
            &self.config.entities.fire,
            self.config.entities.villager.needs.cold_gain_per_hour_day,
            self.config.entities.villager.needs.cold_gain_per_hour_night,
            season_cfg.cold_gain_multiplier,
            is_night,
        );
        colonysim_agents::apply_cold_damage(
            &self.entities,
            &mut self.rng,
            game_hours,
            self.config.entities.villager.needs.cold_damage_probability_base,
            season_cfg.cold_damage_probability_multiplier,
            is_night,
        );

        colonysim_agents::generate_jobs(&self.entities, &mut self.jobs, &self.grid, &self.config.job_generation, self.tick, &mut self.last_job_gen_tick)?;
        colonysim_agents::run_urgent_needs(
            &mut self.entities,
            &mut self.jobs,
            &self.grid,
            &self.zone_index,
            &self.config.entities.items,
            &self.config.entities.trapping,
            &self.config.entities.fishing,
            &urgent,
        );
        colonysim_agents::run_job_execution(&mut self.entities, &mut self.jobs, &self.grid, &self.zone_index);
        colonysim_agents::run_job_discovery(&mut self.entities, &mut self.jobs);

        let action_config = ActionConfig {
            villager: &self.config.entities.villager,
            items: &self.config.entities.items,
            crops: &self.config.entities.crops,
            trapping: &self.config.entities.trapping,
            fishing: &self.config.entities.fishing,
            fire: &self.config.entities.fire,
        };
        colonysim_agents::execute_actions(&mut self.entities, &self.grid, &mut self.rng, &action_config, &mut self.fishing_progress, game_dt, day_length_seconds, hour)?;

        Ok(TickSummary {
            tick: self.tick,
            day: self.clock.day(),
            hour: self.clock.hour(),
            season: self.clock.season(),
            day_phase: self.clock.day_phase(self.clock.hour()),
            entity_count: self.entities.all_entities().len(),
            job_count: self.jobs.len(),
        })
    }

    /// Apply a command from the presentation layer. Only valid between
    /// ticks -- never called from within [`Self::step`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EntityNotFound`] if a command names an entity
    /// that does not exist.
    pub fn apply_command(&mut self, command: ControllerCommand) -> Result<(), SimError> {
        match command {
            ControllerCommand::Pause => self.clock.pause(),
            ControllerCommand::Resume => self.clock.resume(),
            ControllerCommand::SetTimeScale(scale) => self.clock.set_time_scale(scale),
            ControllerCommand::SelectEntity(id) => {
                if !self.entities.has_entity(id) {
                    return Err(SimError::EntityNotFound(id));
                }
            }
            ControllerCommand::RequestMoveTo(id, tile) => {
                if !self.entities.has_entity(id) {
                    return Err(SimError::EntityNotFound(id));
                }
                if let Some(movement) = self.entities.movement_mut(id) {
                    movement.target = Some(tile);
                    movement.path.clear();
                }
                self.entities.add_action(id, colonysim_types::Action::Move);
            }
            ControllerCommand::RequestInteract(actor, target) => {
                if !self.entities.has_entity(actor) {
                    return Err(SimError::EntityNotFound(actor));
                }
                if !self.entities.has_entity(target) {
                    return Err(SimError::EntityNotFound(target));
                }
                info!(category = "AI", actor = %actor, target = %target, "interact requested");
            }
            ControllerCommand::PlaceZone((x, y), kind) => {
                self.zone_index.mark(&mut self.grid, x, y, kind);
            }
        }
        Ok(())
    }

    /// Create a new entity with no components.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IdSpace`] if the entity-id space is exhausted.
    pub fn spawn_entity(&mut self) -> Result<EntityId, SimError> {
        self.entities.create_entity().map_err(SimError::IdSpace)
    }

    /// The world grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The world grid, mutably -- for world-generation callers that paint
    /// terrain before the first tick.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The zone index.
    #[must_use]
    pub const fn zone_index(&self) -> &ZoneIndex {
        &self.zone_index
    }

    /// The zone index, mutably.
    pub fn zone_index_mut(&mut self) -> &mut ZoneIndex {
        &mut self.zone_index
    }

    /// The entity-component store.
    #[must_use]
    pub const fn entities(&self) -> &EntityManager {
        &self.entities
    }

    /// The entity-component store, mutably -- for world-generation
    /// callers that create and populate entities before the first tick.
    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    /// The job board.
    #[must_use]
    pub const fn jobs(&self) -> &JobBoard {
        &self.jobs
    }

    /// The clock.
    #[must_use]
    pub const fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// The loaded configuration document.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
