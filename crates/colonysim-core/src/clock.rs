//! The World Clock: converts elapsed real time into game time.
//!
//! Grounded on `original_source/src/core/clock.py`: game time is derived
//! from accumulated real-time deltas rather than counted in discrete
//! ticks, so pausing (`game_dt = 0`) and time-scaling fall out of the same
//! `step` formula instead of needing separate code paths.

use colonysim_types::{DayPhase, Season};

/// Real-time input larger than this is clamped before being scaled into
/// game time, so a debugger breakpoint or a dropped frame cannot produce
/// a single catastrophic jump in simulated hours.
const MAX_REAL_DT_SECONDS: f64 = 0.1;

/// Hours bounding the dawn window, half-open `[start, end)`.
const DAWN_HOURS: (f64, f64) = (5.0, 7.0);

/// Hours bounding the dusk window, half-open `[start, end)`.
const DUSK_HOURS: (f64, f64) = (19.0, 21.0);

/// Errors raised constructing or advancing a [`WorldClock`].
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// `season_length_days` was zero, which would divide time into seasons
    /// of no length.
    #[error("season_length_days must be greater than zero")]
    InvalidSeasonLength,
    /// `day_length_seconds` was not a positive number.
    #[error("day_length_seconds must be greater than zero")]
    InvalidDayLength,
    /// The day-night window bounds were not both within `[0, 24)`.
    #[error("day_start_hour and day_end_hour must both be within [0, 24)")]
    InvalidDayWindow,
}

/// Calendar and day-length parameters for a [`WorldClock`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Real-world-feeling length of one in-game day, in seconds, at
    /// `time_scale == 1.0`.
    pub day_length_seconds: f64,
    /// Number of in-game days in one season.
    pub season_length_days: u32,
    /// The season active on day zero.
    pub starting_season: Season,
    /// Hour (inclusive) the configured day window begins.
    pub day_start_hour: f64,
    /// Hour (exclusive) the configured day window ends.
    pub day_end_hour: f64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            day_length_seconds: 86400.0,
            season_length_days: 30,
            starting_season: Season::Spring,
            day_start_hour: 6.0,
            day_end_hour: 20.0,
        }
    }
}

/// Derives calendar time (hour, day, season, day/night) from accumulated
/// real-time deltas.
///
/// `WorldClock` is not a tick counter: each [`step`](Self::step) call folds
/// in however much real time elapsed and returns the corresponding slice of
/// game time, so pausing and time-scaling are just `game_dt == 0` and
/// `game_dt == real_dt * scale` respectively, with no separate code path.
#[derive(Debug, Clone)]
pub struct WorldClock {
    config: TimeConfig,
    paused: bool,
    time_scale: f64,
    hour: f64,
    day: u64,
    season: Season,
}

impl WorldClock {
    /// Build a clock at hour zero of day zero of `config.starting_season`.
    pub fn new(config: TimeConfig) -> Result<Self, ClockError> {
        if config.season_length_days == 0 {
            return Err(ClockError::InvalidSeasonLength);
        }
        if config.day_length_seconds <= 0.0 {
            return Err(ClockError::InvalidDayLength);
        }
        if !(0.0..24.0).contains(&config.day_start_hour) || !(0.0..24.0).contains(&config.day_end_hour) {
            return Err(ClockError::InvalidDayWindow);
        }
        let season = config.starting_season;
        Ok(Self {
            config,
            paused: false,
            time_scale: 1.0,
            hour: 0.0,
            day: 0,
            season,
        })
    }

    /// Fold `real_dt` seconds of wall-clock time into the clock, returning
    /// the game-time delta (in seconds) that elapsed.
    ///
    /// Returns `0.0` while paused. `real_dt` is clamped to
    /// [`MAX_REAL_DT_SECONDS`] before scaling, so a stalled frame cannot
    /// advance the calendar by more than a small bounded amount.
    pub fn step(&mut self, real_dt: f64) -> f64 {
        if self.paused {
            return 0.0;
        }
        let clamped = real_dt.clamp(0.0, MAX_REAL_DT_SECONDS);
        let game_dt = clamped * self.time_scale;

        let hours_elapsed = (game_dt / self.config.day_length_seconds) * 24.0;
        self.hour += hours_elapsed;
        while self.hour >= 24.0 {
            self.hour -= 24.0;
            self.roll_day();
        }
        game_dt
    }

    fn roll_day(&mut self) {
        self.day = self.day.saturating_add(1);
        if self.day % u64::from(self.config.season_length_days) == 0 {
            self.season = self.season.next();
        }
    }

    /// Pause the clock: subsequent `step` calls return `0.0` until resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume a paused clock.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the clock is currently paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the game-time-per-real-second multiplier applied by `step`.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    /// The current game-time-per-real-second multiplier.
    #[must_use]
    pub const fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// The hour of day, in `[0, 24)`.
    #[must_use]
    pub const fn hour(&self) -> f64 {
        self.hour
    }

    /// The number of in-game days elapsed since the clock started.
    #[must_use]
    pub const fn day(&self) -> u64 {
        self.day
    }

    /// The current season.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// The clock's time-of-day configuration.
    #[must_use]
    pub const fn config(&self) -> &TimeConfig {
        &self.config
    }

    /// Whether `hour` falls within the configured day window, excluding
    /// the dawn and dusk transition windows.
    #[must_use]
    pub fn is_daytime(&self, hour: f64) -> bool {
        self.day_phase(hour) == DayPhase::Day
    }

    /// Classify `hour` into one of the four day phases.
    ///
    /// Dawn is fixed at `[5, 7)` and dusk at `[19, 21)`; the configured day
    /// window (default `[6, 20)`) governs everything outside those two
    /// transition bands, and anything left over is night.
    #[must_use]
    pub fn day_phase(&self, hour: f64) -> DayPhase {
        if in_window(hour, DAWN_HOURS) {
            DayPhase::Dawn
        } else if in_window(hour, DUSK_HOURS) {
            DayPhase::Dusk
        } else if in_window(hour, (self.config.day_start_hour, self.config.day_end_hour)) {
            DayPhase::Day
        } else {
            DayPhase::Night
        }
    }
}

/// `true` if `hour` lies within the half-open window `[start, end)`,
/// wrapping past midnight when `start > end`.
fn in_window(hour: f64, (start, end): (f64, f64)) -> bool {
    if start <= end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}
