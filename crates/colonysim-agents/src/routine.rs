//! Routine: maps the current hour and season to a suggested activity.
//!
//! Grounded on `original_source/src/systems/routine_system.py`:
//! agents currently past an urgent-needs threshold are skipped entirely
//! this tick (the routine component is simply left as-is, not overridden
//! after computing a new suggestion); winter shortens the afternoon work
//! window by 2 hours and shifts sleep 1 hour earlier; summer's "midday
//! rest" adjustment is a no-op in the original and is not implemented here.

use colonysim_types::Season;

use crate::components::Routine as RoutineComponent;
use crate::config::{ScheduleConfig, UrgentThresholds};
use crate::entity::EntityManager;

/// The schedule's suggested activity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineState {
    /// The agent should be asleep.
    Sleeping,
    /// The agent should be eating a meal.
    Eating,
    /// The agent should be doing job work.
    Working,
    /// The agent should be socializing during leisure time.
    Socializing,
}

fn in_range(hour: f64, (start, end): (f64, f64)) -> bool {
    start <= hour && hour < end
}

fn in_sleep_range(hour: f64, (start, end): (f64, f64)) -> bool {
    if start > end {
        hour >= start || hour < end
    } else {
        start <= hour && hour < end
    }
}

fn season_adjusted_schedule(schedule: &ScheduleConfig, season: Season) -> ScheduleConfig {
    let mut adjusted = schedule.clone();
    if season == Season::Winter {
        adjusted.work_afternoon.1 -= 2.0;
        adjusted.sleep.0 -= 1.0;
    }
    adjusted
}

fn suggested_activity(hour: f64, schedule: &ScheduleConfig) -> RoutineState {
    if in_sleep_range(hour, schedule.sleep) {
        return RoutineState::Sleeping;
    }
    if in_range(hour, schedule.breakfast) || in_range(hour, schedule.lunch) || in_range(hour, schedule.dinner) {
        return RoutineState::Eating;
    }
    if in_range(hour, schedule.work_morning) || in_range(hour, schedule.work_afternoon) {
        return RoutineState::Working;
    }
    if in_range(hour, schedule.leisure) {
        return RoutineState::Socializing;
    }
    RoutineState::Working
}

fn next_activity(hour: f64, schedule: &ScheduleConfig) -> RoutineState {
    if hour < schedule.breakfast.0 {
        RoutineState::Eating
    } else if hour < schedule.work_morning.0 {
        RoutineState::Working
    } else if hour < schedule.lunch.0 {
        RoutineState::Eating
    } else if hour < schedule.work_afternoon.1 {
        RoutineState::Working
    } else if hour < schedule.dinner.0 {
        RoutineState::Eating
    } else if hour < schedule.sleep.0 {
        RoutineState::Socializing
    } else {
        RoutineState::Sleeping
    }
}

/// Update every agent's [`RoutineComponent`] suggestion for this tick.
///
/// Agents currently over a Phase-1 urgent-needs threshold (hunger or
/// tiredness) are left untouched -- Agent AI is handling them this tick.
pub fn update_routines(
    entities: &mut EntityManager,
    schedule: &ScheduleConfig,
    urgent: &UrgentThresholds,
    current_hour: f64,
    current_season: Season,
) {
    let schedule = season_adjusted_schedule(schedule, current_season);

    for id in entities.ids_with_routine() {
        if let Some(needs) = entities.needs(id)
            && (needs.hunger > urgent.hunger || needs.tiredness > urgent.tiredness)
        {
            continue;
        }

        let Some(routine) = entities.routine_mut(id) else {
            continue;
        };
        routine.current_state = suggested_activity(current_hour, &schedule);
        routine.next_activity = Some(next_activity(current_hour, &schedule));
    }
}
