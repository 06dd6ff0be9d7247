//! Needs Update: advances hunger, tiredness, and mood once per tick.
//!
//! Grounded on `original_source/src/systems/needs_system.py`: the mood
//! decay branch is `if`/`elif` (non-cumulative -- only one of the hunger or
//! tiredness conditions ever fires per tick, carried forward unchanged
//! here), and "working" means `Action ∉ {idle, sleep, eat}`.

use colonysim_types::Action;

use crate::config::NeedsConfig;
use crate::entity::EntityManager;

/// Apply one tick of needs mechanics to every entity carrying [`Needs`].
///
/// `game_hours` is the elapsed game time this tick, in hours
/// (`game_dt * 24 / day_length_seconds`). `food_multiplier` is the active
/// season's `food_consumption_multiplier`. `is_night` comes from the Clock.
///
/// [`Needs`]: crate::components::Needs
pub fn update_needs(
    entities: &mut EntityManager,
    config: &NeedsConfig,
    game_hours: f64,
    food_multiplier: f64,
    is_night: bool,
) {
    for id in entities.ids_with_needs() {
        let is_sleeping = entities.action(id) == Some(&Action::Sleep);
        let is_working = entities.action(id).is_some_and(Action::is_working);

        let Some(needs) = entities.needs_mut(id) else {
            continue;
        };

        needs.hunger = (needs.hunger + config.hunger_per_hour * game_hours * food_multiplier).clamp(0.0, 100.0);

        if is_sleeping {
            let change = config.tiredness_per_hour_resting * game_hours;
            needs.tiredness = (needs.tiredness + change).clamp(0.0, 100.0);
        } else if is_working {
            let multiplier = if is_night { 1.5 } else { 1.0 };
            let change = config.tiredness_per_hour_working * game_hours * multiplier;
            needs.tiredness = (needs.tiredness + change).clamp(0.0, 100.0);
        }

        if needs.hunger > config.hunger_mood_threshold || needs.tiredness > config.tiredness_mood_threshold {
            needs.mood = (needs.mood - game_hours).clamp(0.0, 100.0);
        } else {
            needs.mood = (needs.mood + 0.5 * game_hours).clamp(0.0, 100.0);
        }
    }
}
