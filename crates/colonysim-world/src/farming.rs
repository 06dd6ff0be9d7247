//! Crop growth math shared by the Farming system.
//!
//! Crop state itself (`seed` / `growing` / `ripe`, growth progress) lives on
//! the `Crop` component in the component store, keyed by the crop's own
//! entity id -- a crop is planted as its own entity, not attached to a farm
//! plot structure. This module holds the pure growth-rate calculation, kept
//! here (rather than duplicated per caller) and grounded on the teacher's
//! maturity-check idiom in `farming.rs`, re-derived from a tick-countdown to
//! a continuous progress float per the growth formula this system actually
//! specifies.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropState {
    /// Just planted, not yet growing.
    Seed,
    /// Actively accumulating growth progress.
    Growing,
    /// `growth_progress >= 1.0`; eligible for a harvest job.
    Ripe,
}

/// Advance a crop's growth progress by one tick's worth of elapsed game time.
///
/// `days_elapsed` is the fraction of a day this tick covers
/// (`game_hours / 24`). Returns the new progress, clamped to `[0, 1]`.
#[must_use]
pub fn advance_progress(
    current_progress: f64,
    days_elapsed: f64,
    growth_days: f64,
    growth_multiplier: f64,
) -> f64 {
    if growth_days <= 0.0 {
        return 1.0;
    }
    let delta = (1.0 / growth_days) * days_elapsed * growth_multiplier;
    (current_progress + delta).clamp(0.0, 1.0)
}

/// Whether a progress value counts as ripe.
#[must_use]
pub fn is_ripe(progress: f64) -> bool {
    progress >= 1.0
}
