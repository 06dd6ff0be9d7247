//! Error types for the `colonysim-world` crate.
//!
//! Out-of-bounds grid access and "no path" are not modeled as errors -- the
//! grid's own contract is no-op setters / sentinel getters out of bounds,
//! and an empty path is a valid pathfinder result. `WorldError` covers only
//! the conditions that are genuinely exceptional at this crate's API
//! boundary: duplicate farm registration and arithmetic overflow while
//! advancing crop growth.

use colonysim_types::EntityId;

/// Errors that can occur during world-state operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A farm plot was planted a second time without being harvested or
    /// removed first.
    #[error("structure {0} already has a crop planted")]
    DuplicateFarmPlot(EntityId),

    /// Arithmetic overflow during a checked growth/fuel calculation.
    #[error("arithmetic overflow in world calculation: {context}")]
    ArithmeticOverflow {
        /// What was being computed when the overflow occurred.
        context: &'static str,
    },
}
