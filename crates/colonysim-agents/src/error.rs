//! Error types for the `colonysim-agents` crate.
//!
//! Covers only conditions that are genuinely exceptional at this crate's API
//! boundary (an unknown job id, inventory capacity exceeded, arithmetic
//! overflow). Precondition violations an agent can simply fail past (missing
//! target, unreachable tile) are not modeled as errors here -- the calling
//! system (AI / Action Executor) observes `None`/`false` and falls back to
//! idle, per the propagation policy the simulation driver enforces.

use colonysim_types::{EntityId, JobId, Kind};

/// Errors that can occur during agent or job-board operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No job with this id exists on the board.
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    /// Adding to an inventory would exceed its capacity.
    #[error("inventory overflow: adding {attempted} of {kind} would exceed capacity (load: {current_load}, capacity: {capacity})")]
    InventoryOverflow {
        /// The item kind being added.
        kind: Kind,
        /// The quantity the caller attempted to add.
        attempted: u32,
        /// The inventory's current total load.
        current_load: u32,
        /// The inventory's maximum capacity.
        capacity: u32,
    },

    /// Attempted to remove more of an item than the inventory holds.
    #[error("insufficient item: wanted {requested} of {kind} but only have {available}")]
    InsufficientItem {
        /// The item kind being removed.
        kind: Kind,
        /// The quantity the caller attempted to remove.
        requested: u32,
        /// The quantity actually held.
        available: u32,
    },

    /// Referenced an entity id that is not live in the component store.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An arithmetic overflow occurred during a checked computation.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: &'static str,
    },
}
