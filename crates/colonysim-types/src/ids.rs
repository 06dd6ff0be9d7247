//! Type-safe identifier wrappers around a run-local monotonic counter.
//!
//! Every entity and job in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are backed by a
//! plain `u64` rather than a UUID: the store's only invariant is that an id
//! is never reused within a single run (see the component store's entity
//! lifecycle contract), which a monotonic counter guarantees without
//! pulling in a UUID dependency. The counter that hands out values lives on
//! the owning collection (`EntityManager`, `JobBoard`), not on the id type
//! itself, so there is no process-wide mutable state here.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw value. Only collections that hand out fresh,
            /// never-reused values should construct one of these directly.
            #[must_use]
            pub const fn from_raw(value: u64) -> Self {
                Self(value)
            }

            /// Return the inner raw value.
            #[must_use]
            pub const fn into_raw(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Unique identifier for an entity in the component store.
    EntityId
}

define_id! {
    /// Unique identifier for a job record on the job board.
    JobId
}

/// Hands out monotonically increasing ids, never reusing a value within the
/// lifetime of the generator.
///
/// Kept as a plain struct owned by `EntityManager`/`JobBoard` rather than a
/// global counter, per the no-process-wide-mutable-state design note.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

/// Error returned when an id generator has handed out every value a `u64`
/// can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("id generator exhausted u64 space")]
pub struct IdSpaceExhausted;

impl IdGenerator {
    /// Create a generator that starts at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next raw id value.
    ///
    /// # Errors
    ///
    /// Returns [`IdSpaceExhausted`] if `u64::MAX` ids have already been
    /// allocated. This is not reachable in any real run but is handled
    /// rather than left to silently overflow.
    pub fn next_raw(&mut self) -> Result<u64, IdSpaceExhausted> {
        let id = self.next;
        self.next = self.next.checked_add(1).ok_or(IdSpaceExhausted)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let entity = EntityId::from_raw(1);
        let job = JobId::from_raw(1);
        assert_eq!(entity.into_raw(), job.into_raw());
    }

    #[test]
    fn generator_is_monotonic_and_never_repeats() {
        let mut gen = IdGenerator::new();
        let a = gen.next_raw().unwrap_or(u64::MAX);
        let b = gen.next_raw().unwrap_or(u64::MAX);
        let c = gen.next_raw().unwrap_or(u64::MAX);
        assert_eq!([a, b, c], [0, 1, 2]);
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = EntityId::from_raw(42);
        let json = serde_json::to_string(&original).unwrap_or_default();
        let restored: EntityId = serde_json::from_str(&json).unwrap_or(EntityId::from_raw(0));
        assert_eq!(original, restored);
    }

    #[test]
    fn id_display_matches_raw_value() {
        let id = EntityId::from_raw(7);
        assert_eq!(id.to_string(), "7");
    }
}
