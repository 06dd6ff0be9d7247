//! The `Action` tagged union: the verb an agent is currently executing.
//!
//! Per the design note on multi-step behavior, this is expressed as a sum
//! type with explicit variants rather than a base "Action" class with a
//! string tag and loosely-typed optional fields -- each variant carries
//! exactly the payload its executor needs. Re-evaluated from scratch every
//! tick; no variant is a co-routine or holds suspended control flow.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// The verb an agent is currently executing, re-evaluated each tick by the
/// Action Executor. Set either by the Agent AI (to express intent) or left
/// in place across ticks by the executor itself (multi-tick actions such as
/// `Move`, `Chop`, `Sleep`, `Fish`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Action {
    /// Doing nothing this tick.
    #[default]
    Idle,
    /// Following `Movement`'s path toward `Movement.target`.
    Move,
    /// Chopping down a tree entity.
    Chop {
        /// The tree entity being chopped.
        target: EntityId,
    },
    /// Picking up a ground item entity.
    Pickup {
        /// The item entity being picked up.
        target: EntityId,
    },
    /// Dropping the first inventory item kind at the agent's current tile.
    Drop,
    /// Eating food, either already in inventory or a ground item being
    /// picked up first.
    Eat {
        /// A ground item to pick up before eating, if not already carried.
        target: Option<EntityId>,
    },
    /// Sleeping in a residential zone.
    Sleep,
    /// Planting a seed at the agent's current tile.
    Plant,
    /// Harvesting a ripe crop entity.
    Harvest {
        /// The crop entity being harvested.
        target: EntityId,
    },
    /// Placing a new trap, or checking an existing one.
    Trap {
        /// An existing trap entity to check; `None` to place a new trap.
        target: Option<EntityId>,
    },
    /// Fishing at or adjacent to a water tile.
    Fish,
    /// Creating a new fire entity at the agent's current tile.
    CreateFire,
    /// Adding fuel to an existing fire at the agent's current tile.
    TendFire,
}

impl Action {
    /// A short, stable name for this action's kind, used in log messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Chop { .. } => "chop",
            Self::Pickup { .. } => "pickup",
            Self::Drop => "drop",
            Self::Eat { .. } => "eat",
            Self::Sleep => "sleep",
            Self::Plant => "plant",
            Self::Harvest { .. } => "harvest",
            Self::Trap { .. } => "trap",
            Self::Fish => "fish",
            Self::CreateFire => "create_fire",
            Self::TendFire => "tend_fire",
        }
    }

    /// Whether the agent is idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether this action counts as "working" for the Tiredness formula
    /// (`Action ∉ {idle, sleep, eat}`).
    #[must_use]
    pub const fn is_working(&self) -> bool {
        !matches!(self, Self::Idle | Self::Sleep | Self::Eat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_action_is_idle() {
        assert_eq!(Action::default(), Action::Idle);
        assert!(Action::Idle.is_idle());
    }

    #[test]
    fn working_excludes_idle_sleep_and_eat() {
        assert!(!Action::Idle.is_working());
        assert!(!Action::Sleep.is_working());
        assert!(!Action::Eat { target: None }.is_working());
        assert!(Action::Move.is_working());
        assert!(
            Action::Chop {
                target: EntityId::from_raw(1)
            }
            .is_working()
        );
    }

    #[test]
    fn kind_name_is_stable_for_logging() {
        assert_eq!(Action::Move.kind_name(), "move");
        assert_eq!(
            Action::Harvest {
                target: EntityId::from_raw(3)
            }
            .kind_name(),
            "harvest"
        );
    }
}
