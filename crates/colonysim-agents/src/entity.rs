//! The component store: dense per-kind tables keyed by entity id.
//!
//! Grounded on `original_source/src/core/ecs.py`'s `EntityManager`
//! (monotonic ids, never reused; `destroy_entity` sweeps every component
//! table) but implemented as one concrete `BTreeMap<EntityId, T>` field per
//! component kind instead of a type-erased `Dict[Type, Dict[int, Component]]`
//! -- matching this codebase's preference for concrete typed collections.
//!
//! Queries snapshot the entity-id set of the smallest relevant table before
//! yielding, so systems may freely add or remove components (including on
//! the entity currently being processed) mid-iteration without the query
//! itself observing a half-mutated table.

use std::collections::{BTreeMap, BTreeSet};

use colonysim_types::{Action, EntityId, IdGenerator, IdSpaceExhausted};

use crate::components::{
    Cold, Crop, Durability, Fire, InventoryComponent, ItemComponent, JobComponent, Movement,
    Needs, Position, ResourceComponent, Routine, SkillComponent, SleepState, Trap,
};

macro_rules! component_table {
    ($field:ident, $ty:ty, $add:ident, $get:ident, $get_mut:ident, $remove:ident, $has:ident) => {
        /// Insert or replace the component on `entity`.
        pub fn $add(&mut self, entity: EntityId, component: $ty) {
            self.$field.insert(entity, component);
        }

        /// Borrow the component, if present.
        #[must_use]
        pub fn $get(&self, entity: EntityId) -> Option<&$ty> {
            self.$field.get(&entity)
        }

        /// Mutably borrow the component, if present.
        pub fn $get_mut(&mut self, entity: EntityId) -> Option<&mut $ty> {
            self.$field.get_mut(&entity)
        }

        /// Remove the component, returning it if it was present.
        pub fn $remove(&mut self, entity: EntityId) -> Option<$ty> {
            self.$field.remove(&entity)
        }

        /// Whether `entity` carries this component.
        #[must_use]
        pub fn $has(&self, entity: EntityId) -> bool {
            self.$field.contains_key(&entity)
        }
    };
}

/// The simulation's entity-component store.
#[derive(Debug, Clone, Default)]
pub struct EntityManager {
    ids: IdGenerator,
    entities: BTreeSet<EntityId>,

    positions: BTreeMap<EntityId, Position>,
    movements: BTreeMap<EntityId, Movement>,
    actions: BTreeMap<EntityId, Action>,
    resources: BTreeMap<EntityId, ResourceComponent>,
    items: BTreeMap<EntityId, ItemComponent>,
    inventories: BTreeMap<EntityId, InventoryComponent>,
    skills: BTreeMap<EntityId, SkillComponent>,
    jobs: BTreeMap<EntityId, JobComponent>,
    needs: BTreeMap<EntityId, Needs>,
    colds: BTreeMap<EntityId, Cold>,
    crops: BTreeMap<EntityId, Crop>,
    sleep_states: BTreeMap<EntityId, SleepState>,
    routines: BTreeMap<EntityId, Routine>,
    traps: BTreeMap<EntityId, Trap>,
    fires: BTreeMap<EntityId, Fire>,
    durabilities: BTreeMap<EntityId, Durability>,

    is_tree: BTreeSet<EntityId>,
    is_villager: BTreeSet<EntityId>,
    is_player: BTreeSet<EntityId>,
    is_selectable: BTreeSet<EntityId>,
    is_walkable: BTreeSet<EntityId>,
}

impl EntityManager {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate and register a new entity id.
    ///
    /// # Errors
    ///
    /// Returns [`IdSpaceExhausted`] if the 64-bit id space is exhausted.
    pub fn create_entity(&mut self) -> Result<EntityId, IdSpaceExhausted> {
        let raw = self.ids.next_raw()?;
        let entity = EntityId::from_raw(raw);
        self.entities.insert(entity);
        Ok(entity)
    }

    /// Remove `entity` and every component it carries.
    pub fn destroy_entity(&mut self, entity: EntityId) {
        self.entities.remove(&entity);
        self.positions.remove(&entity);
        self.movements.remove(&entity);
        self.actions.remove(&entity);
        self.resources.remove(&entity);
        self.items.remove(&entity);
        self.inventories.remove(&entity);
        self.skills.remove(&entity);
        self.jobs.remove(&entity);
        self.needs.remove(&entity);
        self.colds.remove(&entity);
        self.crops.remove(&entity);
        self.sleep_states.remove(&entity);
        self.routines.remove(&entity);
        self.traps.remove(&entity);
        self.fires.remove(&entity);
        self.durabilities.remove(&entity);
        self.is_tree.remove(&entity);
        self.is_villager.remove(&entity);
        self.is_player.remove(&entity);
        self.is_selectable.remove(&entity);
        self.is_walkable.remove(&entity);
    }

    /// Whether `entity` is a live id in this store.
    #[must_use]
    pub fn has_entity(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    /// A snapshot of every currently-live entity id.
    #[must_use]
    pub fn all_entities(&self) -> Vec<EntityId> {
        self.entities.iter().copied().collect()
    }

    component_table!(positions, Position, add_position, position, position_mut, remove_position, has_position);
    component_table!(movements, Movement, add_movement, movement, movement_mut, remove_movement, has_movement);
    component_table!(actions, Action, add_action, action, action_mut, remove_action, has_action);
    component_table!(resources, ResourceComponent, add_resource, resource, resource_mut, remove_resource, has_resource);
    component_table!(items, ItemComponent, add_item, item, item_mut, remove_item, has_item);
    component_table!(inventories, InventoryComponent, add_inventory, inventory, inventory_mut, remove_inventory, has_inventory);
    component_table!(skills, SkillComponent, add_skill, skill, skill_mut, remove_skill, has_skill);
    component_table!(jobs, JobComponent, add_job_component, job_component, job_component_mut, remove_job_component, has_job_component);
    component_table!(needs, Needs, add_needs, needs, needs_mut, remove_needs, has_needs);
    component_table!(colds, Cold, add_cold, cold, cold_mut, remove_cold, has_cold);
    component_table!(crops, Crop, add_crop, crop, crop_mut, remove_crop, has_crop);
    component_table!(sleep_states, SleepState, add_sleep_state, sleep_state, sleep_state_mut, remove_sleep_state, has_sleep_state);
    component_table!(routines, Routine, add_routine, routine, routine_mut, remove_routine, has_routine);
    component_table!(traps, Trap, add_trap, trap, trap_mut, remove_trap, has_trap);
    component_table!(fires, Fire, add_fire, fire, fire_mut, remove_fire, has_fire);
    component_table!(durabilities, Durability, add_durability, durability, durability_mut, remove_durability, has_durability);

    /// Mark `entity` as a tree (choppable resource).
    pub fn tag_is_tree(&mut self, entity: EntityId) {
        self.is_tree.insert(entity);
    }

    /// Whether `entity` is tagged as a tree.
    #[must_use]
    pub fn is_tree(&self, entity: EntityId) -> bool {
        self.is_tree.contains(&entity)
    }

    /// Mark `entity` as a villager.
    pub fn tag_is_villager(&mut self, entity: EntityId) {
        self.is_villager.insert(entity);
    }

    /// Whether `entity` is tagged as a villager.
    #[must_use]
    pub fn is_villager(&self, entity: EntityId) -> bool {
        self.is_villager.contains(&entity)
    }

    /// Mark `entity` as the player-controlled entity.
    pub fn tag_is_player(&mut self, entity: EntityId) {
        self.is_player.insert(entity);
    }

    /// Whether `entity` is the player-controlled entity.
    #[must_use]
    pub fn is_player(&self, entity: EntityId) -> bool {
        self.is_player.contains(&entity)
    }

    /// Mark `entity` as selectable by a controller.
    pub fn tag_is_selectable(&mut self, entity: EntityId) {
        self.is_selectable.insert(entity);
    }

    /// Whether `entity` is selectable.
    #[must_use]
    pub fn is_selectable(&self, entity: EntityId) -> bool {
        self.is_selectable.contains(&entity)
    }

    /// Mark `entity` as itself a walkable surface (e.g. a bridge tile prop).
    pub fn tag_is_walkable(&mut self, entity: EntityId) {
        self.is_walkable.insert(entity);
    }

    /// Whether `entity` is tagged walkable.
    #[must_use]
    pub fn is_walkable(&self, entity: EntityId) -> bool {
        self.is_walkable.contains(&entity)
    }

    /// Snapshot the ids of every entity carrying a [`Needs`] component, for
    /// systems that query by it as the primary (smallest-expected) table.
    #[must_use]
    pub fn ids_with_needs(&self) -> Vec<EntityId> {
        self.needs.keys().copied().collect()
    }

    /// Snapshot the ids of every entity carrying a [`Routine`] component.
    #[must_use]
    pub fn ids_with_routine(&self) -> Vec<EntityId> {
        self.routines.keys().copied().collect()
    }

    /// Snapshot the ids of every entity carrying a [`Crop`] component.
    #[must_use]
    pub fn ids_with_crop(&self) -> Vec<EntityId> {
        self.crops.keys().copied().collect()
    }

    /// Snapshot the ids of every entity carrying a [`Fire`] component.
    #[must_use]
    pub fn ids_with_fire(&self) -> Vec<EntityId> {
        self.fires.keys().copied().collect()
    }

    /// Snapshot the ids of every entity carrying a [`Cold`] component.
    #[must_use]
    pub fn ids_with_cold(&self) -> Vec<EntityId> {
        self.colds.keys().copied().collect()
    }

    /// Snapshot the ids of every villager-tagged entity with a [`Position`]
    /// and an [`Action`] -- the primary query for Agent AI.
    #[must_use]
    pub fn ids_with_position_and_action(&self) -> Vec<EntityId> {
        self.positions
            .keys()
            .copied()
            .filter(|id| self.actions.contains_key(id))
            .collect()
    }

    /// Snapshot the ids of every entity carrying an [`ItemComponent`].
    #[must_use]
    pub fn ids_with_item(&self) -> Vec<EntityId> {
        self.items.keys().copied().collect()
    }

    /// Snapshot the ids of every entity carrying a [`Trap`].
    #[must_use]
    pub fn ids_with_trap(&self) -> Vec<EntityId> {
        self.traps.keys().copied().collect()
    }

    /// Snapshot the ids of every entity carrying a [`JobComponent`].
    #[must_use]
    pub fn ids_with_job_component(&self) -> Vec<EntityId> {
        self.jobs.keys().copied().collect()
    }

    /// Snapshot the ids of every tree-tagged entity.
    #[must_use]
    pub fn tree_ids(&self) -> Vec<EntityId> {
        self.is_tree.iter().copied().collect()
    }
}
