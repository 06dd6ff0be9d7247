//! The Action Executor: interprets each agent's current [`Action`] once per tick.
//!
//! Grounded on `original_source/src/systems/action_system.py`'s per-action
//! handler dispatch. Re-expressed as one free function per action kind,
//! called from [`execute_actions`] in place of a `System` object holding
//! engine references. Every handler follows the same rule as the original:
//! a missing prerequisite (gone target, wrong zone, no path) reverts the
//! agent to idle rather than panicking, per the propagation policy that
//! failures are localized and never raised to the caller.
//!
//! Two gaps the original left unfinished are completed here rather than
//! transcribed as-is, recorded in DESIGN.md: tool durability is actually
//! consumed per chop (the original computes a `tool_efficiency` but never
//! applies `durability_loss_per_use`), and the fishing best-hours bonus is
//! actually compared against the clock (the original leaves `time_bonus`
//! hardcoded at `0.0`).

use std::collections::BTreeMap;

use colonysim_types::{Action, EntityId, IdSpaceExhausted, Kind, ZoneKind};
use colonysim_world::{find_path, manhattan, Grid, Tile};
use rand::Rng;
use tracing::info;

use crate::ai::{closest_walkable_neighbor, food_value};
use crate::components::{ItemComponent, Position, ResourceComponent, SleepState};
use crate::config::{CropConfig, FireConfig, FishingConfig, ItemConfig, TrappingConfig, VillagerConfig};
use crate::entity::EntityManager;
use crate::inventory;

enum MoveOutcome {
    Arrived,
    InProgress,
    Unreachable,
}

/// Drive an agent's [`crate::components::Movement`] one step toward
/// `destination`, (re)computing a path if needed. Leaves `Action` untouched;
/// callers decide what an arrival or failure means for their action.
fn move_toward(entities: &mut EntityManager, grid: &Grid, id: EntityId, pos: Position, destination: Tile, game_dt: f64) -> MoveOutcome {
    let Some(mut movement) = entities.movement(id).cloned() else {
        return MoveOutcome::Unreachable;
    };
    if movement.target != Some(destination) {
        movement.target = Some(destination);
        movement.path.clear();
        movement.progress = 0.0;
    }

    let mut current_tile = pos.tile();
    if movement.path.is_empty() {
        if current_tile == destination {
            movement.target = None;
            entities.add_movement(id, movement);
            return MoveOutcome::Arrived;
        }
        let path = find_path(grid, current_tile, destination);
        if path.is_empty() {
            movement.target = None;
            entities.add_movement(id, movement);
            return MoveOutcome::Unreachable;
        }
        movement.path = path;
    }

    movement.progress += movement.speed * game_dt;
    while movement.progress >= 1.0 {
        let Some(next) = movement.path.first().copied() else {
            movement.progress = 0.0;
            break;
        };
        movement.path.remove(0);
        current_tile = next;
        movement.progress -= 1.0;
    }

    if let Some(position) = entities.position_mut(id) {
        position.x = current_tile.0;
        position.y = current_tile.1;
    }

    let arrived = current_tile == destination;
    if arrived {
        movement.target = None;
    }
    entities.add_movement(id, movement);
    if arrived {
        MoveOutcome::Arrived
    } else {
        MoveOutcome::InProgress
    }
}

fn spawn_item(entities: &mut EntityManager, tile: Tile, kind: Kind, amount: u32, food_value: f64) -> Result<EntityId, IdSpaceExhausted> {
    let id = entities.create_entity()?;
    entities.add_position(id, Position::new(tile.0, tile.1));
    entities.add_item(id, ItemComponent { kind, amount, food_value });
    Ok(id)
}

fn run_move(entities: &mut EntityManager, grid: &Grid, id: EntityId, pos: Position, game_dt: f64) {
    let Some(target) = entities.movement(id).and_then(|m| m.target) else {
        entities.add_action(id, Action::Idle);
        return;
    };
    match move_toward(entities, grid, id, pos, target, game_dt) {
        MoveOutcome::Arrived => entities.add_action(id, Action::Idle),
        MoveOutcome::InProgress => {}
        MoveOutcome::Unreachable => {
            info!(category = "AI", entity = %id, "no path to target");
            entities.add_action(id, Action::Idle);
        }
    }
}

fn drop_table_or_default(resource: &ResourceComponent) -> BTreeMap<Kind, (u32, u32)> {
    if resource.drop_table.is_empty() {
        BTreeMap::from([(Kind::new("log"), (1, 1))])
    } else {
        resource.drop_table.clone()
    }
}

fn spawn_drops(
    entities: &mut EntityManager,
    rng: &mut impl Rng,
    tile: Tile,
    drop_table: &BTreeMap<Kind, (u32, u32)>,
    item_configs: &BTreeMap<Kind, ItemConfig>,
) -> Result<(), IdSpaceExhausted> {
    for (kind, &(min, max)) in drop_table {
        let amount = if max > min { rng.random_range(min..=max) } else { min };
        if amount > 0 {
            spawn_item(entities, tile, kind.clone(), amount, food_value(kind, item_configs))?;
        }
    }
    Ok(())
}

fn consume_tool_durability(entities: &mut EntityManager, id: EntityId) {
    let Some(durability) = entities.durability_mut(id) else {
        return;
    };
    durability.durability -= durability.durability_loss_per_use;
    if durability.durability <= 0.0 {
        entities.remove_durability(id);
    }
}

fn run_chop(
    entities: &mut EntityManager,
    grid: &Grid,
    rng: &mut impl Rng,
    id: EntityId,
    target: EntityId,
    pos: Position,
    villager: &VillagerConfig,
    item_configs: &BTreeMap<Kind, ItemConfig>,
    game_dt: f64,
) -> Result<(), IdSpaceExhausted> {
    let Some(target_tile) = entities.position(target).map(Position::tile) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };

    if manhattan(pos.tile(), target_tile) > 1 {
        let Some(neighbor) = closest_walkable_neighbor(grid, target_tile, pos.tile()) else {
            info!(category = "GAMEPLAY", entity = %id, "cannot reach tree");
            entities.add_action(id, Action::Idle);
            return Ok(());
        };
        if let MoveOutcome::Unreachable = move_toward(entities, grid, id, pos, neighbor, game_dt) {
            entities.add_action(id, Action::Idle);
        }
        return Ok(());
    }

    let logging_skill = entities.skill(id).map_or(0.0, |s| s.level(&Kind::new("logging")));
    let rate = villager.chop_speed * (1.0 + logging_skill) * game_dt;

    let Some(resource) = entities.resource_mut(target) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    resource.health -= rate;

    if resource.health <= 0.0 {
        let drop_table = drop_table_or_default(resource);
        spawn_drops(entities, rng, target_tile, &drop_table, item_configs)?;
        entities.destroy_entity(target);
        if let Some(skill) = entities.skill_mut(id) {
            crate::skills::practice(skill, &Kind::new("logging"), 0.01);
        }
        entities.add_action(id, Action::Idle);
        info!(category = "GAMEPLAY", entity = %id, target = %target, "chopped tree");
    }

    consume_tool_durability(entities, id);
    Ok(())
}

fn run_pickup(entities: &mut EntityManager, id: EntityId, target: EntityId) {
    let Some(item) = entities.item(target).cloned() else {
        entities.add_action(id, Action::Idle);
        return;
    };
    if let Some(inventory) = entities.inventory_mut(id) {
        match inventory::add_item(inventory, item.kind.clone(), item.amount) {
            Ok(()) => {
                entities.destroy_entity(target);
                info!(category = "GAMEPLAY", entity = %id, kind = %item.kind, amount = item.amount, "picked up item");
            }
            Err(err) => info!(category = "GAMEPLAY", entity = %id, error = %err, "pickup discarded"),
        }
    }
    entities.add_action(id, Action::Idle);
}

fn run_drop(entities: &mut EntityManager, id: EntityId, pos: Position, item_configs: &BTreeMap<Kind, ItemConfig>) -> Result<(), IdSpaceExhausted> {
    let Some(inventory) = entities.inventory_mut(id) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    let Some(kind) = inventory::first_item_kind(inventory) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    let amount = inventory.items.get(&kind).copied().unwrap_or(0);
    if amount == 0 {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }
    let _ = inventory::remove_item(inventory, &kind, amount);
    spawn_item(entities, pos.tile(), kind.clone(), amount, food_value(&kind, item_configs))?;
    info!(category = "GAMEPLAY", entity = %id, kind = %kind, amount, "dropped item");
    entities.add_action(id, Action::Idle);
    Ok(())
}

fn run_eat(entities: &mut EntityManager, id: EntityId, target: Option<EntityId>, item_configs: &BTreeMap<Kind, ItemConfig>) {
    if !entities.has_needs(id) {
        entities.add_action(id, Action::Idle);
        return;
    }

    let best = entities.inventory(id).and_then(|inv| {
        inv.items
            .iter()
            .filter(|&(_, &amount)| amount > 0)
            .map(|(kind, _)| (kind.clone(), food_value(kind, item_configs)))
            .filter(|&(_, value)| value > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    });

    let Some((kind, value)) = best else {
        if let Some(target_id) = target {
            if let Some(item) = entities.item(target_id).cloned() {
                if food_value(&item.kind, item_configs) > 0.0 {
                    if let Some(inventory) = entities.inventory_mut(id) {
                        if inventory::add_item(inventory, item.kind.clone(), item.amount).is_ok() {
                            entities.destroy_entity(target_id);
                        }
                    }
                }
            }
        }
        entities.add_action(id, Action::Idle);
        return;
    };

    if let Some(inventory) = entities.inventory_mut(id) {
        let _ = inventory::remove_item(inventory, &kind, 1);
    }
    if let Some(needs) = entities.needs_mut(id) {
        needs.hunger = (needs.hunger - value).max(0.0);
        needs.mood = (needs.mood + 0.5 * value).min(100.0);
    }
    info!(category = "GAMEPLAY", entity = %id, kind = %kind, "ate food");
    entities.add_action(id, Action::Idle);
}

fn run_sleep(entities: &mut EntityManager, grid: &Grid, id: EntityId, pos: Position) {
    if grid.zone(pos.x, pos.y) != ZoneKind::Residential {
        entities.add_action(id, Action::Idle);
        return;
    }

    match entities.sleep_state_mut(id) {
        Some(state) => {
            state.is_sleeping = true;
            state.bed_tile = Some(pos.tile());
        }
        None => entities.add_sleep_state(id, SleepState { is_sleeping: true, bed_tile: Some(pos.tile()) }),
    }

    let tiredness = entities.needs(id).map_or(0.0, |n| n.tiredness);
    if tiredness <= 10.0 {
        if let Some(state) = entities.sleep_state_mut(id) {
            state.is_sleeping = false;
        }
        entities.add_action(id, Action::Idle);
        info!(category = "GAMEPLAY", entity = %id, "woke up");
    }
}

fn seed_kind_for(crop_kind: &Kind) -> Kind {
    Kind::new(format!("seed_{crop_kind}"))
}

fn run_plant(
    entities: &mut EntityManager,
    grid: &Grid,
    id: EntityId,
    pos: Position,
    crop_configs: &BTreeMap<Kind, CropConfig>,
) -> Result<(), IdSpaceExhausted> {
    if grid.zone(pos.x, pos.y) != ZoneKind::Farm {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    let occupied = entities.ids_with_crop().into_iter().any(|crop_id| entities.position(crop_id).is_some_and(|p| p.tile() == pos.tile()));
    if occupied {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    let planted_kind = crop_configs.keys().find(|crop_kind| {
        entities
            .inventory(id)
            .is_some_and(|inv| inv.items.get(&seed_kind_for(crop_kind)).copied().unwrap_or(0) > 0)
    });

    let Some(crop_kind) = planted_kind.cloned() else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };

    if let Some(inventory) = entities.inventory_mut(id) {
        let _ = inventory::remove_item(inventory, &seed_kind_for(&crop_kind), 1);
    }

    let crop_id = entities.create_entity()?;
    entities.add_position(crop_id, pos);
    entities.add_crop(crop_id, crate::components::Crop { kind: crop_kind.clone(), growth_progress: 0.0, state: colonysim_world::CropState::Seed });
    info!(category = "GAMEPLAY", entity = %id, kind = %crop_kind, "planted seed");

    entities.add_action(id, Action::Idle);
    Ok(())
}

fn run_harvest(
    entities: &mut EntityManager,
    id: EntityId,
    target: EntityId,
    pos: Position,
    rng: &mut impl Rng,
    crop_configs: &BTreeMap<Kind, CropConfig>,
    item_configs: &BTreeMap<Kind, ItemConfig>,
) -> Result<(), IdSpaceExhausted> {
    let Some(crop) = entities.crop(target).cloned() else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    let Some(crop_tile) = entities.position(target).map(Position::tile) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    if manhattan(pos.tile(), crop_tile) > 1 || crop.state != colonysim_world::CropState::Ripe {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    let yield_table = crop_configs.get(&crop.kind).map(|c| c.yield_table.clone()).filter(|t| !t.is_empty()).unwrap_or_else(|| {
        BTreeMap::from([(Kind::new(format!("food_{}", crop.kind)), (2, 4))])
    });

    for (food_kind, &(min, max)) in &yield_table {
        let amount = if max > min { rng.random_range(*min..=*max) } else { *min };
        if amount > 0 {
            spawn_item(entities, crop_tile, food_kind.clone(), amount, food_value(food_kind, item_configs))?;
        }
    }

    entities.destroy_entity(target);
    info!(category = "GAMEPLAY", entity = %id, kind = %crop.kind, "harvested crop");
    entities.add_action(id, Action::Idle);
    Ok(())
}

fn existing_trap_at(entities: &EntityManager, tile: Tile) -> bool {
    entities.ids_with_trap().into_iter().any(|id| entities.position(id).is_some_and(|p| p.tile() == tile))
}

fn run_check_trap(
    entities: &mut EntityManager,
    id: EntityId,
    trap_id: EntityId,
    pos: Position,
    rng: &mut impl Rng,
    trapping: &TrappingConfig,
    item_configs: &BTreeMap<Kind, ItemConfig>,
) -> Result<(), IdSpaceExhausted> {
    let Some(trap_tile) = entities.position(trap_id).map(Position::tile) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    if manhattan(pos.tile(), trap_tile) > 1 {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    let skill_bonus = entities.skill(id).map_or(0.0, |s| s.level(&Kind::new("trapping"))) * trapping.trap_catch_probability_per_skill;
    let catch_probability = trapping.trap_catch_probability_base * (1.0 + skill_bonus);
    let caught = rng.random::<f64>() < catch_probability;

    if caught {
        spawn_item(entities, trap_tile, Kind::new("meat"), 1, food_value(&Kind::new("meat"), item_configs))?;
        if let Some(skill) = entities.skill_mut(id) {
            crate::skills::practice(skill, &Kind::new("trapping"), 0.01);
        }
        info!(category = "GAMEPLAY", entity = %id, "caught meat in trap");
    }

    let Some(trap) = entities.trap_mut(trap_id) else {
        entities.add_action(id, Action::Idle);
        return Ok(());
    };
    trap.durability -= if caught { 1.0 } else { 0.1 };
    if trap.durability <= 0.0 {
        entities.destroy_entity(trap_id);
        info!(category = "GAMEPLAY", x = trap_tile.0, y = trap_tile.1, "trap broke");
    }

    entities.add_action(id, Action::Idle);
    Ok(())
}

fn run_place_trap(entities: &mut EntityManager, id: EntityId, pos: Position, trapping: &TrappingConfig) -> Result<(), IdSpaceExhausted> {
    let has_logs = entities.inventory(id).is_some_and(|inv| inv.items.get(&Kind::new("log")).copied().unwrap_or(0) >= 2);
    if !has_logs || existing_trap_at(entities, pos.tile()) {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    if let Some(inventory) = entities.inventory_mut(id) {
        let _ = inventory::remove_item(inventory, &Kind::new("log"), 2);
    }

    let trap_id = entities.create_entity()?;
    entities.add_position(trap_id, pos);
    entities.add_trap(
        trap_id,
        crate::components::Trap {
            kind: Kind::new("snare"),
            durability: trapping.trap_durability,
            max_durability: trapping.trap_durability,
            catch_probability: trapping.trap_catch_probability_base,
        },
    );
    info!(category = "GAMEPLAY", entity = %id, "placed trap");
    entities.add_action(id, Action::Idle);
    Ok(())
}

fn run_trap(
    entities: &mut EntityManager,
    id: EntityId,
    target: Option<EntityId>,
    pos: Position,
    rng: &mut impl Rng,
    trapping: &TrappingConfig,
    item_configs: &BTreeMap<Kind, ItemConfig>,
) -> Result<(), IdSpaceExhausted> {
    match target {
        Some(trap_id) => run_check_trap(entities, id, trap_id, pos, rng, trapping, item_configs),
        None => run_place_trap(entities, id, pos, trapping),
    }
}

fn is_near_water(grid: &Grid, tile: Tile) -> bool {
    grid.terrain(tile.0, tile.1) == Some(colonysim_types::TerrainKind::Water)
        || Grid::neighbors4(tile.0, tile.1).into_iter().any(|(x, y)| grid.terrain(x, y) == Some(colonysim_types::TerrainKind::Water))
}

fn fishing_time_bonus(fishing: &FishingConfig, current_hour: f64) -> f64 {
    let hour = current_hour.floor();
    if fishing.fishing_best_hours.iter().any(|h| h.floor() == hour) {
        fishing.fishing_best_hours_bonus
    } else {
        0.0
    }
}

#[allow(clippy::too_many_arguments)]
fn run_fish(
    entities: &mut EntityManager,
    grid: &Grid,
    id: EntityId,
    pos: Position,
    rng: &mut impl Rng,
    fishing: &FishingConfig,
    item_configs: &BTreeMap<Kind, ItemConfig>,
    fishing_progress: &mut BTreeMap<EntityId, f64>,
    game_dt: f64,
    day_length_seconds: f64,
    current_hour: f64,
) -> Result<(), IdSpaceExhausted> {
    if !is_near_water(grid, pos.tile()) {
        fishing_progress.remove(&id);
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    let fishing_time_game = fishing.fishing_time_per_attempt_seconds / day_length_seconds;
    let progress = fishing_progress.entry(id).or_insert(0.0);
    *progress += game_dt;

    if *progress < fishing_time_game {
        return Ok(());
    }
    fishing_progress.remove(&id);

    let skill_bonus = entities.skill(id).map_or(0.0, |s| s.level(&Kind::new("fishing"))) * fishing.fishing_catch_probability_per_skill;
    let time_bonus = fishing_time_bonus(fishing, current_hour);
    let catch_probability = fishing.fishing_catch_probability_base * (1.0 + skill_bonus + time_bonus);

    if rng.random::<f64>() < catch_probability {
        spawn_item(entities, pos.tile(), Kind::new("fish"), 1, food_value(&Kind::new("fish"), item_configs))?;
        if let Some(skill) = entities.skill_mut(id) {
            crate::skills::practice(skill, &Kind::new("fishing"), 0.01);
        }
        info!(category = "GAMEPLAY", entity = %id, "caught fish");
    }

    entities.add_action(id, Action::Idle);
    Ok(())
}

fn existing_fire_at(entities: &EntityManager, tile: Tile) -> Option<EntityId> {
    entities.ids_with_fire().into_iter().find(|&id| entities.position(id).is_some_and(|p| p.tile() == tile))
}

fn run_create_fire(entities: &mut EntityManager, id: EntityId, pos: Position, fire_config: &FireConfig) -> Result<(), IdSpaceExhausted> {
    let cost = fire_config.fire_creation_cost_logs;
    let has_logs = entities.inventory(id).is_some_and(|inv| inv.items.get(&Kind::new("log")).copied().unwrap_or(0) >= cost);
    if !has_logs || existing_fire_at(entities, pos.tile()).is_some() {
        entities.add_action(id, Action::Idle);
        return Ok(());
    }

    if let Some(inventory) = entities.inventory_mut(id) {
        let _ = inventory::remove_item(inventory, &Kind::new("log"), cost);
    }

    let fire_id = entities.create_entity()?;
    entities.add_position(fire_id, pos);
    entities.add_fire(
        fire_id,
        crate::components::Fire {
            fuel_remaining: f64::from(cost) * 10.0,
            warmth_radius: fire_config.fire_warmth_radius,
            fuel_consumption_per_hour: fire_config.fire_fuel_consumption_per_hour,
        },
    );
    info!(category = "GAMEPLAY", entity = %id, "created fire");
    entities.add_action(id, Action::Idle);
    Ok(())
}

fn run_tend_fire(entities: &mut EntityManager, id: EntityId, pos: Position) {
    let Some(fire_id) = existing_fire_at(entities, pos.tile()) else {
        entities.add_action(id, Action::Idle);
        return;
    };
    let has_logs = entities.inventory(id).is_some_and(|inv| inv.items.get(&Kind::new("log")).copied().unwrap_or(0) >= 1);
    if !has_logs {
        entities.add_action(id, Action::Idle);
        return;
    }

    if let Some(inventory) = entities.inventory_mut(id) {
        let _ = inventory::remove_item(inventory, &Kind::new("log"), 1);
    }
    if let Some(fire) = entities.fire_mut(fire_id) {
        fire.fuel_remaining += 10.0;
    }
    info!(category = "GAMEPLAY", entity = %id, "added fuel to fire");
    entities.add_action(id, Action::Idle);
}

/// Parameters that rarely change tick to tick, bundled to keep
/// [`execute_actions`]'s signature from sprawling further.
pub struct ActionConfig<'a> {
    /// Movement/chop tunables.
    pub villager: &'a VillagerConfig,
    /// Per-item-kind food values, keyed by item [`Kind`].
    pub items: &'a BTreeMap<Kind, ItemConfig>,
    /// Per-crop-kind growth/yield tunables, keyed by crop [`Kind`].
    pub crops: &'a BTreeMap<Kind, CropConfig>,
    /// Trapping tunables.
    pub trapping: &'a TrappingConfig,
    /// Fishing tunables.
    pub fishing: &'a FishingConfig,
    /// Fire tunables.
    pub fire: &'a FireConfig,
}

/// Interpret every actionable entity's current [`Action`] for one tick.
///
/// `fishing_progress` is the Simulation Driver's per-entity fishing timer,
/// threaded in the same way as Agent AI's `last_job_gen_tick` -- owned by
/// the driver, not hidden system state.
///
/// # Errors
///
/// Returns [`IdSpaceExhausted`] if the entity-id space is exhausted while
/// spawning a dropped item, crop, trap, or fire.
#[allow(clippy::too_many_arguments)]
pub fn execute_actions(
    entities: &mut EntityManager,
    grid: &Grid,
    rng: &mut impl Rng,
    config: &ActionConfig<'_>,
    fishing_progress: &mut BTreeMap<EntityId, f64>,
    game_dt: f64,
    day_length_seconds: f64,
    current_hour: f64,
) -> Result<(), IdSpaceExhausted> {
    for id in entities.ids_with_position_and_action() {
        let Some(pos) = entities.position(id).copied() else { continue };
        let Some(action) = entities.action(id).copied() else { continue };

        match action {
            Action::Idle => {}
            Action::Move => run_move(entities, grid, id, pos, game_dt),
            Action::Chop { target } => run_chop(entities, grid, rng, id, target, pos, config.villager, config.items, game_dt)?,
            Action::Pickup { target } => run_pickup(entities, id, target),
            Action::Drop => run_drop(entities, id, pos, config.items)?,
            Action::Eat { target } => run_eat(entities, id, target, config.items),
            Action::Sleep => run_sleep(entities, grid, id, pos),
            Action::Plant => run_plant(entities, grid, id, pos, config.crops)?,
            Action::Harvest { target } => run_harvest(entities, id, target, pos, rng, config.crops, config.items)?,
            Action::Trap { target } => run_trap(entities, id, target, pos, rng, config.trapping, config.items)?,
            Action::Fish => run_fish(entities, grid, id, pos, rng, config.fishing, config.items, fishing_progress, game_dt, day_length_seconds, current_hour)?,
            Action::CreateFire => run_create_fire(entities, id, pos, config.fire)?,
            Action::TendFire => run_tend_fire(entities, id, pos),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::components::{InventoryComponent, Needs, SkillComponent};

    use super::*;

    fn villager(entities: &mut EntityManager, x: i32, y: i32) -> EntityId {
        let id = entities.create_entity().expect("id space available");
        entities.add_position(id, Position::new(x, y));
        entities.add_action(id, Action::Idle);
        entities.add_movement(id, crate::components::Movement { speed: 5.0, ..Default::default() });
        entities.add_needs(id, Needs::default());
        entities.add_skill(id, SkillComponent::default());
        entities.add_inventory(id, InventoryComponent { items: BTreeMap::new(), capacity: 100 });
        id
    }

    fn action_config(villager: &VillagerConfig, items: &BTreeMap<Kind, ItemConfig>, crops: &BTreeMap<Kind, CropConfig>, trapping: &TrappingConfig, fishing: &FishingConfig, fire: &FireConfig) -> ActionConfig<'_> {
        ActionConfig { villager, items, crops, trapping, fishing, fire }
    }

    #[test]
    fn move_action_walks_the_full_distance_in_one_tick() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(20, 20);
        let id = villager(&mut entities, 10, 10);
        entities.movement_mut(id).expect("movement").target = Some((15, 10));
        entities.add_action(id, Action::Move);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert_eq!(entities.position(id), Some(&Position::new(15, 10)));
        assert_eq!(entities.action(id), Some(&Action::Idle));
        assert!(entities.movement(id).expect("movement").path.is_empty());
    }

    #[test]
    fn chop_depletes_health_and_spawns_log_on_destruction() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(20, 20);
        let id = villager(&mut entities, 14, 10);

        let tree = entities.create_entity().expect("id space available");
        entities.add_position(tree, Position::new(15, 10));
        entities.add_resource(tree, ResourceComponent { kind: Kind::new("tree_oak"), health: 1.0, max_health: 20.0, drop_table: BTreeMap::new() });
        entities.add_action(id, Action::Chop { target: tree });

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert!(!entities.has_entity(tree));
        assert_eq!(entities.action(id), Some(&Action::Idle));
        assert_eq!(entities.skill(id).expect("skill").level(&Kind::new("logging")), 0.01);
        let dropped = entities.ids_with_item().into_iter().find(|&i| entities.item(i).is_some_and(|item| item.kind == Kind::new("log")));
        assert!(dropped.is_some());
    }

    #[test]
    fn eat_from_inventory_reduces_hunger_and_raises_mood() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(10, 10);
        let id = villager(&mut entities, 0, 0);
        entities.needs_mut(id).expect("needs").hunger = 60.0;
        entities.inventory_mut(id).expect("inventory").items.insert(Kind::new("food_wheat"), 1);
        entities.add_action(id, Action::Eat { target: None });

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let mut items = BTreeMap::new();
        items.insert(Kind::new("food_wheat"), ItemConfig { food_value: 30.0 });
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert_eq!(entities.needs(id).expect("needs").hunger, 30.0);
        assert_eq!(entities.needs(id).expect("needs").mood, 65.0);
        assert!(entities.inventory(id).expect("inventory").items.get(&Kind::new("food_wheat")).is_none());
        assert_eq!(entities.action(id), Some(&Action::Idle));
    }

    #[test]
    fn sleep_outside_residential_reverts_to_idle() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(10, 10);
        let id = villager(&mut entities, 0, 0);
        entities.add_action(id, Action::Sleep);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert_eq!(entities.action(id), Some(&Action::Idle));
        assert!(entities.sleep_state(id).is_none());
    }

    #[test]
    fn sleep_in_residential_zone_tracks_state_and_wakes_at_threshold() {
        let mut entities = EntityManager::new();
        let mut grid = Grid::new(10, 10);
        grid.set_zone(0, 0, ZoneKind::Residential);
        let id = villager(&mut entities, 0, 0);
        entities.needs_mut(id).expect("needs").tiredness = 5.0;
        entities.add_action(id, Action::Sleep);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert_eq!(entities.action(id), Some(&Action::Idle));
        assert_eq!(entities.sleep_state(id).expect("sleep state").is_sleeping, false);
    }

    #[test]
    fn drop_spawns_item_and_empties_inventory() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(10, 10);
        let id = villager(&mut entities, 3, 3);
        entities.inventory_mut(id).expect("inventory").items.insert(Kind::new("log"), 4);
        entities.add_action(id, Action::Drop);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert!(entities.inventory(id).expect("inventory").items.is_empty());
        let dropped = entities.ids_with_item().into_iter().find(|&i| entities.position(i) == Some(&Position::new(3, 3)));
        assert!(dropped.is_some());
    }

    #[test]
    fn plant_consumes_seed_and_spawns_crop_in_farm_zone() {
        let mut entities = EntityManager::new();
        let mut grid = Grid::new(10, 10);
        grid.set_zone(2, 2, ZoneKind::Farm);
        let id = villager(&mut entities, 2, 2);
        entities.inventory_mut(id).expect("inventory").items.insert(Kind::new("seed_wheat"), 1);
        entities.add_action(id, Action::Plant);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let mut crops = BTreeMap::new();
        crops.insert(Kind::new("wheat"), CropConfig::default());
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert!(entities.inventory(id).expect("inventory").items.is_empty());
        let crop_id = entities.ids_with_crop().into_iter().next().expect("crop spawned");
        assert_eq!(entities.crop(crop_id).expect("crop").kind, Kind::new("wheat"));
        assert_eq!(entities.action(id), Some(&Action::Idle));
    }

    #[test]
    fn harvest_destroys_ripe_crop_and_spawns_food() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(10, 10);
        let id = villager(&mut entities, 5, 5);
        let crop = entities.create_entity().expect("id space available");
        entities.add_position(crop, Position::new(5, 5));
        entities.add_crop(crop, crate::components::Crop { kind: Kind::new("wheat"), growth_progress: 1.0, state: colonysim_world::CropState::Ripe });
        entities.add_action(id, Action::Harvest { target: crop });

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let mut crops = BTreeMap::new();
        crops.insert(Kind::new("wheat"), CropConfig { growth_days: 3.0, yield_table: BTreeMap::from([(Kind::new("food_wheat"), (2, 2))]) });
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert!(!entities.has_entity(crop));
        let food = entities.ids_with_item().into_iter().find(|&i| entities.item(i).is_some_and(|item| item.kind == Kind::new("food_wheat")));
        assert!(food.is_some());
    }

    #[test]
    fn create_fire_consumes_logs_and_spawns_fire() {
        let mut entities = EntityManager::new();
        let grid = Grid::new(10, 10);
        let id = villager(&mut entities, 1, 1);
        entities.inventory_mut(id).expect("inventory").items.insert(Kind::new("log"), 3);
        entities.add_action(id, Action::CreateFire);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig::default();
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        assert!(entities.inventory(id).expect("inventory").items.get(&Kind::new("log")).is_none());
        assert_eq!(entities.ids_with_fire().len(), 1);
    }

    #[test]
    fn fish_action_waits_for_progress_timer_before_rolling() {
        let mut entities = EntityManager::new();
        let mut grid = Grid::new(10, 10);
        grid.set_terrain(5, 5, colonysim_types::TerrainKind::Water);
        let id = villager(&mut entities, 4, 5);
        entities.add_action(id, Action::Fish);

        let mut rng = StdRng::seed_from_u64(1);
        let mut fishing_progress = BTreeMap::new();
        let villager_cfg = VillagerConfig::default();
        let items = BTreeMap::new();
        let crops = BTreeMap::new();
        let trapping = TrappingConfig::default();
        let fishing = FishingConfig { fishing_time_per_attempt_seconds: 100.0, ..FishingConfig::default() };
        let fire = FireConfig::default();
        let config = action_config(&villager_cfg, &items, &crops, &trapping, &fishing, &fire);

        execute_actions(&mut entities, &grid, &mut rng, &config, &mut fishing_progress, 1.0, 600.0, 10.0).expect("ok");

        // A single short tick is far short of the attempt duration: still fishing.
        assert_eq!(entities.action(id), Some(&Action::Fish));
        assert!(fishing_progress.contains_key(&id));
    }
}
