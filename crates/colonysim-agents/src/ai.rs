//! Agent AI: three-phase per-tick decision-making plus periodic job generation.
//!
//! Grounded on `original_source/src/systems/ai_system.py`. Re-expressed
//! functionally rather than as a `System` object holding engine references:
//! each phase is a standalone function taking exactly the store/board/grid
//! slices it needs, called in order by the Simulation Driver. The original's
//! `_last_job_gen_tick` instance field becomes a plain `u64` the driver owns
//! and threads in by `&mut` reference.
//!
//! Two small, deliberate departures from the original, where the distilled
//! contract leaves room and the original itself is incomplete, are recorded
//! in DESIGN.md: fishing's target tile is chosen as a walkable neighbor of a
//! water tile (so the Pathfinder can actually reach it, rather than
//! targeting the unwalkable water tile itself), and the `plant`/`harvest`/
//! `tend_fire` job kinds complete on the same tick their action is
//! dispatched, since those actions resolve fully in one Action Executor
//! tick (unlike `chop`, `trap`, and `fish`, which accumulate over several).

use std::collections::BTreeMap;

use colonysim_types::{Action, EntityId, IdSpaceExhausted, Kind, TerrainKind, ZoneKind};
use colonysim_world::{manhattan, Grid, Tile, ZoneIndex};
use tracing::info;

use crate::components::Position;
use crate::config::{FishingConfig, ItemConfig, JobGenerationConfig, TrappingConfig, UrgentThresholds};
use crate::entity::EntityManager;
use crate::job::{default_priority, JobBoard, JobKind};

pub(crate) fn food_value(kind: &Kind, item_configs: &BTreeMap<Kind, ItemConfig>) -> f64 {
    item_configs.get(kind).map_or(0.0, |c| c.food_value)
}

pub(crate) fn closest_walkable_neighbor(grid: &Grid, target: Tile, from: Tile) -> Option<Tile> {
    Grid::neighbors4(target.0, target.1)
        .into_iter()
        .filter(|&(x, y)| grid.is_walkable(x, y))
        .min_by_key(|&n| manhattan(from, n))
}

fn cancel_job(entities: &mut EntityManager, jobs: &mut JobBoard, id: EntityId) {
    if let Some(job_component) = entities.remove_job_component(id) {
        jobs.complete(job_component.job_id);
    }
}

fn walk_to(entities: &mut EntityManager, id: EntityId, tile: Tile) {
    if let Some(movement) = entities.movement_mut(id) {
        movement.target = Some(tile);
        movement.path.clear();
    }
    entities.add_action(id, Action::Move);
}

/// Enqueue haul jobs for ungrounded items and chop jobs for unclaimed trees,
/// at most once every `config.interval_ticks` ticks.
///
/// # Errors
///
/// Returns [`IdSpaceExhausted`] if the job-id space is exhausted.
pub fn generate_jobs(
    entities: &EntityManager,
    jobs: &mut JobBoard,
    grid: &Grid,
    config: &JobGenerationConfig,
    current_tick: u64,
    last_job_gen_tick: &mut u64,
) -> Result<(), IdSpaceExhausted> {
    if current_tick.saturating_sub(*last_job_gen_tick) < u64::from(config.interval_ticks) {
        return Ok(());
    }
    *last_job_gen_tick = current_tick;

    for id in entities.ids_with_item() {
        if jobs.targets_entity_of_kind(id, JobKind::Haul) {
            continue;
        }
        let Some(item) = entities.item(id) else { continue };
        let Some(pos) = entities.position(id) else { continue };
        if grid.zone(pos.x, pos.y) == ZoneKind::Stockpile {
            continue;
        }
        jobs.add(JobKind::Haul, default_priority(JobKind::Haul), pos.tile(), Some(id), None, Some(item.kind.clone()))?;
        info!(category = "AI", entity = %id, kind = %item.kind, "haul job created");
    }

    let mut existing_chop = jobs.count_of_kind(JobKind::Chop);
    if existing_chop < config.max_chop_jobs {
        for id in entities.tree_ids() {
            if existing_chop >= config.max_chop_jobs {
                break;
            }
            if jobs.targets_entity_of_kind(id, JobKind::Chop) {
                continue;
            }
            let Some(pos) = entities.position(id) else { continue };
            jobs.add(JobKind::Chop, default_priority(JobKind::Chop), pos.tile(), Some(id), Some(Kind::new("logging")), None)?;
            existing_chop += 1;
            info!(category = "AI", entity = %id, "chop job created");
        }
    }

    Ok(())
}

fn find_inventory_food(entities: &EntityManager, id: EntityId, item_configs: &BTreeMap<Kind, ItemConfig>) -> bool {
    entities.inventory(id).is_some_and(|inv| {
        inv.items.iter().any(|(kind, &amount)| amount > 0 && food_value(kind, item_configs) > 0.0)
    })
}

fn find_ground_food(
    entities: &EntityManager,
    from: Tile,
    grid: &Grid,
    item_configs: &BTreeMap<Kind, ItemConfig>,
    radius: i32,
) -> Option<(EntityId, Tile)> {
    let mut best: Option<(EntityId, Tile, f64)> = None;
    for id in entities.ids_with_item() {
        let Some(item) = entities.item(id) else { continue };
        if food_value(&item.kind, item_configs) <= 0.0 {
            continue;
        }
        let Some(pos) = entities.position(id) else { continue };
        let real_distance = manhattan(from, pos.tile()) as f64;
        let weighted = if grid.zone(pos.x, pos.y) == ZoneKind::Stockpile { real_distance * 0.5 } else { real_distance };
        if best.as_ref().is_none_or(|&(_, _, w)| weighted < w) {
            best = Some((id, pos.tile(), weighted));
        }
    }
    best.filter(|&(_, _, weighted)| weighted < f64::from(radius)).map(|(id, tile, _)| (id, tile))
}

fn find_trap(entities: &EntityManager, from: Tile, radius: i32) -> Option<(EntityId, Tile)> {
    entities
        .ids_with_trap()
        .into_iter()
        .filter(|&id| entities.trap(id).is_some_and(|t| t.durability > 0.0))
        .filter_map(|id| Some((id, entities.position(id)?.tile())))
        .map(|(id, tile)| (id, tile, manhattan(from, tile)))
        .filter(|&(_, _, dist)| dist < i64::from(radius))
        .min_by_key(|&(_, _, dist)| dist)
        .map(|(id, tile, _)| (id, tile))
}

fn find_fishing_tile(grid: &Grid, from: Tile, radius: i32) -> Option<Tile> {
    let (fx, fy) = from;
    let mut best: Option<(Tile, i64)> = None;
    for x in (fx - radius).max(0)..=(fx + radius).min(grid.width() - 1) {
        for y in (fy - radius).max(0)..=(fy + radius).min(grid.height() - 1) {
            if grid.terrain(x, y) != Some(TerrainKind::Water) {
                continue;
            }
            let Some(adjacent) = closest_walkable_neighbor(grid, (x, y), from) else { continue };
            let dist = manhattan(from, adjacent);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((adjacent, dist));
            }
        }
    }
    best.filter(|&(_, dist)| dist < i64::from(radius)).map(|(tile, _)| tile)
}

/// Phase 1: urgent hunger/tiredness pre-emption, run before job execution.
pub fn run_urgent_needs(
    entities: &mut EntityManager,
    jobs: &mut JobBoard,
    grid: &Grid,
    zone_index: &ZoneIndex,
    item_configs: &BTreeMap<Kind, ItemConfig>,
    trapping: &TrappingConfig,
    fishing: &FishingConfig,
    urgent: &UrgentThresholds,
) {
    for id in entities.ids_with_position_and_action() {
        let Some(needs) = entities.needs(id).copied() else { continue };
        let action = entities.action(id).copied().unwrap_or(Action::Idle);
        let Some(pos) = entities.position(id).copied() else { continue };

        if needs.hunger > urgent.hunger && !matches!(action, Action::Eat { .. } | Action::Move) {
            cancel_job(entities, jobs, id);
            run_food_ladder(entities, id, pos, grid, item_configs, trapping, fishing);
            continue;
        }

        if needs.tiredness > urgent.tiredness && !matches!(action, Action::Sleep | Action::Move) {
            cancel_job(entities, jobs, id);
            if let Some(bed) = zone_index.nearest_tile_of(pos.tile(), ZoneKind::Residential) {
                if manhattan(pos.tile(), bed) <= 0 {
                    entities.add_action(id, Action::Sleep);
                } else {
                    walk_to(entities, id, bed);
                }
            } else {
                info!(category = "AI", entity = %id, "tired but no residential zone found");
            }
        }
    }
}

fn run_food_ladder(
    entities: &mut EntityManager,
    id: EntityId,
    pos: Position,
    grid: &Grid,
    item_configs: &BTreeMap<Kind, ItemConfig>,
    trapping: &TrappingConfig,
    fishing: &FishingConfig,
) {
    if find_inventory_food(entities, id, item_configs) {
        entities.add_action(id, Action::Eat { target: None });
        return;
    }

    if let Some((food_id, tile)) = find_ground_food(entities, pos.tile(), grid, item_configs, 30) {
        if manhattan(pos.tile(), tile) <= 0 {
            entities.add_action(id, Action::Eat { target: Some(food_id) });
        } else {
            walk_to(entities, id, tile);
        }
        return;
    }

    let trapping_skill = entities.skill(id).map_or(0.0, |s| s.level(&Kind::new("trapping")));
    if trapping_skill > trapping.trapping_skill_threshold {
        if let Some((trap_id, tile)) = find_trap(entities, pos.tile(), trapping.search_radius) {
            if manhattan(pos.tile(), tile) <= 1 {
                entities.add_action(id, Action::Trap { target: Some(trap_id) });
            } else {
                walk_to(entities, id, tile);
            }
            return;
        }
    }

    let fishing_skill = entities.skill(id).map_or(0.0, |s| s.level(&Kind::new("fishing")));
    if fishing_skill > fishing.fishing_skill_threshold {
        if let Some(tile) = find_fishing_tile(grid, pos.tile(), fishing.search_radius) {
            if manhattan(pos.tile(), tile) <= 0 {
                entities.add_action(id, Action::Fish);
            } else {
                walk_to(entities, id, tile);
            }
            return;
        }
    }

    let logs = entities.inventory(id).map_or(0, |inv| inv.items.get(&Kind::new("log")).copied().unwrap_or(0));
    if logs >= 2 {
        entities.add_action(id, Action::Trap { target: None });
        return;
    }

    info!(category = "AI", entity = %id, "hungry, no food found");
}

/// Phase 2: drive every agent currently assigned to a job.
pub fn run_job_execution(entities: &mut EntityManager, jobs: &mut JobBoard, grid: &Grid, zone_index: &ZoneIndex) {
    for id in entities.ids_with_job_component() {
        let Some(job_component) = entities.job_component(id) else { continue };
        let job_id = job_component.job_id;
        let Some(job) = jobs.by_id(job_id).cloned() else {
            entities.remove_job_component(id);
            entities.add_action(id, Action::Idle);
            continue;
        };
        let Some(pos) = entities.position(id).copied() else { continue };

        match job.kind {
            JobKind::Chop => run_chop_job(entities, jobs, grid, id, &job, pos),
            JobKind::Haul => run_haul_job(entities, jobs, zone_index, id, &job, pos),
            JobKind::Plant => run_plant_job(entities, jobs, id, &job, pos),
            JobKind::Harvest => run_harvest_job(entities, jobs, id, &job, pos),
            JobKind::Trap => run_walk_then_act(entities, jobs, grid, id, &job, pos, 1, |target| Action::Trap { target: Some(target) }),
            JobKind::Fish => run_walk_then_act(entities, jobs, grid, id, &job, pos, 0, |_| Action::Fish),
            JobKind::TendFire => {
                if manhattan(pos.tile(), job.target_tile) <= 0 {
                    entities.add_action(id, Action::TendFire);
                    cancel_job(entities, jobs, id);
                } else if let Some(neighbor) = closest_walkable_neighbor(grid, job.target_tile, pos.tile()) {
                    walk_to(entities, id, neighbor);
                } else {
                    cancel_job(entities, jobs, id);
                    entities.add_action(id, Action::Idle);
                }
            }
        }
    }
}

fn run_chop_job(entities: &mut EntityManager, jobs: &mut JobBoard, grid: &Grid, id: EntityId, job: &crate::job::Job, pos: Position) {
    if let Some(target) = job.target_entity {
        if !entities.has_entity(target) {
            jobs.complete(job.id);
            entities.remove_job_component(id);
            entities.add_action(id, Action::Idle);
            return;
        }
        let action = entities.action(id).copied().unwrap_or(Action::Idle);
        if !matches!(action, Action::Idle | Action::Chop { .. }) {
            return;
        }
        if manhattan(pos.tile(), job.target_tile) <= 1 {
            entities.add_action(id, Action::Chop { target });
        } else if let Some(neighbor) = closest_walkable_neighbor(grid, job.target_tile, pos.tile()) {
            walk_to(entities, id, neighbor);
        } else {
            info!(category = "AI", entity = %id, "can't reach tree");
            jobs.complete(job.id);
            entities.remove_job_component(id);
        }
    } else {
        jobs.complete(job.id);
        entities.remove_job_component(id);
        entities.add_action(id, Action::Idle);
    }
}

fn run_haul_job(entities: &mut EntityManager, jobs: &mut JobBoard, zone_index: &ZoneIndex, id: EntityId, job: &crate::job::Job, pos: Position) {
    let Some(required_item) = job.required_item.clone() else {
        jobs.complete(job.id);
        entities.remove_job_component(id);
        entities.add_action(id, Action::Idle);
        return;
    };
    let has_item = entities.inventory(id).is_some_and(|inv| inv.items.get(&required_item).copied().unwrap_or(0) > 0);

    if !has_item {
        if let Some(target) = job.target_entity {
            if !entities.has_entity(target) {
                jobs.complete(job.id);
                entities.remove_job_component(id);
                entities.add_action(id, Action::Idle);
                return;
            }
            if manhattan(pos.tile(), job.target_tile) <= 0 {
                entities.add_action(id, Action::Pickup { target });
            } else {
                walk_to(entities, id, job.target_tile);
            }
        }
        return;
    }

    let Some(stockpile) = zone_index.nearest_tile_of(pos.tile(), ZoneKind::Stockpile) else {
        entities.add_action(id, Action::Drop);
        jobs.complete(job.id);
        entities.remove_job_component(id);
        info!(category = "AI", entity = %id, "no stockpile to haul to");
        return;
    };

    if manhattan(pos.tile(), stockpile) <= 0 {
        entities.add_action(id, Action::Drop);
    } else {
        walk_to(entities, id, stockpile);
    }
}

fn run_plant_job(entities: &mut EntityManager, jobs: &mut JobBoard, id: EntityId, job: &crate::job::Job, pos: Position) {
    if manhattan(pos.tile(), job.target_tile) <= 0 {
        entities.add_action(id, Action::Plant);
        jobs.complete(job.id);
        entities.remove_job_component(id);
    } else {
        walk_to(entities, id, job.target_tile);
    }
}

fn run_harvest_job(entities: &mut EntityManager, jobs: &mut JobBoard, id: EntityId, job: &crate::job::Job, pos: Position) {
    let Some(target) = job.target_entity else {
        jobs.complete(job.id);
        entities.remove_job_component(id);
        entities.add_action(id, Action::Idle);
        return;
    };
    if !entities.has_entity(target) {
        jobs.complete(job.id);
        entities.remove_job_component(id);
        entities.add_action(id, Action::Idle);
        return;
    }
    if manhattan(pos.tile(), job.target_tile) <= 1 {
        entities.add_action(id, Action::Harvest { target });
        jobs.complete(job.id);
        entities.remove_job_component(id);
    } else {
        walk_to(entities, id, job.target_tile);
    }
}

fn run_walk_then_act(
    entities: &mut EntityManager,
    jobs: &mut JobBoard,
    grid: &Grid,
    id: EntityId,
    job: &crate::job::Job,
    pos: Position,
    arrival_threshold: i64,
    make_action: impl FnOnce(EntityId) -> Action,
) {
    if let Some(target) = job.target_entity {
        if !entities.has_entity(target) {
            jobs.complete(job.id);
            entities.remove_job_component(id);
            entities.add_action(id, Action::Idle);
            return;
        }
    }
    if manhattan(pos.tile(), job.target_tile) <= arrival_threshold {
        let target = job.target_entity.unwrap_or(id);
        entities.add_action(id, make_action(target));
    } else if let Some(neighbor) = closest_walkable_neighbor(grid, job.target_tile, pos.tile()) {
        walk_to(entities, id, neighbor);
    } else {
        jobs.complete(job.id);
        entities.remove_job_component(id);
        entities.add_action(id, Action::Idle);
    }
}

/// Phase 3: idle, jobless agents accept the first eligible available job.
pub fn run_job_discovery(entities: &mut EntityManager, jobs: &mut JobBoard) {
    for id in entities.ids_with_position_and_action() {
        if entities.has_job_component(id) {
            continue;
        }
        if entities.action(id) != Some(&Action::Idle) {
            continue;
        }
        let Some(skill) = entities.skill(id) else { continue };

        let candidate = jobs
            .available()
            .into_iter()
            .find(|job| job.required_skill.as_ref().is_none_or(|required| skill.level(required) > 0.0))
            .map(|job| (job.id, job.kind, job.target_tile, job.target_entity));

        let Some((job_id, kind, target_tile, target_entity)) = candidate else { continue };
        if jobs.assign(job_id, id).is_err() {
            continue;
        }
        entities.add_job_component(
            id,
            crate::components::JobComponent { job_id, kind, target_tile: Some(target_tile), target_entity },
        );
        info!(category = "AI", entity = %id, ?kind, "accepted job");
    }
}
