//! Farming: crop lifecycle transitions and harvest-job emission.
//!
//! Growth math itself lives in `colonysim_world::farming`; this module owns
//! the per-tick lifecycle walk (seed → growing → ripe) over [`Crop`]
//! components and the harvest-job emission onto the [`JobBoard`], grounded
//! on `original_source/src/systems/farming_system.py`. Automatic
//! plant-job generation is explicitly not implemented -- the original
//! stubs it (`pass`) and the distilled spec never calls for it.

use std::collections::BTreeMap;

use colonysim_types::Kind;
use colonysim_world::{advance_progress, is_ripe, CropState};
use tracing::info;

use crate::components::Crop;
use crate::config::CropConfig;
use crate::entity::EntityManager;
use crate::job::{default_priority, JobBoard, JobKind};

/// Advance every crop's lifecycle by one tick.
///
/// `days_elapsed` is the fraction of a day this tick covers. `crop_configs`
/// maps crop kind to its growth parameters; a crop whose kind is absent
/// from the map uses [`CropConfig::default`].
pub fn update_crops(
    entities: &mut EntityManager,
    crop_configs: &BTreeMap<Kind, CropConfig>,
    days_elapsed: f64,
    growth_multiplier: f64,
) {
    for id in entities.ids_with_crop() {
        let Some(crop) = entities.crop_mut(id) else {
            continue;
        };
        match crop.state {
            CropState::Seed => {
                crop.state = CropState::Growing;
            }
            CropState::Growing => {
                let growth_days = crop_configs.get(&crop.kind).map_or(CropConfig::default().growth_days, |c| c.growth_days);
                crop.growth_progress =
                    advance_progress(crop.growth_progress, days_elapsed, growth_days, growth_multiplier);
                if is_ripe(crop.growth_progress) {
                    crop.state = CropState::Ripe;
                    info!(category = "GAMEPLAY", entity = %id, kind = %crop.kind, "crop is ripe");
                }
            }
            CropState::Ripe => {}
        }
    }
}

/// Enqueue a harvest job for every ripe crop not already targeted by one.
///
/// # Errors
///
/// Returns [`colonysim_types::IdSpaceExhausted`] if the job-id space is
/// exhausted.
pub fn enqueue_harvest_jobs(
    entities: &EntityManager,
    jobs: &mut JobBoard,
) -> Result<(), colonysim_types::IdSpaceExhausted> {
    for id in entities.ids_with_crop() {
        let Some(crop) = entities.crop(id) else {
            continue;
        };
        if crop.state != CropState::Ripe || jobs.targets_entity(id) {
            continue;
        }
        let Some(tile) = entities.position(id).map(|p| p.tile()) else {
            continue;
        };
        jobs.add(JobKind::Harvest, default_priority(JobKind::Harvest), tile, Some(id), Some(Kind::new("farming")), None)?;
        info!(category = "AI", entity = %id, "harvest job enqueued");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::components::Position;

    use super::*;

    fn make_crop(entities: &mut EntityManager, kind: &str, state: CropState, progress: f64) -> colonysim_types::EntityId {
        let id = entities.create_entity().expect("id space available");
        entities.add_crop(id, Crop { kind: Kind::new(kind), growth_progress: progress, state });
        entities.add_position(id, Position::new(1, 1));
        id
    }

    #[test]
    fn seed_transitions_to_growing_without_progress() {
        let mut entities = EntityManager::new();
        let id = make_crop(&mut entities, "wheat", CropState::Seed, 0.0);
        update_crops(&mut entities, &BTreeMap::new(), 1.0, 1.0);
        let crop = entities.crop(id).expect("crop present");
        assert_eq!(crop.state, CropState::Growing);
        assert_eq!(crop.growth_progress, 0.0);
    }

    #[test]
    fn growing_crop_ripens_at_full_progress() {
        let mut entities = EntityManager::new();
        let mut configs = BTreeMap::new();
        configs.insert(Kind::new("wheat"), CropConfig { growth_days: 1.0, yield_table: BTreeMap::new() });
        let id = make_crop(&mut entities, "wheat", CropState::Growing, 0.99);
        update_crops(&mut entities, &configs, 1.0, 1.0);
        assert_eq!(entities.crop(id).expect("crop present").state, CropState::Ripe);
    }

    #[test]
    fn ripe_crop_enqueues_harvest_job_once() {
        let mut entities = EntityManager::new();
        let id = make_crop(&mut entities, "wheat", CropState::Ripe, 1.0);
        let mut jobs = JobBoard::new();
        enqueue_harvest_jobs(&entities, &mut jobs).expect("enqueue ok");
        assert_eq!(jobs.count_of_kind(JobKind::Harvest), 1);
        enqueue_harvest_jobs(&entities, &mut jobs).expect("enqueue ok");
        assert_eq!(jobs.count_of_kind(JobKind::Harvest), 1, "no duplicate job for the same crop");
        let _ = id;
    }

    #[test]
    fn non_ripe_crop_does_not_enqueue() {
        let mut entities = EntityManager::new();
        make_crop(&mut entities, "wheat", CropState::Growing, 0.5);
        let mut jobs = JobBoard::new();
        enqueue_harvest_jobs(&entities, &mut jobs).expect("enqueue ok");
        assert!(jobs.is_empty());
    }
}
