//! The job board: a priority-ordered queue of outstanding work units.
//!
//! Grounded on `original_source/src/systems/job_system.py`'s `Job`/
//! `JobSystem` (priority-sorted list, unassigned-first availability query,
//! assignment by entity id, completion by removal), re-expressed with a
//! typed `JobKind` and [`colonysim_types::JobId`] instead of a string tag
//! and a `uuid4` string.

use colonysim_types::{EntityId, IdGenerator, IdSpaceExhausted, JobId};
use colonysim_world::Tile;

use crate::error::AgentError;

/// The fixed set of work a Job Board record can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobKind {
    /// Fell a tree for logs.
    Chop,
    /// Carry a dropped item to a stockpile.
    Haul,
    /// Plant a seed on a farm tile.
    Plant,
    /// Gather a ripe crop.
    Harvest,
    /// Check an existing trap.
    Trap,
    /// Fish from a water tile.
    Fish,
    /// Add fuel to an existing fire.
    TendFire,
}

/// Default dispatch priority for a job kind (higher dispatches first).
#[must_use]
pub const fn default_priority(kind: JobKind) -> i32 {
    match kind {
        JobKind::Harvest => 5,
        JobKind::Haul => 2,
        JobKind::Chop | JobKind::Plant | JobKind::Trap | JobKind::Fish | JobKind::TendFire => 1,
    }
}

/// A unit of outstanding work, owned by the [`JobBoard`].
///
/// Distinct from [`crate::components::JobComponent`]: this is the board's
/// own record, referenced by id from the worker's component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Stable identity for this job.
    pub id: JobId,
    /// The kind of work.
    pub kind: JobKind,
    /// Dispatch priority; higher goes first.
    pub priority: i32,
    /// Tile the job is centered on.
    pub target_tile: Tile,
    /// Entity the job concerns (tree, crop, trap, item), if any.
    pub target_entity: Option<EntityId>,
    /// Skill required to accept this job, if any.
    pub required_skill: Option<colonysim_types::Kind>,
    /// Item kind required to fulfill this job (hauling), if any.
    pub required_item: Option<colonysim_types::Kind>,
    /// The entity currently working this job, if assigned.
    pub assignee: Option<EntityId>,
}

/// A priority-ordered queue of [`Job`] records.
///
/// No internal timer: consumers (Agent AI) pull from [`JobBoard::available`]
/// each tick.
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    ids: IdGenerator,
    jobs: Vec<Job>,
}

impl JobBoard {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a new job with the given parameters, re-sorting by priority
    /// descending. Returns the job's newly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`IdSpaceExhausted`] if the 64-bit id space is exhausted.
    pub fn add(
        &mut self,
        kind: JobKind,
        priority: i32,
        target_tile: Tile,
        target_entity: Option<EntityId>,
        required_skill: Option<colonysim_types::Kind>,
        required_item: Option<colonysim_types::Kind>,
    ) -> Result<JobId, IdSpaceExhausted> {
        let id = JobId::from_raw(self.ids.next_raw()?);
        self.jobs.push(Job {
            id,
            kind,
            priority,
            target_tile,
            target_entity,
            required_skill,
            required_item,
            assignee: None,
        });
        self.jobs.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(id)
    }

    /// Unassigned jobs, in priority order (highest first).
    #[must_use]
    pub fn available(&self) -> Vec<&Job> {
        self.jobs.iter().filter(|job| job.assignee.is_none()).collect()
    }

    /// Assign `job_id` to `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::JobNotFound`] if no job with that id exists.
    pub fn assign(&mut self, job_id: JobId, entity: EntityId) -> Result<(), AgentError> {
        let job = self.jobs.iter_mut().find(|j| j.id == job_id).ok_or(AgentError::JobNotFound(job_id))?;
        job.assignee = Some(entity);
        Ok(())
    }

    /// Remove a job from the board (on completion or cancellation).
    pub fn complete(&mut self, job_id: JobId) {
        self.jobs.retain(|j| j.id != job_id);
    }

    /// Look up a job by id.
    #[must_use]
    pub fn by_id(&self, job_id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    /// Whether any job currently targets `entity` (used by job-generation
    /// to avoid issuing duplicate haul/chop jobs for the same target).
    #[must_use]
    pub fn targets_entity(&self, entity: EntityId) -> bool {
        self.jobs.iter().any(|j| j.target_entity == Some(entity))
    }

    /// Whether a job of the given kind currently targets `entity`.
    #[must_use]
    pub fn targets_entity_of_kind(&self, entity: EntityId, kind: JobKind) -> bool {
        self.jobs.iter().any(|j| j.kind == kind && j.target_entity == Some(entity))
    }

    /// Total job count on the board, assigned or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Count of jobs of the given kind currently on the board.
    #[must_use]
    pub fn count_of_kind(&self, kind: JobKind) -> usize {
        self.jobs.iter().filter(|j| j.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sorts_by_priority_descending() {
        let mut board = JobBoard::new();
        board.add(JobKind::Chop, 1, (0, 0), None, None, None).expect("add ok");
        board.add(JobKind::Harvest, 5, (1, 1), None, None, None).expect("add ok");
        board.add(JobKind::Haul, 2, (2, 2), None, None, None).expect("add ok");
        let priorities: Vec<i32> = board.available().iter().map(|j| j.priority).collect();
        assert_eq!(priorities, vec![5, 2, 1]);
    }

    #[test]
    fn assigned_jobs_excluded_from_available() {
        let mut board = JobBoard::new();
        let id = board.add(JobKind::Chop, 1, (0, 0), None, None, None).expect("add ok");
        board.assign(id, EntityId::from_raw(1)).expect("assign ok");
        assert!(board.available().is_empty());
    }

    #[test]
    fn complete_removes_job() {
        let mut board = JobBoard::new();
        let id = board.add(JobKind::Chop, 1, (0, 0), None, None, None).expect("add ok");
        board.complete(id);
        assert!(board.by_id(id).is_none());
    }

    #[test]
    fn assign_unknown_job_errors() {
        let mut board = JobBoard::new();
        let result = board.assign(JobId::from_raw(999), EntityId::from_raw(1));
        assert!(result.is_err());
    }

    #[test]
    fn default_priorities_match_convention() {
        assert_eq!(default_priority(JobKind::Harvest), 5);
        assert_eq!(default_priority(JobKind::Haul), 2);
        assert_eq!(default_priority(JobKind::Chop), 1);
    }

    #[test]
    fn targets_entity_detects_existing_job() {
        let mut board = JobBoard::new();
        let target = EntityId::from_raw(7);
        board.add(JobKind::Chop, 1, (0, 0), Some(target), None, None).expect("add ok");
        assert!(board.targets_entity(target));
        assert!(!board.targets_entity(EntityId::from_raw(8)));
    }

    #[test]
    fn targets_entity_of_kind_distinguishes_job_kinds() {
        let mut board = JobBoard::new();
        let target = EntityId::from_raw(7);
        board.add(JobKind::Chop, 1, (0, 0), Some(target), None, None).expect("add ok");
        assert!(board.targets_entity_of_kind(target, JobKind::Chop));
        assert!(!board.targets_entity_of_kind(target, JobKind::Haul));
    }
}
