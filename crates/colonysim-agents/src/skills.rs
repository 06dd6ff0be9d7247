//! Skill proficiency helpers.
//!
//! Unlike the teacher's level/XP skill system, this crate's skills are a
//! single continuous proficiency value per skill kind in `[0, 1]`
//! (`components::SkillComponent`), matching the distilled spec's data
//! model directly (no separate level-up curve). This module holds the
//! small set of proficiency bump/clamp helpers shared by the systems that
//! award skill practice (chopping, trapping, fishing).

use colonysim_types::Kind;

use crate::components::SkillComponent;

/// Proficiency is clamped to this ceiling.
pub const MAX_PROFICIENCY: f64 = 1.0;

/// Increase `kind`'s proficiency by `amount`, clamped to `[0, 1]`.
///
/// Skills not yet practiced start from `0.0`.
pub fn practice(skills: &mut SkillComponent, kind: &Kind, amount: f64) {
    let entry = skills.proficiencies.entry(kind.clone()).or_insert(0.0);
    *entry = (*entry + amount).clamp(0.0, MAX_PROFICIENCY);
}
