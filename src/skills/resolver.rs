use super::types::{CompletedSet, SkillDefinition, SkillState};

/// A skill is unlocked once every prerequisite is completed.
///
/// Prerequisites that name no known skill are never satisfied, so such a
/// skill stays locked for good.
pub fn is_unlocked(skill: &SkillDefinition, completed: &CompletedSet) -> bool {
	skill
		.prerequisite_ids
		.iter()
		.all(|req| completed.contains(req))
}

/// Project every definition onto its state for the given completed set.
///
/// Output keeps the input order and length.
pub fn resolve(skills: &[SkillDefinition], completed: &CompletedSet) -> Vec<SkillState> {
	skills
		.iter()
		.map(|skill| SkillState {
			definition: skill.clone(),
			completed: completed.contains(&skill.id),
			unlocked: is_unlocked(skill, completed),
		})
		.collect()
}
