use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ids of every skill the user has finished.
pub type CompletedSet = BTreeSet<String>;

/// Fixed layout coordinates, in percent of the available area on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// A static, learnable topic in the skill tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	/// Constellation the skill belongs to; only used to colour galaxy nodes.
	#[serde(default)]
	pub category: String,
	#[serde(default, alias = "requires")]
	pub prerequisite_ids: Vec<String>,
	#[serde(default)]
	pub position: Position,
}

#[cfg(test)]
impl SkillDefinition {
	pub(crate) fn new(
		id: &str,
		name: &str,
		description: &str,
		category: &str,
		prerequisites: &[&str],
		(x, y): (f64, f64),
	) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: description.into(),
			category: category.into(),
			prerequisite_ids: prerequisites.iter().map(|p| (*p).to_string()).collect(),
			position: Position { x, y },
		}
	}
}

/// A skill definition annotated against a completed set.
///
/// Built fresh on every resolution; change the completed set and resolve
/// again instead of editing one of these.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillState {
	pub definition: SkillDefinition,
	pub completed: bool,
	pub unlocked: bool,
}

impl SkillState {
	pub fn id(&self) -> &str {
		&self.definition.id
	}

	/// Completed skills and those ready to start.
	pub fn is_reachable(&self) -> bool {
		self.completed || self.unlocked
	}
}
