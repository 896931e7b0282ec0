use std::collections::{HashMap, VecDeque};

use log::{debug, warn};
use thiserror::Error;

use super::resolver;
use super::types::{CompletedSet, SkillDefinition, SkillState};

/// Reasons a set of skill definitions is refused at load time.
#[derive(Error, Debug)]
pub enum SkillGraphError {
	#[error("skill id `{0}` is defined more than once")]
	DuplicateId(String),

	#[error("prerequisite cycle involving: {}", .0.join(", "))]
	Cycle(Vec<String>),

	#[error("invalid skill definitions: {0}")]
	Parse(#[from] serde_json::Error),
}

/// A validated, acyclic set of skill definitions.
#[derive(Clone, Debug)]
pub struct SkillCatalog {
	skills: Vec<SkillDefinition>,
	index: HashMap<String, usize>,
	order: Vec<String>,
}

impl SkillCatalog {
	/// Validate definitions: ids must be unique and prerequisites acyclic.
	///
	/// Prerequisites naming unknown ids are accepted; those skills simply
	/// never unlock.
	pub fn new(skills: Vec<SkillDefinition>) -> Result<Self, SkillGraphError> {
		let mut index = HashMap::with_capacity(skills.len());
		for (i, skill) in skills.iter().enumerate() {
			if index.insert(skill.id.clone(), i).is_some() {
				return Err(SkillGraphError::DuplicateId(skill.id.clone()));
			}
		}

		for skill in &skills {
			for req in &skill.prerequisite_ids {
				if !index.contains_key(req) {
					warn!(
						"skill `{}` requires unknown skill `{}`; it will stay locked",
						skill.id, req
					);
				}
			}
		}

		let order = topological_order(&skills, &index)?;
		debug!("Loaded {} skills", skills.len());
		Ok(Self {
			skills,
			index,
			order,
		})
	}

	/// Parse a JSON array of definitions and validate it.
	pub fn from_json(json: &str) -> Result<Self, SkillGraphError> {
		let skills: Vec<SkillDefinition> = serde_json::from_str(json)?;
		Self::new(skills)
	}

	pub fn skills(&self) -> &[SkillDefinition] {
		&self.skills
	}

	pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
		self.index.get(id).map(|&i| &self.skills[i])
	}

	/// Ids ordered so that every skill comes after its prerequisites.
	pub fn topological_order(&self) -> &[String] {
		&self.order
	}

	/// Skills that list `id` among their prerequisites.
	pub fn dependents<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SkillDefinition> + 'a {
		self.skills
			.iter()
			.filter(move |s| s.prerequisite_ids.iter().any(|req| req == id))
	}

	pub fn resolve(&self, completed: &CompletedSet) -> Vec<SkillState> {
		resolver::resolve(&self.skills, completed)
	}
}

/// Kahn's algorithm over the known prerequisite edges.
fn topological_order(
	skills: &[SkillDefinition],
	index: &HashMap<String, usize>,
) -> Result<Vec<String>, SkillGraphError> {
	let mut in_degree = vec![0usize; skills.len()];
	let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); skills.len()];

	for (i, skill) in skills.iter().enumerate() {
		for req in &skill.prerequisite_ids {
			if let Some(&r) = index.get(req) {
				in_degree[i] += 1;
				dependents[r].push(i);
			}
		}
	}

	let mut queue: VecDeque<usize> = (0..skills.len()).filter(|&i| in_degree[i] == 0).collect();
	let mut order = Vec::with_capacity(skills.len());

	while let Some(current) = queue.pop_front() {
		order.push(skills[current].id.clone());
		for &dep in &dependents[current] {
			in_degree[dep] -= 1;
			if in_degree[dep] == 0 {
				queue.push_back(dep);
			}
		}
	}

	if order.len() != skills.len() {
		let stuck = skills
			.iter()
			.zip(&in_degree)
			.filter(|(_, degree)| **degree > 0)
			.map(|(s, _)| s.id.clone())
			.collect();
		return Err(SkillGraphError::Cycle(stuck));
	}

	Ok(order)
}

/// The built-in web development constellation.
pub fn default_catalog() -> Result<SkillCatalog, SkillGraphError> {
	SkillCatalog::from_json(include_str!("default_catalog.json"))
}
