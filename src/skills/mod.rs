//! Skill tree definitions and unlock resolution.

mod catalog;
mod resolver;
mod store;
mod types;

pub use catalog::{SkillCatalog, SkillGraphError, default_catalog};
pub use resolver::{is_unlocked, resolve};
pub use store::{
	COMPLETED_KEY, CompletionStore, LocalStorageStore, MemoryStore, StoreError, mark_completed,
	unmark_completed,
};
pub use types::{CompletedSet, Position, SkillDefinition, SkillState};
