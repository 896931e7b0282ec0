use log::{info, warn};
use thiserror::Error;
use web_sys::Storage;

use super::types::CompletedSet;

/// `localStorage` key holding the completed skill ids.
pub const COMPLETED_KEY: &str = "skillverse_completed";

#[derive(Error, Debug)]
pub enum StoreError {
	#[error("storage is unavailable")]
	Unavailable,

	#[error("storage backend error: {0}")]
	Backend(String),

	#[error("corrupt completion record: {0}")]
	Json(#[from] serde_json::Error),
}

/// Where the completed set lives between sessions.
pub trait CompletionStore {
	fn load(&self) -> Result<CompletedSet, StoreError>;
	fn save(&mut self, completed: &CompletedSet) -> Result<(), StoreError>;
}

/// Load the set for a write. A corrupt record is replaced by the write
/// instead of blocking it.
fn load_for_update<S: CompletionStore + ?Sized>(
	store: &S,
) -> Result<(CompletedSet, bool), StoreError> {
	match store.load() {
		Ok(completed) => Ok((completed, false)),
		Err(StoreError::Json(e)) => {
			warn!("Overwriting corrupt completion record: {}", e);
			Ok((CompletedSet::new(), true))
		}
		Err(e) => Err(e),
	}
}

/// Record `id` as completed and persist the result.
pub fn mark_completed<S: CompletionStore + ?Sized>(
	store: &mut S,
	id: &str,
) -> Result<CompletedSet, StoreError> {
	let (mut completed, corrupt) = load_for_update(store)?;
	let changed = completed.insert(id.to_string());
	if changed || corrupt {
		store.save(&completed)?;
	}
	if changed {
		info!("Completed skill `{}`", id);
	}
	Ok(completed)
}

/// Drop `id` from the completed set and persist the result.
pub fn unmark_completed<S: CompletionStore + ?Sized>(
	store: &mut S,
	id: &str,
) -> Result<CompletedSet, StoreError> {
	let (mut completed, corrupt) = load_for_update(store)?;
	let changed = completed.remove(id);
	if changed || corrupt {
		store.save(&completed)?;
	}
	if changed {
		info!("Un-completed skill `{}`", id);
	}
	Ok(completed)
}

fn decode(raw: Option<&str>) -> Result<CompletedSet, StoreError> {
	match raw {
		Some(raw) => {
			let ids: Vec<String> = serde_json::from_str(raw)?;
			Ok(ids.into_iter().collect())
		}
		None => Ok(CompletedSet::new()),
	}
}

fn encode(completed: &CompletedSet) -> Result<String, StoreError> {
	let ids: Vec<&String> = completed.iter().collect();
	Ok(serde_json::to_string(&ids)?)
}

/// Browser `localStorage` backed store.
pub struct LocalStorageStore {
	storage: Storage,
}

impl LocalStorageStore {
	pub fn open() -> Result<Self, StoreError> {
		let window = web_sys::window().ok_or(StoreError::Unavailable)?;
		let storage = window
			.local_storage()
			.map_err(|e| StoreError::Backend(format!("{e:?}")))?
			.ok_or(StoreError::Unavailable)?;
		Ok(Self { storage })
	}

	/// Load the completed set, treating any failure as "nothing completed".
	pub fn load_or_default(&self) -> CompletedSet {
		self.load().unwrap_or_else(|e| {
			warn!("Ignoring stored progress: {}", e);
			CompletedSet::new()
		})
	}
}

impl CompletionStore for LocalStorageStore {
	fn load(&self) -> Result<CompletedSet, StoreError> {
		let raw = self
			.storage
			.get_item(COMPLETED_KEY)
			.map_err(|e| StoreError::Backend(format!("{e:?}")))?;
		decode(raw.as_deref())
	}

	fn save(&mut self, completed: &CompletedSet) -> Result<(), StoreError> {
		let raw = encode(completed)?;
		self.storage
			.set_item(COMPLETED_KEY, &raw)
			.map_err(|e| StoreError::Backend(format!("{e:?}")))
	}
}

/// In-process store holding the serialized record, like `localStorage` does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	raw: Option<String>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start from an existing serialized record.
	pub fn with_raw(raw: impl Into<String>) -> Self {
		Self {
			raw: Some(raw.into()),
		}
	}

	pub fn raw(&self) -> Option<&str> {
		self.raw.as_deref()
	}
}

impl CompletionStore for MemoryStore {
	fn load(&self) -> Result<CompletedSet, StoreError> {
		decode(self.raw.as_deref())
	}

	fn save(&mut self, completed: &CompletedSet) -> Result<(), StoreError> {
		self.raw = Some(encode(completed)?);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_store_loads_nothing() {
		assert!(MemoryStore::new().load().unwrap().is_empty());
	}

	#[test]
	fn mark_and_unmark_write_through() {
		let mut store = MemoryStore::new();
		mark_completed(&mut store, "html").unwrap();
		let set = mark_completed(&mut store, "css").unwrap();
		assert_eq!(set.len(), 2);
		assert_eq!(store.raw(), Some(r#"["css","html"]"#));

		let set = unmark_completed(&mut store, "html").unwrap();
		assert!(!set.contains("html"));
		assert_eq!(store.load().unwrap(), set);
	}

	#[test]
	fn marking_twice_is_a_no_op() {
		let mut store = MemoryStore::with_raw(r#"["html"]"#);
		let set = mark_completed(&mut store, "html").unwrap();
		assert_eq!(set.len(), 1);
		assert_eq!(store.raw(), Some(r#"["html"]"#));
	}

	#[test]
	fn unmarking_unknown_id_leaves_store_untouched() {
		let mut store = MemoryStore::new();
		unmark_completed(&mut store, "ghost").unwrap();
		assert_eq!(store.raw(), None);
	}

	#[test]
	fn corrupt_record_fails_to_load() {
		let store = MemoryStore::with_raw("{not json");
		assert!(matches!(store.load(), Err(StoreError::Json(_))));
	}

	#[test]
	fn writes_replace_a_corrupt_record() {
		let mut store = MemoryStore::with_raw("{not json");
		for id in ["html", "css", "javascript"] {
			mark_completed(&mut store, id).unwrap();
		}
		assert_eq!(store.raw(), Some(r#"["css","html","javascript"]"#));
		assert_eq!(store.load().unwrap().len(), 3);
	}

	#[test]
	fn unmarking_repairs_a_corrupt_record() {
		let mut store = MemoryStore::with_raw("[1, 2");
		let set = unmark_completed(&mut store, "html").unwrap();
		assert!(set.is_empty());
		assert_eq!(store.raw(), Some("[]"));
	}
}
