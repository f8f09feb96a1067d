//! The durable record of user approved pending install and remove operations.

use std::collections::HashSet;

use serde::*;

const CHANGESET_FILENAME: &str = "changeset.bin";

/// User queued install and remove intents per module id.
///
/// A module id is never a member of both sets at once; queueing one intent
/// withdraws the opposite one. The set survives restarts through
/// [`load_from_disk`](Self::load_from_disk) / [`save_to_disk`](Self::save_to_disk)
/// and is purely in-memory between those calls.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ChangeSet {
	pending_install: HashSet<String>,
	pending_remove: HashSet<String>,
	#[serde(skip)]
	dirty: bool,
}

impl ChangeSet {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn queue_install(&mut self, id: impl Into<String>) {
		let id = id.into();
		log::trace!("Queueing install of module {}.", id);
		self.pending_remove.remove(&id);
		self.pending_install.insert(id);
		self.dirty = true;
	}

	pub fn queue_remove(&mut self, id: impl Into<String>) {
		let id = id.into();
		log::trace!("Queueing removal of module {}.", id);
		self.pending_install.remove(&id);
		self.pending_remove.insert(id);
		self.dirty = true;
	}

	/// Withdraws any pending operation for `id`. No-op when none is queued.
	pub fn unqueue(&mut self, id: &str) {
		let removed = self.pending_install.remove(id) | self.pending_remove.remove(id);
		if removed {
			self.dirty = true;
		}
	}

	pub fn is_module_installed(&self, id: &str) -> bool {
		self.pending_install.contains(id) && !self.pending_remove.contains(id)
	}

	pub fn is_module_removed(&self, id: &str) -> bool {
		self.pending_remove.contains(id) && !self.pending_install.contains(id)
	}

	pub fn pending_installs(&self) -> impl Iterator<Item = &str> {
		self.pending_install.iter().map(String::as_str)
	}

	pub fn pending_removes(&self) -> impl Iterator<Item = &str> {
		self.pending_remove.iter().map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.pending_install.is_empty() && self.pending_remove.is_empty()
	}

	/// Whether there are mutations not yet written to disk.
	pub fn dirty(&self) -> bool {
		self.dirty
	}

	fn storage_path(options: &crate::AddonRsOptions) -> std::path::PathBuf {
		options.data_dir().join(CHANGESET_FILENAME)
	}

	/// Reads the persisted change set, or an empty one when none was saved yet.
	pub fn load_from_disk(options: &crate::AddonRsOptions) -> crate::Result<Self> {
		let path = Self::storage_path(options);
		if !path.exists() {
			log::debug!("No persisted change set at {}, starting empty.", path.display());
			return Ok(Default::default())
		}

		let data = std::fs::read(&path)?;
		let mut changeset = bincode::deserialize::<ChangeSet>(&data)?;
		changeset.repair();
		Ok(changeset)
	}

	/* Stored state predating the disjointness rule can list an id on both
	   sides. The remove intent wins as the safer one to honor. */
	fn repair(&mut self) {
		let conflicting: Vec<String> = self.pending_install
			.intersection(&self.pending_remove)
			.cloned()
			.collect();
		for id in conflicting {
			log::warn!("Persisted change set lists module {} for install and remove, keeping the remove.", id);
			self.pending_install.remove(&id);
			self.dirty = true;
		}
	}

	pub fn save_to_disk(&mut self, options: &crate::AddonRsOptions) -> crate::Result<()> {
		let path = Self::storage_path(options);
		let data = bincode::serialize(self)?;
		std::fs::write(&path, data)?;
		self.dirty = false;
		log::debug!("Saved change set to {}.", path.display());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn changeset_install_then_remove_keeps_remove() {
		let mut changeset = ChangeSet::new();
		changeset.queue_install("a");
		changeset.queue_remove("a");
		assert!(!changeset.is_module_installed("a"));
		assert!(changeset.is_module_removed("a"));
	}

	#[test]
	fn changeset_remove_then_install_keeps_install() {
		let mut changeset = ChangeSet::new();
		changeset.queue_remove("a");
		changeset.queue_install("a");
		assert!(changeset.is_module_installed("a"));
		assert!(!changeset.is_module_removed("a"));
	}

	#[test]
	fn changeset_sets_stay_disjoint() {
		let mut changeset = ChangeSet::new();
		for _ in 0..3 {
			changeset.queue_install("a");
			changeset.queue_remove("a");
			changeset.queue_install("a");
		}
		assert_eq!(changeset.pending_installs().count(), 1);
		assert_eq!(changeset.pending_removes().count(), 0);
	}

	#[test]
	fn changeset_unqueue_clears_both_sides() {
		let mut changeset = ChangeSet::new();
		changeset.queue_install("a");
		changeset.unqueue("a");
		changeset.queue_remove("b");
		changeset.unqueue("b");
		assert!(changeset.is_empty());
	}

	#[test]
	fn changeset_unqueue_of_unknown_id_is_a_noop() {
		let mut changeset = ChangeSet::new();
		changeset.unqueue("never-queued");
		assert!(changeset.is_empty());
		assert!(!changeset.dirty());
	}

	#[test]
	fn changeset_unknown_id_queries_are_false() {
		let changeset = ChangeSet::new();
		assert!(!changeset.is_module_installed("x"));
		assert!(!changeset.is_module_removed("x"));
	}

	#[test]
	fn changeset_mutations_mark_dirty_and_save_clears_it() {
		let dir = tempfile::tempdir().unwrap();
		let options = crate::AddonRsOptions::with_dirs(dir.path().to_path_buf(), dir.path().to_path_buf());

		let mut changeset = ChangeSet::new();
		assert!(!changeset.dirty());
		changeset.queue_install("a");
		assert!(changeset.dirty());
		changeset.save_to_disk(&options).unwrap();
		assert!(!changeset.dirty());
	}

	#[test]
	fn changeset_roundtrips_through_disk() {
		let dir = tempfile::tempdir().unwrap();
		let options = crate::AddonRsOptions::with_dirs(dir.path().to_path_buf(), dir.path().to_path_buf());

		let mut changeset = ChangeSet::new();
		changeset.queue_install("a");
		changeset.queue_remove("b");
		changeset.save_to_disk(&options).unwrap();

		let loaded = ChangeSet::load_from_disk(&options).unwrap();
		assert!(loaded.is_module_installed("a"));
		assert!(loaded.is_module_removed("b"));
	}

	#[test]
	fn changeset_load_without_file_is_empty() {
		let dir = tempfile::tempdir().unwrap();
		let options = crate::AddonRsOptions::with_dirs(dir.path().to_path_buf(), dir.path().to_path_buf());
		assert!(ChangeSet::load_from_disk(&options).unwrap().is_empty());
	}

	#[test]
	fn changeset_load_repairs_conflicting_entries_remove_wins() {
		let dir = tempfile::tempdir().unwrap();
		let options = crate::AddonRsOptions::with_dirs(dir.path().to_path_buf(), dir.path().to_path_buf());

		/* Write a conflicting state directly, as an older build could have. */
		let mut corrupt = ChangeSet::new();
		corrupt.pending_install.insert("a".to_string());
		corrupt.pending_remove.insert("a".to_string());
		corrupt.pending_install.insert("b".to_string());
		corrupt.save_to_disk(&options).unwrap();

		let loaded = ChangeSet::load_from_disk(&options).unwrap();
		assert!(!loaded.is_module_installed("a"));
		assert!(loaded.is_module_removed("a"));
		assert!(loaded.is_module_installed("b"));
		assert!(loaded.dirty());
	}
}
