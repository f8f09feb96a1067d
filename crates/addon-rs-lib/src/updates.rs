//! Tracks which installed modules have a newer release in the catalog.

use std::collections::HashMap;

use serde::*;

use crate::addon;
use crate::addon::AddonItem;

/// The latest version of a module as advertised by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
	pub module_id: String,
	pub available_version: String,
}

/// Handle for removing a listener registered with
/// [`UpdateAvailability::add_change_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type ChangeListener = Box<dyn Fn(&UpdateAvailability)>;

/// Mapping from module id to the latest known catalog release.
///
/// A [`refresh`](Self::refresh) replaces the whole mapping; staleness is
/// resolved by last-write overwrite, never by merging individual entries.
#[derive(Default)]
pub struct UpdateAvailability {
	records: HashMap<String, UpdateRecord>,
	listeners: Vec<(ListenerId, ChangeListener)>,
	next_listener: u64,
}

impl UpdateAvailability {
	pub fn new() -> Self {
		Default::default()
	}

	/// Replaces the record map wholesale, then invokes every registered
	/// listener exactly once, synchronously on the calling thread.
	///
	/// Listeners must not call back into this struct during notification.
	pub fn refresh(&mut self, records: impl IntoIterator<Item = UpdateRecord>) {
		self.records = records
			.into_iter()
			.map(|record| (record.module_id.clone(), record))
			.collect();
		log::debug!("Update availability refreshed with {} records.", self.records.len());

		for (_, listener) in &self.listeners {
			listener(self);
		}
	}

	/// Whether the catalog advertises a strictly newer release than
	/// `current_version`. Unknown ids are simply not updatable.
	pub fn is_update_available(&self, id: &str, current_version: &str) -> bool {
		match self.records.get(id) {
			Some(record) => addon::is_greater_than(&record.available_version, current_version),
			None => false,
		}
	}

	/// Writes the update marker on `item` to match the current records.
	///
	/// Idempotent; also clears a stale marker after a refresh dropped the
	/// item's record.
	pub fn apply_to(&self, item: &mut AddonItem) {
		item.update_available = match &item.version {
			Some(version) => self.is_update_available(&item.id, version.as_str()),
			None => false,
		};
	}

	pub fn available_version(&self, id: &str) -> Option<&str> {
		self.records.get(id).map(|record| record.available_version.as_str())
	}

	pub fn add_change_listener(&mut self, listener: impl Fn(&UpdateAvailability) + 'static) -> ListenerId {
		let id = ListenerId(self.next_listener);
		self.next_listener += 1;
		self.listeners.push((id, Box::new(listener)));
		id
	}

	/// Returns whether a listener was actually removed.
	pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(listener_id, _)| *listener_id != id);
		self.listeners.len() != before
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;
	use crate::addon::AddonVersion;

	fn record(id: &str, version: &str) -> UpdateRecord {
		UpdateRecord { module_id: id.to_string(), available_version: version.to_string() }
	}

	fn installed(id: &str, version: &str) -> AddonItem {
		AddonItem {
			id: id.to_string(),
			display_name: id.to_string(),
			installed: true,
			is_addon: true,
			version: Some(AddonVersion::new(version)),
			provider: None,
			homepage: None,
			description: None,
			icon: None,
			dependencies: vec![],
			update_available: false,
		}
	}

	#[test]
	fn update_available_for_newer_release() {
		let mut updates = UpdateAvailability::new();
		updates.refresh(vec![record("m1", "1.1.0")]);
		assert!(updates.is_update_available("m1", "1.0.0"));
		assert!(!updates.is_update_available("m1", "1.1.0"));
	}

	#[test]
	fn update_unknown_id_is_false() {
		let updates = UpdateAvailability::new();
		assert!(!updates.is_update_available("nope", "1.0"));
	}

	#[test]
	fn update_refresh_overwrites_not_merges() {
		let mut updates = UpdateAvailability::new();
		updates.refresh(vec![record("m1", "2.0"), record("m2", "2.0")]);
		updates.refresh(vec![record("m1", "3.0")]);
		assert_eq!(updates.available_version("m1"), Some("3.0"));
		assert_eq!(updates.available_version("m2"), None);
	}

	#[test]
	fn update_marker_roundtrip() {
		let mut updates = UpdateAvailability::new();
		let mut item = installed("m1", "1.0.0");

		updates.refresh(vec![record("m1", "1.1.0")]);
		updates.apply_to(&mut item);
		assert!(item.update_available);

		/* A refresh that drops the record clears the marker on the next apply. */
		updates.refresh(vec![]);
		updates.apply_to(&mut item);
		assert!(!item.update_available);
	}

	#[test]
	fn update_listeners_fire_once_per_refresh() {
		let mut updates = UpdateAvailability::new();
		let calls = Rc::new(Cell::new(0));

		let seen = calls.clone();
		updates.add_change_listener(move |current| {
			seen.set(seen.get() + 1);
			assert_eq!(current.available_version("m1"), Some("2.0"));
		});

		updates.refresh(vec![record("m1", "2.0")]);
		assert_eq!(calls.get(), 1);
	}

	#[test]
	fn update_removed_listener_is_not_called() {
		let mut updates = UpdateAvailability::new();
		let calls = Rc::new(Cell::new(0));

		let seen = calls.clone();
		let id = updates.add_change_listener(move |_| seen.set(seen.get() + 1));
		assert!(updates.remove_change_listener(id));
		assert!(!updates.remove_change_listener(id));

		updates.refresh(vec![record("m1", "2.0")]);
		assert_eq!(calls.get(), 0);
	}
}
