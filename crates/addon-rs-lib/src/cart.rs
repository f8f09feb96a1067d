//! The transient queue of operations staged in the UI before a commit.

use serde::*;

use crate::addon::AddonItem;
use crate::changeset::ChangeSet;

/// What a cart entry asks to happen to its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
	Install,
	Update,
	Remove,
}

/// One staged operation, bound to a concrete catalog or installed item.
#[derive(Debug, Clone)]
pub struct CartEntry {
	pub kind: OperationKind,
	pub item: AddonItem,
}

/// Operations the user staged during the current edit session.
///
/// Scoped to one editing session: cleared on commit or cancel, never
/// committed automatically.
#[derive(Debug, Default)]
pub struct OperationCart {
	entries: Vec<CartEntry>,
}

impl OperationCart {
	pub fn new() -> Self {
		Default::default()
	}

	/// Stages `kind` for `item`.
	///
	/// A second entry with the same item id and kind is rejected with
	/// [`crate::Error::DuplicateOperation`].
	pub fn add(&mut self, kind: OperationKind, item: AddonItem) -> crate::Result<()> {
		if self.contains(&item.id, kind) {
			return Err(crate::Error::DuplicateOperation { id: item.id, kind })
		}
		log::trace!("Staging {:?} of {} in the cart.", kind, item.id);
		self.entries.push(CartEntry { kind, item });
		Ok(())
	}

	/* Linear scans throughout, carts stay small. */
	pub fn contains(&self, id: &str, kind: OperationKind) -> bool {
		self.entries.iter().any(|entry| entry.kind == kind && entry.item.id == id)
	}

	/// Staged entries in insertion order.
	pub fn entries(&self) -> &[CartEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns whether an entry was actually removed.
	pub fn remove(&mut self, id: &str, kind: OperationKind) -> bool {
		let before = self.entries.len();
		self.entries.retain(|entry| !(entry.kind == kind && entry.item.id == id));
		self.entries.len() != before
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Folds every staged operation into `changeset` in insertion order and
	/// empties the cart.
	///
	/// Purely in-memory, so it cannot partially fail; persisting the
	/// resulting change set is the caller's separate step.
	pub fn commit(&mut self, changeset: &mut ChangeSet) -> CommitSummary {
		let mut summary = CommitSummary::default();
		for entry in self.entries.drain(..) {
			match entry.kind {
				OperationKind::Install | OperationKind::Update => {
					changeset.queue_install(entry.item.id);
					summary.installs += 1;
				},
				OperationKind::Remove => {
					changeset.queue_remove(entry.item.id);
					summary.removes += 1;
				},
			}
		}
		log::debug!("Committed cart: {} installs, {} removes.", summary.installs, summary.removes);
		summary
	}
}

/// Counts of what a cart commit folded into the change set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
	pub installs: usize,
	pub removes: usize,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(id: &str) -> AddonItem {
		AddonItem {
			id: id.to_string(),
			display_name: id.to_string(),
			installed: false,
			is_addon: true,
			version: None,
			provider: None,
			homepage: None,
			description: None,
			icon: None,
			dependencies: vec![],
			update_available: false,
		}
	}

	#[test]
	fn cart_rejects_duplicate_id_and_kind() {
		let mut cart = OperationCart::new();
		cart.add(OperationKind::Install, item("a")).unwrap();

		let duplicate = cart.add(OperationKind::Install, item("a"));
		assert!(matches!(duplicate, Err(crate::Error::DuplicateOperation { .. })));
		assert_eq!(cart.len(), 1);
	}

	#[test]
	fn cart_allows_same_id_with_different_kind() {
		let mut cart = OperationCart::new();
		cart.add(OperationKind::Install, item("a")).unwrap();
		cart.add(OperationKind::Remove, item("a")).unwrap();
		assert_eq!(cart.len(), 2);
	}

	#[test]
	fn cart_preserves_insertion_order() {
		let mut cart = OperationCart::new();
		cart.add(OperationKind::Install, item("b")).unwrap();
		cart.add(OperationKind::Remove, item("a")).unwrap();
		cart.add(OperationKind::Update, item("c")).unwrap();

		let ids: Vec<&str> = cart.entries().iter().map(|entry| entry.item.id.as_str()).collect();
		assert_eq!(ids, vec!["b", "a", "c"]);
	}

	#[test]
	fn cart_remove_targets_the_exact_pair() {
		let mut cart = OperationCart::new();
		cart.add(OperationKind::Install, item("a")).unwrap();
		cart.add(OperationKind::Remove, item("a")).unwrap();

		assert!(cart.remove("a", OperationKind::Install));
		assert!(!cart.remove("a", OperationKind::Install));
		assert!(cart.contains("a", OperationKind::Remove));
	}

	#[test]
	fn cart_commit_folds_into_changeset_and_clears() {
		let mut cart = OperationCart::new();
		let mut changeset = ChangeSet::new();

		cart.add(OperationKind::Install, item("x")).unwrap();
		cart.add(OperationKind::Update, item("y")).unwrap();
		cart.add(OperationKind::Remove, item("z")).unwrap();

		let summary = cart.commit(&mut changeset);
		assert_eq!(summary, CommitSummary { installs: 2, removes: 1 });
		assert!(cart.is_empty());
		assert!(changeset.is_module_installed("x"));
		assert!(changeset.is_module_installed("y"));
		assert!(changeset.is_module_removed("z"));
	}

	#[test]
	fn cart_commit_applies_in_insertion_order() {
		let mut cart = OperationCart::new();
		let mut changeset = ChangeSet::new();

		/* Later entries override earlier ones for the same id. */
		cart.add(OperationKind::Install, item("a")).unwrap();
		cart.add(OperationKind::Remove, item("a")).unwrap();
		cart.commit(&mut changeset);

		assert!(changeset.is_module_removed("a"));
		assert!(!changeset.is_module_installed("a"));
	}

	#[test]
	fn cart_clear_discards_staged_entries() {
		let mut cart = OperationCart::new();
		cart.add(OperationKind::Install, item("a")).unwrap();
		cart.clear();
		assert!(cart.is_empty());
		assert!(!cart.contains("a", OperationKind::Install));
	}
}
