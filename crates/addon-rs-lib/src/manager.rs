//! Ties the registry, catalog, change set and cart together for the UI.

use crate::addon::AddonItem;
use crate::addon::Dependency;
use crate::addon::HostQuery;
use crate::cart::CommitSummary;
use crate::cart::OperationCart;
use crate::cart::OperationKind;
use crate::catalog::AddonCatalog;
use crate::changeset::ChangeSet;
use crate::config::AddonRsOptions;
use crate::registry::InstalledRegistry;
use crate::updates::UpdateAvailability;

/// Which listing the manager currently presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
	/// Modules present in the host.
	Installed,
	/// Results of the last catalog search.
	Catalog,
}

/// One addon manager session.
///
/// Owns the long lived state (registry, change set) and the per session
/// state (cart, current listing). Designed for single threaded use from one
/// UI/event thread; catalog calls block and are expected to be issued off
/// that thread by the caller.
pub struct AddonManager<C: AddonCatalog> {
	options: AddonRsOptions,
	catalog: C,
	registry: InstalledRegistry,
	changeset: ChangeSet,
	cart: OperationCart,
	updates: UpdateAvailability,

	page: PageKind,
	filter: String,
	search_results: Vec<AddonItem>,
	/// The listing as the UI sees it: current page, filtered, update markers applied.
	items: Vec<AddonItem>,
}

impl<C: AddonCatalog> AddonManager<C> {
	/// Builds the manager for one session.
	///
	/// The registry is taken as built once at startup; the change set is read
	/// back from disk so pending operations survive restarts.
	pub fn new(options: AddonRsOptions, catalog: C, registry: InstalledRegistry) -> crate::Result<Self> {
		let changeset = ChangeSet::load_from_disk(&options)?;
		if !changeset.is_empty() {
			log::info!("Loaded change set with pending operations.");
		}

		let mut manager = Self {
			options,
			catalog,
			registry,
			changeset,
			cart: OperationCart::new(),
			updates: UpdateAvailability::new(),
			page: PageKind::Installed,
			filter: String::new(),
			search_results: Vec::new(),
			items: Vec::new(),
		};
		manager.rebuild_items();
		Ok(manager)
	}

	fn rebuild_items(&mut self) {
		self.items = match self.page {
			PageKind::Installed => self.registry.items().to_vec(),
			PageKind::Catalog => self.search_results.clone(),
		};

		if !self.filter.is_empty() {
			let filter = self.filter.to_lowercase();
			self.items.retain(|item| {
				item.display_name.to_lowercase().contains(&filter)
					|| item.id.to_lowercase().contains(&filter)
			});
		}

		for item in &mut self.items {
			self.updates.apply_to(item);
		}
	}

	/* Listing */

	pub fn items_count(&self) -> usize {
		self.items.len()
	}

	pub fn item(&self, index: usize) -> Option<&AddonItem> {
		self.items.get(index)
	}

	pub fn items(&self) -> &[AddonItem] {
		&self.items
	}

	pub fn page(&self) -> PageKind {
		self.page
	}

	pub fn set_page(&mut self, page: PageKind) {
		if self.page != page {
			self.page = page;
			self.rebuild_items();
		}
	}

	/// Narrows the current listing to items matching `text` and reports back
	/// through `on_done` once the listing is rebuilt.
	pub fn set_filter(&mut self, text: impl Into<String>, on_done: impl FnOnce(&Self)) {
		self.filter = text.into();
		self.rebuild_items();
		on_done(self);
	}

	/// Replaces the listing with catalog search results for `text`.
	///
	/// Blocks on the catalog; on failure the previous listing is left
	/// untouched and `on_done` is not invoked.
	pub fn set_search(&mut self, text: impl Into<String>, on_done: impl FnOnce(&Self)) -> crate::Result<()> {
		let text = text.into();
		let results = self.catalog.search_for_addons(&text)?;
		log::info!("Catalog search for \"{}\" returned {} addons.", text, results.len());

		self.search_results = results;
		self.page = PageKind::Catalog;
		self.rebuild_items();
		on_done(self);
		Ok(())
	}

	/* Updates */

	/// Fetches the latest advertised versions and re-annotates the listing.
	pub fn refresh_updates(&mut self) -> crate::Result<()> {
		let records = self.catalog.get_update_records()?;
		self.updates.refresh(records);
		self.rebuild_items();
		Ok(())
	}

	pub fn updates(&self) -> &UpdateAvailability {
		&self.updates
	}

	/// Mutable access, mainly for listener registration.
	pub fn updates_mut(&mut self) -> &mut UpdateAvailability {
		&mut self.updates
	}

	/* Cart */

	pub fn add_to_cart(&mut self, item: AddonItem, kind: OperationKind) -> crate::Result<()> {
		self.cart.add(kind, item)
	}

	pub fn is_in_cart(&self, id: &str, kind: OperationKind) -> bool {
		self.cart.contains(id, kind)
	}

	pub fn remove_from_cart(&mut self, id: &str, kind: OperationKind) -> bool {
		self.cart.remove(id, kind)
	}

	pub fn cart(&self) -> &OperationCart {
		&self.cart
	}

	/// Folds the cart into the change set and persists the result.
	pub fn commit_cart(&mut self) -> crate::Result<CommitSummary> {
		let summary = self.cart.commit(&mut self.changeset);
		self.changeset.save_to_disk(&self.options)?;
		log::info!("Committed cart: {} installs, {} removes.", summary.installs, summary.removes);
		Ok(summary)
	}

	/// Discards everything staged in this session.
	pub fn cancel_cart(&mut self) {
		self.cart.clear();
	}

	/* Reconciliation: what the lists render is derived from the change set,
	   the registry and the cart together. */

	/// Whether the item will be present once pending operations apply.
	pub fn is_item_installed(&self, id: &str) -> bool {
		if self.changeset.is_module_removed(id) {
			return false
		}
		self.changeset.is_module_installed(id) || self.registry.contains(id)
	}

	/// Whether an installed item is queued for removal.
	pub fn is_item_removed(&self, id: &str) -> bool {
		self.changeset.is_module_removed(id)
	}

	/// Whether any operation involving the item is staged or queued.
	pub fn is_item_pending(&self, id: &str) -> bool {
		self.changeset.is_module_installed(id)
			|| self.changeset.is_module_removed(id)
			|| self.cart.entries().iter().any(|entry| entry.item.id == id)
	}

	pub fn changeset(&self) -> &ChangeSet {
		&self.changeset
	}

	/* Details and dependencies */

	/// Human readable details for an item, straight from the catalog.
	pub fn module_details(&self, item: &AddonItem) -> crate::Result<String> {
		Ok(self.catalog.get_module_details(&item.id)?)
	}

	/// The catalog item for the addon `item` depends on.
	pub fn addon_dependency(&self, item: &AddonItem) -> crate::Result<AddonItem> {
		Ok(self.catalog.get_addon_dependency(&item.id)?)
	}

	/// Dependencies of `item` not currently present in the host.
	///
	/// Reporting only; whether to queue, warn or block on them is the
	/// caller's policy.
	pub fn unsatisfied_dependencies<'item>(&self, item: &'item AddonItem, host: &dyn HostQuery) -> Vec<&'item Dependency> {
		item.dependencies.iter().filter(|dependency| !dependency.is_satisfied(host)).collect()
	}

	pub fn catalog(&self) -> &C {
		&self.catalog
	}

	pub fn catalog_mut(&mut self) -> &mut C {
		&mut self.catalog
	}

	pub fn options(&self) -> &AddonRsOptions {
		&self.options
	}

	pub fn registry(&self) -> &InstalledRegistry {
		&self.registry
	}
}
