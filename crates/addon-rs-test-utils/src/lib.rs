//! Various helpers for testing the addon manager.
//!
//! The fakes here stand in for the two external collaborators the core
//! consumes: the host's module provider and the remote catalog.

use std::collections::HashMap;
use std::collections::HashSet;

use addon_rs::addon::AddonItem;
use addon_rs::addon::AddonVersion;
use addon_rs::addon::HostQuery;
use addon_rs::catalog::AddonCatalog;
use addon_rs::catalog::CatalogError;
use addon_rs::registry::HostModuleDescriptor;
use addon_rs::registry::ModuleLocation;
use addon_rs::updates::UpdateRecord;

/// Options rooted in a temp directory. Keep the guard alive for the test's
/// duration, the directory is deleted with it.
pub fn temp_options() -> (tempfile::TempDir, addon_rs::AddonRsOptions) {
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let options = addon_rs::AddonRsOptions::with_dirs(
		dir.path().join("downloads"),
		dir.path().to_path_buf(),
	);
	(dir, options)
}

/// A host module descriptor with the given id and version and nothing else.
pub fn host_module(id: &str, version: &str) -> HostModuleDescriptor {
	HostModuleDescriptor {
		id: id.to_string(),
		display_name: id.to_string(),
		version: version.to_string(),
		provider: None,
		homepage: None,
		description: None,
		icon: None,
		location: ModuleLocation::Addon,
		module_dependencies: vec![],
		library_dependencies: vec![],
	}
}

/// A catalog item with the given id and version and nothing else.
pub fn catalog_item(id: &str, version: &str) -> AddonItem {
	AddonItem {
		id: id.to_string(),
		display_name: id.to_string(),
		installed: false,
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

/// Catalog backend serving canned data.
#[derive(Debug, Default)]
pub struct FakeCatalog {
	pub addons: Vec<AddonItem>,
	pub update_records: Vec<UpdateRecord>,
	pub details: HashMap<String, String>,
	/// When set every call fails, as an unreachable catalog would.
	pub unavailable: bool,
}

impl FakeCatalog {
	pub fn new() -> Self {
		Default::default()
	}

	fn check_available(&self) -> Result<(), CatalogError> {
		if self.unavailable {
			return Err(CatalogError::new("fake catalog offline"))
		}
		Ok(())
	}
}

impl AddonCatalog for FakeCatalog {
	fn search_for_addons(&self, condition: &str) -> Result<Vec<AddonItem>, CatalogError> {
		self.check_available()?;
		let condition = condition.to_lowercase();
		Ok(self.addons
			.iter()
			.filter(|addon| {
				condition.is_empty()
					|| addon.id.to_lowercase().contains(&condition)
					|| addon.display_name.to_lowercase().contains(&condition)
			})
			.cloned()
			.collect())
	}

	fn get_update_records(&self) -> Result<Vec<UpdateRecord>, CatalogError> {
		self.check_available()?;
		Ok(self.update_records.clone())
	}

	fn get_addon_dependency(&self, id: &str) -> Result<AddonItem, CatalogError> {
		self.check_available()?;
		let addon = self.addons
			.iter()
			.find(|addon| addon.id == id)
			.ok_or_else(|| CatalogError::new(format!("no such addon: {}", id)))?;
		let dependency = addon.dependencies
			.first()
			.ok_or_else(|| CatalogError::new(format!("addon {} has no dependency", id)))?;
		self.addons
			.iter()
			.find(|candidate| candidate.id == dependency.id)
			.cloned()
			.ok_or_else(|| CatalogError::new(format!("dependency {} not in catalog", dependency.id)))
	}

	fn get_module_details(&self, id: &str) -> Result<String, CatalogError> {
		self.check_available()?;
		self.details
			.get(id)
			.cloned()
			.ok_or_else(|| CatalogError::new(format!("no details for: {}", id)))
	}

	fn get_addon_file(&self, id: &str) -> Result<String, CatalogError> {
		self.check_available()?;
		Ok(format!("{}.zip", id))
	}
}

/// Host query answering from two fixed sets.
#[derive(Debug, Default)]
pub struct FakeHost {
	pub modules: HashSet<String>,
	pub libraries: HashSet<String>,
}

impl FakeHost {
	pub fn with_modules(modules: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			modules: modules.into_iter().map(Into::into).collect(),
			libraries: Default::default(),
		}
	}
}

impl HostQuery for FakeHost {
	fn has_module(&self, id: &str) -> bool {
		self.modules.contains(id)
	}

	fn has_library(&self, filename: &str) -> bool {
		self.libraries.contains(filename)
	}
}
