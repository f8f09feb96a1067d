//! Snapshot of the modules present in the host, taken once at startup.

use std::collections::HashMap;

use serde::*;

use crate::addon::AddonItem;
use crate::addon::AddonVersion;
use crate::addon::Dependency;

/// Where the host loaded a module from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleLocation {
	/// Shipped with the host application itself.
	Core,
	/// Installed separately as an optional addon.
	Addon,
}

/// One module as reported by the host's module provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostModuleDescriptor {
	pub id: String,
	pub display_name: String,
	pub version: String,
	#[serde(default)]
	pub provider: Option<String>,
	#[serde(default)]
	pub homepage: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub icon: Option<Vec<u8>>,
	pub location: ModuleLocation,
	/// Module ids this module requires, in declaration order.
	#[serde(default)]
	pub module_dependencies: Vec<String>,
	/// Library file names this module requires, in declaration order.
	#[serde(default)]
	pub library_dependencies: Vec<String>,
}

impl From<HostModuleDescriptor> for AddonItem {
	fn from(descriptor: HostModuleDescriptor) -> Self {
		let mut dependencies = Vec::with_capacity(
			descriptor.module_dependencies.len() + descriptor.library_dependencies.len()
		);
		dependencies.extend(descriptor.module_dependencies.into_iter().map(Dependency::module));
		dependencies.extend(descriptor.library_dependencies.into_iter().map(Dependency::library));

		AddonItem {
			id: descriptor.id,
			display_name: descriptor.display_name,
			installed: true,
			is_addon: matches!(descriptor.location, ModuleLocation::Addon),
			version: Some(AddonVersion::new(descriptor.version)),
			provider: descriptor.provider,
			homepage: descriptor.homepage,
			description: descriptor.description,
			icon: descriptor.icon,
			dependencies,
			update_available: false,
		}
	}
}

/// All modules present in the host.
///
/// Built exactly once at application start; the host provider is assumed
/// static for the process lifetime so the registry is never rebuilt or
/// mutated afterwards.
#[derive(Debug, Default)]
pub struct InstalledRegistry {
	items: Vec<AddonItem>,
	by_id: HashMap<String, usize>,
}

impl InstalledRegistry {
	pub fn from_host(descriptors: impl IntoIterator<Item = HostModuleDescriptor>) -> Self {
		let mut items = Vec::new();
		let mut by_id = HashMap::new();

		for descriptor in descriptors {
			if by_id.contains_key(&descriptor.id) {
				log::warn!("Host reported module {} more than once, keeping the first.", descriptor.id);
				continue;
			}
			by_id.insert(descriptor.id.clone(), items.len());
			items.push(AddonItem::from(descriptor));
		}

		log::info!("Built installed registry with {} modules.", items.len());
		Self { items, by_id }
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&AddonItem> {
		self.items.get(index)
	}

	pub fn get_by_id(&self, id: &str) -> Option<&AddonItem> {
		self.by_id.get(id).map(|i| &self.items[*i])
	}

	pub fn contains(&self, id: &str) -> bool {
		self.by_id.contains_key(id)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, AddonItem> {
		self.items.iter()
	}

	pub fn items(&self) -> &[AddonItem] {
		&self.items
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::addon::DependencyKind;

	fn descriptor(id: &str) -> HostModuleDescriptor {
		HostModuleDescriptor {
			id: id.to_string(),
			display_name: id.to_uppercase(),
			version: "1.0".to_string(),
			provider: None,
			homepage: None,
			description: None,
			icon: None,
			location: ModuleLocation::Addon,
			module_dependencies: vec![],
			library_dependencies: vec![],
		}
	}

	#[test]
	fn registry_preserves_host_order() {
		let registry = InstalledRegistry::from_host(vec![descriptor("b"), descriptor("a"), descriptor("c")]);
		let ids: Vec<&str> = registry.iter().map(|i| i.id.as_str()).collect();
		assert_eq!(ids, vec!["b", "a", "c"]);
	}

	#[test]
	fn registry_keeps_first_of_duplicate_ids() {
		let mut first = descriptor("dup");
		first.version = "1.0".to_string();
		let mut second = descriptor("dup");
		second.version = "2.0".to_string();

		let registry = InstalledRegistry::from_host(vec![first, second]);
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.get_by_id("dup").unwrap().version.as_ref().unwrap().as_str(), "1.0");
	}

	#[test]
	fn registry_items_are_marked_installed() {
		let registry = InstalledRegistry::from_host(vec![descriptor("a")]);
		assert!(registry.get(0).unwrap().installed);
	}

	#[test]
	fn registry_maps_location_to_addon_flag() {
		let mut core = descriptor("core");
		core.location = ModuleLocation::Core;
		let registry = InstalledRegistry::from_host(vec![core, descriptor("extra")]);
		assert!(!registry.get_by_id("core").unwrap().is_addon);
		assert!(registry.get_by_id("extra").unwrap().is_addon);
	}

	#[test]
	fn registry_flattens_dependencies_modules_first() {
		let mut with_deps = descriptor("a");
		with_deps.module_dependencies = vec!["m1".to_string(), "m2".to_string()];
		with_deps.library_dependencies = vec!["l1.lib".to_string()];

		let registry = InstalledRegistry::from_host(vec![with_deps]);
		let deps = &registry.get_by_id("a").unwrap().dependencies;
		assert_eq!(deps.len(), 3);
		assert_eq!((deps[0].kind, deps[0].id.as_str()), (DependencyKind::Module, "m1"));
		assert_eq!((deps[1].kind, deps[1].id.as_str()), (DependencyKind::Module, "m2"));
		assert_eq!((deps[2].kind, deps[2].id.as_str()), (DependencyKind::Library, "l1.lib"));
	}

	#[test]
	fn registry_unknown_id_is_absent() {
		let registry = InstalledRegistry::from_host(vec![descriptor("a")]);
		assert!(registry.get_by_id("nope").is_none());
		assert!(!registry.contains("nope"));
	}
}
