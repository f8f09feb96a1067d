//! Various types associated with addons.

use serde::*;

/// A unit of addon content known to the manager.
///
/// Items come from exactly two places: the host's module enumeration at
/// startup (installed items) or catalog search results (catalog items). Apart
/// from the update marker written by
/// [`crate::updates::UpdateAvailability::apply_to`] an item never changes
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonItem {
	/* Required Fields */
	pub id: String,
	pub display_name: String,
	#[serde(default)]
	pub installed: bool,
	/// Distinguishes an optional addon from a core module of the host.
	#[serde(default)]
	pub is_addon: bool,

	/* Optional Fields */
	#[serde(default)]
	pub version: Option<AddonVersion>,
	#[serde(default)]
	pub provider: Option<String>,
	#[serde(default)]
	pub homepage: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	/// Raw image bytes, opaque to the core. Rendering decodes them.
	#[serde(default)]
	pub icon: Option<Vec<u8>>,
	#[serde(default)]
	pub dependencies: Vec<Dependency>,

	/// Set by [`crate::updates::UpdateAvailability::apply_to`], consumed by
	/// rendering. Not part of the item's identity and never persisted.
	#[serde(skip)]
	pub update_available: bool,
}

impl std::hash::Hash for AddonItem {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl std::cmp::PartialEq for AddonItem {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl std::cmp::Eq for AddonItem {}

impl AsRef<str> for AddonItem {
	fn as_ref(&self) -> &str {
		&self.id
	}
}

/* Addon Types */

mod version;
pub use version::AddonVersion;
pub use version::is_greater_than;

mod dependency;
pub use dependency::Dependency;
pub use dependency::DependencyKind;
pub use dependency::HostQuery;
