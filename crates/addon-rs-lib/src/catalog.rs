//! The remote catalog listing addons available for install or update.

use crate::addon::AddonItem;
use crate::updates::UpdateRecord;

mod http;
pub use http::HttpCatalog;

pub mod downloads;

/// Failure reported by a catalog backend.
///
/// Transport, protocol and payload problems all surface as this one opaque
/// kind. Callers treat any of them as "catalog unavailable": show a message,
/// keep prior state.
#[derive(Debug, thiserror::Error)]
#[error("catalog unavailable: {reason}")]
pub struct CatalogError {
	reason: String,
}

impl CatalogError {
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}
}

impl From<reqwest::Error> for CatalogError {
	fn from(err: reqwest::Error) -> Self {
		Self::new(err.to_string())
	}
}

impl From<serde_json::Error> for CatalogError {
	fn from(err: serde_json::Error) -> Self {
		Self::new(err.to_string())
	}
}

/// Operations the manager needs from a catalog backend.
///
/// Every call may block on the network; callers run them off the UI thread
/// and marshal results back themselves. Retry policy belongs to the caller,
/// not the backend.
pub trait AddonCatalog {
	/// Addons matching a search condition. An empty condition lists everything.
	fn search_for_addons(&self, condition: &str) -> Result<Vec<AddonItem>, CatalogError>;

	/// The latest advertised version per module.
	fn get_update_records(&self) -> Result<Vec<UpdateRecord>, CatalogError>;

	/// The catalog item for an addon another addon depends on.
	fn get_addon_dependency(&self, id: &str) -> Result<AddonItem, CatalogError>;

	/// Human readable details text for a module.
	fn get_module_details(&self, id: &str) -> Result<String, CatalogError>;

	/// Name of the downloadable file for an addon.
	fn get_addon_file(&self, id: &str) -> Result<String, CatalogError>;
}
