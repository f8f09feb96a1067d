//! JSON over HTTP catalog backend.

use super::*;

const STABLE_CATALOG_URL: &str = "https://catalog.addon-rs.org/api";
const DEV_CATALOG_URL: &str = "https://catalog-dev.addon-rs.org/api";

pub struct HttpCatalog {
	base_url: String,
	client: reqwest::blocking::Client,
}

impl HttpCatalog {
	/// Endpoint selection follows the options: an explicit catalog url wins,
	/// otherwise `dev_mode` picks the development endpoint.
	pub fn from_options(options: &crate::AddonRsOptions) -> crate::Result<Self> {
		let base_url = match options.catalog_url() {
			Some(url) => url.to_owned(),
			None if options.dev_mode() => DEV_CATALOG_URL.to_owned(),
			None => STABLE_CATALOG_URL.to_owned(),
		};
		Self::new(base_url, options.https_only())
	}

	pub fn new(base_url: impl Into<String>, https_only: bool) -> crate::Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.https_only(https_only)
			.build()?;
		Ok(Self { base_url: base_url.into(), client })
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Where the catalog serves the addon file named by
	/// [`AddonCatalog::get_addon_file`].
	pub fn file_url(&self, filename: &str) -> String {
		format!("{}/files/{}", self.base_url, filename)
	}

	fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, CatalogError> {
		let url = format!("{}/{}", self.base_url, path);
		log::debug!("Catalog request to {}.", url);
		let response = self.client.get(&url).query(query).send()?.error_for_status()?;
		Ok(response.json::<T>()?)
	}

	fn get_text(&self, path: &str) -> Result<String, CatalogError> {
		let url = format!("{}/{}", self.base_url, path);
		log::debug!("Catalog request to {}.", url);
		let response = self.client.get(&url).send()?.error_for_status()?;
		Ok(response.text()?)
	}
}

impl AddonCatalog for HttpCatalog {
	fn search_for_addons(&self, condition: &str) -> Result<Vec<AddonItem>, CatalogError> {
		self.get_json("addons/search", &[("q", condition)])
	}

	fn get_update_records(&self) -> Result<Vec<UpdateRecord>, CatalogError> {
		self.get_json("addons/updates", &[])
	}

	fn get_addon_dependency(&self, id: &str) -> Result<AddonItem, CatalogError> {
		self.get_json(&format!("addons/{}/dependency", id), &[])
	}

	fn get_module_details(&self, id: &str) -> Result<String, CatalogError> {
		self.get_text(&format!("addons/{}/details", id))
	}

	fn get_addon_file(&self, id: &str) -> Result<String, CatalogError> {
		self.get_text(&format!("addons/{}/file", id))
	}
}
