pub struct AddonRsOptions {
	download_dir: std::path::PathBuf,
	data_dir: std::path::PathBuf,
	https_only: bool,
	dev_mode: bool,
	catalog_url: Option<String>,
}

impl Default for AddonRsOptions {
	fn default() -> Self {
		Self {
			download_dir: {
				#[cfg(target_os = "windows")]
				let path = std::path::PathBuf::from(std::env::var("APPDATA").expect("APPDATA missing."));

				#[cfg(not(target_os = "windows"))]
				let path = if let Ok(e) = std::env::var("XDG_CACHE_HOME") {
					std::path::PathBuf::from(e)
				} else {
					std::path::PathBuf::from(std::env::var("HOME").expect("HOME environment variable not set.")).join(".cache")
				};

				let path = path.join("addon-rs").join("downloads");
				std::fs::create_dir_all(&path).expect("failed to create downloads directory.");
				path
			},
			data_dir: {
				#[cfg(target_os = "windows")]
				let path = std::path::PathBuf::from(std::env::var("APPDATA").expect("APPDATA missing."));

				#[cfg(not(target_os = "windows"))]
				let path = if let Ok(e) = std::env::var("XDG_DATA_HOME") {
					std::path::PathBuf::from(e)
				} else {
					std::path::PathBuf::from(std::env::var("HOME").expect("HOME environment variable not set.")).join(".local/share")
				};

				let path = path.join("addon-rs").join("data");
				std::fs::create_dir_all(&path).expect("failed to create data directory.");
				path
			},
			https_only: true,
			dev_mode: false,
			catalog_url: None,
		}
	}
}

impl AddonRsOptions {
	/// Options rooted at explicit directories, bypassing the platform defaults.
	pub fn with_dirs(download_dir: std::path::PathBuf, data_dir: std::path::PathBuf) -> Self {
		Self {
			download_dir,
			data_dir,
			https_only: true,
			dev_mode: false,
			catalog_url: None,
		}
	}

	pub fn download_dir(&self) -> &std::path::PathBuf {
		&self.download_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_download_dir(&mut self, download_dir: std::path::PathBuf) -> bool {
		if download_dir.is_dir() {
			self.download_dir = download_dir;
			true
		} else {
			false
		}
	}

	pub fn data_dir(&self) -> &std::path::PathBuf {
		&self.data_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_data_dir(&mut self, data_dir: std::path::PathBuf) -> bool {
		if data_dir.is_dir() {
			self.data_dir = data_dir;
			true
		} else {
			false
		}
	}

	pub fn https_only(&self) -> bool {
		self.https_only
	}
	pub fn set_https_only(&mut self, https_only: bool) {
		self.https_only = https_only;
	}

	pub fn dev_mode(&self) -> bool {
		self.dev_mode
	}
	pub fn set_dev_mode(&mut self, dev_mode: bool) {
		self.dev_mode = dev_mode;
	}

	/// Explicit catalog endpoint. When unset the stable endpoint is used,
	/// or the development endpoint under [`Self::dev_mode`].
	pub fn catalog_url(&self) -> Option<&str> {
		self.catalog_url.as_deref()
	}
	pub fn set_catalog_url(&mut self, catalog_url: Option<String>) {
		self.catalog_url = catalog_url;
	}
}
