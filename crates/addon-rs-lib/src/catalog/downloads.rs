//! Bulk download of addon files into the download directory.

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
	/// The request named no source url to fetch from.
	#[error("addon has no downloadable file")]
	MissingFile,
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
}

/// One addon file to fetch.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
	pub module_id: String,
	pub url: String,
	pub filename: String,
}

pub fn download_path(options: &crate::AddonRsOptions, filename: &str) -> std::path::PathBuf {
	options.download_dir().join(filename)
}

/// Downloads the files for the given requests into the download directory.
///
/// Existing files are kept unless `force` is set. A failed download does not
/// abort the rest; every request reports its own result.
pub async fn download_addon_files(
	options: &crate::AddonRsOptions,
	client: &reqwest::Client,
	requests: &[DownloadRequest],
	force: bool,
) -> Vec<(String, Result<std::path::PathBuf, DownloadError>)> {
	let mut results = Vec::<(String, Result<std::path::PathBuf, DownloadError>)>::new();

	for request in requests {
		if request.url.is_empty() {
			results.push((request.module_id.clone(), Err(DownloadError::MissingFile)));
			continue;
		}

		let path = download_path(options, &request.filename);
		if path.exists() && !force {
			log::debug!("Addon file {} already downloaded, skipping.", request.filename);
			results.push((request.module_id.clone(), Ok(path)));
			continue;
		}

		results.push((request.module_id.clone(), download_one(client, &request.url, &path).await));
	}

	results
}

async fn download_one(
	client: &reqwest::Client,
	url: &str,
	path: &std::path::Path,
) -> Result<std::path::PathBuf, DownloadError> {
	log::info!("Downloading addon file from {}.", url);
	let content = client.get(url).send().await?.error_for_status()?.bytes().await?;

	if let Some(parent) = path.parent() {
		tokio::fs::create_dir_all(parent).await?;
	}
	tokio::fs::write(path, &content).await?;

	Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn download_skips_existing_and_flags_missing_urls() {
		let dir = tempfile::tempdir().unwrap();
		let options = crate::AddonRsOptions::with_dirs(dir.path().to_path_buf(), dir.path().to_path_buf());

		std::fs::write(download_path(&options, "have.zip"), b"cached").unwrap();

		let requests = vec![
			DownloadRequest {
				module_id: "have".to_string(),
				url: "https://example.invalid/have.zip".to_string(),
				filename: "have.zip".to_string(),
			},
			DownloadRequest {
				module_id: "broken".to_string(),
				url: String::new(),
				filename: "broken.zip".to_string(),
			},
		];

		let client = reqwest::Client::new();
		let results = download_addon_files(&options, &client, &requests, false).await;

		/* Neither entry should have touched the network. */
		assert!(matches!(results[0].1, Ok(_)));
		assert!(matches!(results[1].1, Err(DownloadError::MissingFile)));
	}
}
