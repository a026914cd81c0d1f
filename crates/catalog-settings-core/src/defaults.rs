//! Default settings loader
//!
//! Locates the bundled default settings document below a resource root and
//! parses it into settings records. Exactly one document must match; zero or
//! several matches are a configuration error and nothing is loaded.

use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::prelude::*;

/// Path suffix of the bundled default settings document
pub const DEFAULT_SETTINGS_PATTERN: &str = r"json/data/settings/settingsData\.json$";

#[derive(Debug, Clone)]
pub struct DefaultsLoader {
	root: PathBuf,
	pattern: Regex,
}

impl DefaultsLoader {
	pub fn new(root: impl Into<PathBuf>) -> CsResult<Self> {
		Self::with_pattern(root, DEFAULT_SETTINGS_PATTERN)
	}

	pub fn with_pattern(root: impl Into<PathBuf>, pattern: &str) -> CsResult<Self> {
		let pattern = Regex::new(pattern)
			.map_err(|e| Error::ConfigLoad(format!("Invalid resource pattern: {}", e)))?;
		Ok(Self { root: root.into(), pattern })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Every file below the root whose path matches the pattern, sorted
	pub fn find_documents(&self) -> CsResult<Vec<PathBuf>> {
		if !self.root.is_dir() {
			return Err(Error::ConfigLoad(format!(
				"Resource directory {} does not exist",
				self.root.display()
			)));
		}

		let mut found = Vec::new();
		for entry in WalkDir::new(&self.root).follow_links(true) {
			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					warn!("Skipping unreadable resource entry: {}", err);
					continue;
				}
			};
			if !entry.file_type().is_file() {
				continue;
			}
			let path = entry.path().to_string_lossy().replace('\\', "/");
			if self.pattern.is_match(&path) {
				found.push(entry.into_path());
			}
		}
		found.sort();
		Ok(found)
	}

	/// The single matching document
	pub async fn locate(&self) -> CsResult<PathBuf> {
		let loader = self.clone();
		let documents = tokio::task::spawn_blocking(move || loader.find_documents())
			.await
			.map_err(|e| Error::Internal(format!("Resource scan failed: {}", e)))??;

		match documents.as_slice() {
			[single] => Ok(single.clone()),
			[] => Err(Error::ConfigLoad(format!(
				"No default settings document found under {}",
				self.root.display()
			))),
			many => Err(Error::ConfigLoad(format!(
				"Expected one default settings document, found {}: {:?}",
				many.len(),
				many
			))),
		}
	}

	/// Load and parse the default document. Each element is validated on its
	/// own so one malformed default does not hide the others.
	pub async fn load_defaults(&self) -> CsResult<Vec<CsResult<Settings>>> {
		let path = self.locate().await?;
		let bytes = tokio::fs::read(&path)
			.await
			.map_err(|e| Error::ConfigLoad(format!("Cannot read {}: {}", path.display(), e)))?;

		let defaults = parse_defaults(&bytes)?;
		info!("Loaded {} default settings from {}", defaults.len(), path.display());
		Ok(defaults)
	}
}

/// Parse a default settings document (a JSON array of settings records)
pub fn parse_defaults(bytes: &[u8]) -> CsResult<Vec<CsResult<Settings>>> {
	let entries: Vec<serde_json::Value> = serde_json::from_slice(bytes).map_err(|e| {
		Error::ConfigLoad(format!("Default settings document is not a JSON array: {}", e))
	})?;

	Ok(entries
		.into_iter()
		.map(|entry| {
			serde_json::from_value::<Settings>(entry)
				.map_err(|e| Error::ValidationError(format!("Malformed default setting: {}", e)))
		})
		.collect())
}


// vim: ts=4
