//! Server configuration from the process environment

use std::path::PathBuf;

use catalog_settings::prelude::*;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_DIR: &str = "./data";
pub const DEFAULT_RESOURCE_DIR: &str = "./resources";
pub const DEFAULT_CACHE_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Address of the HTTP listener (`LISTEN`)
	pub listen: String,
	/// Directory of the SQLite database (`DB_DIR`)
	pub db_dir: PathBuf,
	/// Root searched for the default settings document (`RESOURCE_DIR`)
	pub resource_dir: PathBuf,
	/// Settings cache capacity (`SETTINGS_CACHE_SIZE`)
	pub cache_size: usize,
}

impl Config {
	pub fn from_env() -> CsResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CsResult<Self> {
		let cache_size = match lookup("SETTINGS_CACHE_SIZE") {
			Some(size) => size.trim().parse().map_err(|_| {
				Error::ConfigLoad(format!("SETTINGS_CACHE_SIZE is not a number: {}", size))
			})?,
			None => DEFAULT_CACHE_SIZE,
		};

		Ok(Config {
			listen: lookup("LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
			db_dir: lookup("DB_DIR").unwrap_or_else(|| DEFAULT_DB_DIR.to_string()).into(),
			resource_dir: lookup("RESOURCE_DIR")
				.unwrap_or_else(|| DEFAULT_RESOURCE_DIR.to_string())
				.into(),
			cache_size,
		})
	}
}


// vim: ts=4
