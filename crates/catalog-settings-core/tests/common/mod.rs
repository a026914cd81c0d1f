//! Common test utilities and helpers
//!
//! Adapter builders, an in-memory adapter with failure injection, and
//! helpers for writing default settings documents.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

use catalog_settings_adapter_sqlite::SettingsAdapterSqlite;
use catalog_settings_core::filter_registry::FilterRegistry;
use catalog_settings_core::settings::{SettingsCache, SettingsService, SettingsStore};
use catalog_settings_types::prelude::*;
use catalog_settings_types::settings_adapter::SettingsAdapter;

/// In-memory adapter that counts reads and can fail on selected keys
#[derive(Debug, Default)]
pub struct MemoryAdapter {
	rows: Mutex<BTreeMap<SettingsType, Settings>>,
	failing: Mutex<HashSet<SettingsType>>,
	reads: AtomicUsize,
}

impl MemoryAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every call touching `config_type` fail with `Error::DbError`
	pub fn fail_on(&self, config_type: SettingsType) {
		self.failing.lock().insert(config_type);
	}

	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	fn check(&self, config_type: SettingsType) -> CsResult<()> {
		if self.failing.lock().contains(&config_type) {
			return Err(Error::DbError);
		}
		Ok(())
	}
}

#[async_trait]
impl SettingsAdapter for MemoryAdapter {
	async fn read_setting(&self, config_type: SettingsType) -> CsResult<Option<Settings>> {
		self.check(config_type)?;
		self.reads.fetch_add(1, Ordering::SeqCst);
		Ok(self.rows.lock().get(&config_type).cloned())
	}

	async fn list_settings(&self) -> CsResult<Vec<Settings>> {
		Ok(self.rows.lock().values().cloned().collect())
	}

	async fn create_setting(&self, settings: &Settings) -> CsResult<()> {
		self.check(settings.config_type())?;
		let mut rows = self.rows.lock();
		if rows.contains_key(&settings.config_type()) {
			return Err(Error::Conflict(format!("{} exists", settings.config_type())));
		}
		rows.insert(settings.config_type(), settings.clone());
		Ok(())
	}

	async fn upsert_setting(&self, settings: &Settings) -> CsResult<()> {
		self.check(settings.config_type())?;
		self.rows.lock().insert(settings.config_type(), settings.clone());
		Ok(())
	}

	async fn update_setting(&self, settings: &Settings) -> CsResult<()> {
		self.check(settings.config_type())?;
		let mut rows = self.rows.lock();
		match rows.get_mut(&settings.config_type()) {
			Some(row) => {
				*row = settings.clone();
				Ok(())
			}
			None => Err(Error::NotFound),
		}
	}
}

pub async fn create_sqlite_store() -> (Arc<SettingsStore>, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = SettingsAdapterSqlite::new(temp_dir.path().join("settings.db"))
		.await
		.expect("Failed to create adapter");
	(Arc::new(SettingsStore::new(Arc::new(adapter))), temp_dir)
}

/// Service wired the way the app builder wires it
pub fn create_service(store: Arc<SettingsStore>) -> SettingsService {
	let cache = Arc::new(SettingsCache::new(16));
	cache.initialize(store).expect("Failed to initialize cache");
	SettingsService::new(cache, Arc::new(FilterRegistry::new())).expect("Failed to create service")
}

/// Write a default settings document at the well-known location below `root`
pub fn write_defaults(root: &Path, doc: &serde_json::Value) -> PathBuf {
	let dir = root.join("json").join("data").join("settings");
	std::fs::create_dir_all(&dir).expect("Failed to create resource directory");
	let path = dir.join("settingsData.json");
	std::fs::write(&path, doc.to_string()).expect("Failed to write defaults");
	path
}

pub fn sandbox(enabled: bool) -> Settings {
	Settings::new(SettingsType::SandboxModeEnabled, json!(enabled)).expect("valid setting")
}

pub fn filter_setting(entities: &[&str]) -> Settings {
	let filters = entities
		.iter()
		.map(|name| Filters {
			entity_name: (*name).to_string(),
			rules: vec![FilterRule::all(EventType::EntityCreated)],
		})
		.collect();
	Settings::with_filters(filters).expect("valid filters")
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// vim: ts=4
