//! Settings service - the cache-aware entry point used by the transport layer
//!
//! Every write holds the key lock of the record while it persists, refreshes
//! the cache entry, and (for the filter setting) updates the filter registry.

use json_patch::Patch;
use std::sync::Arc;

use super::{cache::SettingsCache, store::SettingsStore};
use crate::filter_registry::FilterRegistry;
use crate::prelude::*;

pub struct SettingsService {
	store: Arc<SettingsStore>,
	cache: Arc<SettingsCache>,
	filters: Arc<FilterRegistry>,
}

impl SettingsService {
	/// The cache must already be initialized; the service writes to the same store.
	pub fn new(cache: Arc<SettingsCache>, filters: Arc<FilterRegistry>) -> CsResult<Self> {
		let store = cache.store()?.clone();
		Ok(Self { store, cache, filters })
	}

	pub async fn list_all(&self) -> CsResult<Vec<Settings>> {
		self.store.list_all().await
	}

	pub async fn get(&self, config_type: SettingsType) -> CsResult<Settings> {
		self.cache.get(config_type).await
	}

	pub async fn create(&self, settings: Settings) -> CsResult<Settings> {
		let _guard = self.store.lock_key(settings.config_type()).await;
		self.store.create_locked(&settings).await?;
		self.refresh(&settings);
		Ok(settings)
	}

	pub async fn create_or_update(&self, settings: Settings) -> CsResult<Settings> {
		let _guard = self.store.lock_key(settings.config_type()).await;
		let stored = self.store.create_or_update_locked(settings).await?;
		self.refresh(&stored);
		Ok(stored)
	}

	pub async fn patch(&self, config_type: SettingsType, patch: &Patch) -> CsResult<Settings> {
		let _guard = self.store.lock_key(config_type).await;
		let patched = self.store.patch_locked(config_type, patch).await?;
		self.refresh(&patched);
		Ok(patched)
	}

	pub async fn update_entity_filter(
		&self,
		entity_name: &str,
		rules: Vec<FilterRule>,
	) -> CsResult<Filters> {
		let _guard = self.store.lock_key(SettingsType::FILTER_SETTING).await;
		let (settings, entry) = self.store.update_entity_filter_locked(entity_name, rules).await?;
		self.cache.put(settings);
		self.filters.add(entry.clone());
		Ok(entry)
	}

	pub fn filters(&self) -> &Arc<FilterRegistry> {
		&self.filters
	}

	fn refresh(&self, settings: &Settings) {
		self.cache.put(settings.clone());
		if let Some(filters) = settings.filters() {
			self.filters.sync(filters);
		}
	}
}

// vim: ts=4
