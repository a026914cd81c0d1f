//! Read-through LRU cache in front of the settings store

use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::{Arc, OnceLock};

use super::store::SettingsStore;
use crate::prelude::*;

/// LRU cache for settings records, bound once to a store
pub struct SettingsCache {
	cache: RwLock<LruCache<SettingsType, Settings>>,
	store: OnceLock<Arc<SettingsStore>>,
}

impl SettingsCache {
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self { cache: RwLock::new(LruCache::new(capacity)), store: OnceLock::new() }
	}

	/// Bind the cache to its store. Binding the same store again is a no-op,
	/// binding a different one fails and leaves the existing binding in place.
	pub fn initialize(&self, store: Arc<SettingsStore>) -> CsResult<()> {
		match self.store.set(store) {
			Ok(()) => {
				info!("Settings cache initialized");
				Ok(())
			}
			Err(store) => match self.store.get() {
				Some(current) if Arc::ptr_eq(current, &store) => {
					debug!("Settings cache already initialized with this store");
					Ok(())
				}
				_ => {
					warn!("Refusing to re-point settings cache to a different store");
					Err(Error::AlreadyInitialized)
				}
			},
		}
	}

	pub fn is_initialized(&self) -> bool {
		self.store.get().is_some()
	}

	pub fn store(&self) -> CsResult<&Arc<SettingsStore>> {
		self.store.get().ok_or_else(|| Error::Internal("settings cache is not initialized".into()))
	}

	/// Cached record, loading it from the store on a miss
	pub async fn get(&self, config_type: SettingsType) -> CsResult<Settings> {
		if let Some(settings) = self.cached(config_type) {
			debug!("Setting cache hit: {}", config_type);
			return Ok(settings);
		}

		let store = self.store()?;
		// Writers hold the same lock while they refresh the entry
		let _guard = store.lock_key(config_type).await;
		if let Some(settings) = self.cached(config_type) {
			return Ok(settings);
		}

		let settings = store.get_by_key(config_type).await?;
		self.put(settings.clone());
		Ok(settings)
	}

	pub fn cached(&self, config_type: SettingsType) -> Option<Settings> {
		self.cache.write().get(&config_type).cloned()
	}

	pub fn put(&self, settings: Settings) {
		self.cache.write().put(settings.config_type(), settings);
	}

	pub fn invalidate(&self, config_type: SettingsType) {
		self.cache.write().pop(&config_type);
	}

	pub fn len(&self) -> usize {
		self.cache.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.read().is_empty()
	}
}

// vim: ts=4
