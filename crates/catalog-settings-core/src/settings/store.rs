//! Settings store: key-unique persistence of settings records
//!
//! The store owns the read-modify-write cycles (patch, entity filter update)
//! and serializes them per settings type. Callers that need to do more work
//! inside the same critical section (the cache-aware service) take the key
//! lock themselves and call the `*_locked` variants.

use json_patch::Patch;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

use catalog_settings_types::settings_adapter::SettingsAdapter;

use super::key_lock::KeyLocks;
use crate::prelude::*;

#[derive(Debug)]
pub struct SettingsStore {
	adapter: Arc<dyn SettingsAdapter>,
	locks: KeyLocks,
}

impl SettingsStore {
	pub fn new(adapter: Arc<dyn SettingsAdapter>) -> Self {
		Self { adapter, locks: KeyLocks::new() }
	}

	/// Acquire the write lock of one settings type
	pub async fn lock_key(&self, config_type: SettingsType) -> OwnedMutexGuard<()> {
		self.locks.lock(config_type).await
	}

	pub async fn find(&self, config_type: SettingsType) -> CsResult<Option<Settings>> {
		self.adapter.read_setting(config_type).await
	}

	pub async fn get_by_key(&self, config_type: SettingsType) -> CsResult<Settings> {
		self.find(config_type).await?.ok_or(Error::NotFound)
	}

	/// All records, ordered by settings type key
	pub async fn list_all(&self) -> CsResult<Vec<Settings>> {
		let mut settings = self.adapter.list_settings().await?;
		settings.sort_by_key(|s| s.config_type().as_str());
		Ok(settings)
	}

	pub async fn create(&self, settings: &Settings) -> CsResult<()> {
		let _guard = self.lock_key(settings.config_type()).await;
		self.create_locked(settings).await
	}

	pub async fn create_or_update(&self, settings: Settings) -> CsResult<Settings> {
		let _guard = self.lock_key(settings.config_type()).await;
		self.create_or_update_locked(settings).await
	}

	pub async fn patch(&self, config_type: SettingsType, patch: &Patch) -> CsResult<Settings> {
		let _guard = self.lock_key(config_type).await;
		self.patch_locked(config_type, patch).await
	}

	pub async fn update_entity_filter(
		&self,
		entity_name: &str,
		rules: Vec<FilterRule>,
	) -> CsResult<Filters> {
		let _guard = self.lock_key(SettingsType::FILTER_SETTING).await;
		let (_, filters) = self.update_entity_filter_locked(entity_name, rules).await?;
		Ok(filters)
	}

	// Callers of the *_locked variants must hold the key lock of the record
	//***********************************************************************

	pub(crate) async fn create_locked(&self, settings: &Settings) -> CsResult<()> {
		self.adapter.create_setting(settings).await?;
		info!("Setting '{}' created", settings.config_type());
		Ok(())
	}

	pub(crate) async fn create_or_update_locked(&self, settings: Settings) -> CsResult<Settings> {
		self.adapter.upsert_setting(&settings).await?;
		info!("Setting '{}' stored", settings.config_type());
		Ok(settings)
	}

	/// Apply an RFC 6902 patch to a copy of the stored payload and persist the
	/// result in one statement. A failing operation leaves the store untouched.
	pub(crate) async fn patch_locked(
		&self,
		config_type: SettingsType,
		patch: &Patch,
	) -> CsResult<Settings> {
		let current = self.get_by_key(config_type).await?;
		let mut doc = current.to_json_value()?;

		json_patch::patch(&mut doc, &patch.0).map_err(|e| {
			debug!("Patch on '{}' rejected: {}", config_type, e);
			Error::PatchError(e.to_string())
		})?;

		let patched = Settings::new(config_type, doc)?;
		self.adapter.update_setting(&patched).await?;
		info!("Setting '{}' patched ({} operations)", config_type, patch.0.len());
		Ok(patched)
	}

	/// Replace or append the filters of one entity inside the filter-bearing
	/// record, creating the record when it does not exist yet.
	pub(crate) async fn update_entity_filter_locked(
		&self,
		entity_name: &str,
		rules: Vec<FilterRule>,
	) -> CsResult<(Settings, Filters)> {
		let entry = Filters::new(entity_name, rules)?;

		let mut list = match self.find(SettingsType::FILTER_SETTING).await? {
			Some(stored) => stored.filters().map(<[Filters]>::to_vec).unwrap_or_default(),
			None => Vec::new(),
		};
		match list.iter_mut().find(|f| f.entity_name == entry.entity_name) {
			Some(existing) => *existing = entry.clone(),
			None => list.push(entry.clone()),
		}

		let settings = Settings::with_filters(list)?;
		self.adapter.upsert_setting(&settings).await?;
		info!("Filters of entity '{}' updated", entry.entity_name);
		Ok((settings, entry))
	}
}

// vim: ts=4
