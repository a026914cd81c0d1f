//! Adapter that persists settings records, one row per settings type.
//!
//! Every method is expected to be a single atomic operation against the
//! backing store. Read-modify-write sequences are serialized by the caller.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Read the record stored for `config_type`, if any
	async fn read_setting(&self, config_type: SettingsType) -> CsResult<Option<Settings>>;

	/// List every stored record
	async fn list_settings(&self) -> CsResult<Vec<Settings>>;

	/// Insert a new record. Fails with `Error::Conflict` if the key already exists.
	async fn create_setting(&self, settings: &Settings) -> CsResult<()>;

	/// Insert or fully replace the record for `settings.config_type()`
	async fn upsert_setting(&self, settings: &Settings) -> CsResult<()>;

	/// Replace an existing record. Fails with `Error::NotFound` if it is absent.
	async fn update_setting(&self, settings: &Settings) -> CsResult<()>;
}

// vim: ts=4
