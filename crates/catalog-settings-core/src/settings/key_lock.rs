//! Per-key write serialization

use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::prelude::*;

/// One async mutex per settings type. The key space is closed, so the map
/// never grows beyond `SettingsType::ALL.len()` entries.
#[derive(Debug, Default)]
pub struct KeyLocks {
	locks: Mutex<HashMap<SettingsType, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn lock(&self, key: SettingsType) -> OwnedMutexGuard<()> {
		let lock = self.locks.lock().entry(key).or_default().clone();
		lock.lock_owned().await
	}
}


// vim: ts=4
