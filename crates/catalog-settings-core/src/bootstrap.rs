//! Startup bootstrap: seed missing default settings and populate the filter registry
//!
//! Bootstrap is best-effort. A missing or ambiguous default document skips
//! seeding entirely, and a failing record is reported without stopping the
//! records after it. Stored values always win over defaults.

use crate::defaults::DefaultsLoader;
use crate::filter_registry::FilterRegistry;
use crate::prelude::*;
use crate::settings::store::SettingsStore;

/// A default record that could not be seeded
#[derive(Debug)]
pub struct BootstrapFailure {
	/// Position of the record in the default document
	pub index: usize,
	/// Settings type, when the record was well-formed enough to have one
	pub config_type: Option<SettingsType>,
	pub error: Error,
}

/// Outcome of one bootstrap run
#[derive(Debug, Default)]
pub struct BootstrapReport {
	pub defaults_loaded: bool,
	/// Keys inserted from the defaults
	pub seeded: Vec<SettingsType>,
	/// Keys that already had a stored value
	pub existing: Vec<SettingsType>,
	/// Entity filters fed into the registry
	pub filters_registered: usize,
	pub failures: Vec<BootstrapFailure>,
}

impl BootstrapReport {
	pub fn is_clean(&self) -> bool {
		self.defaults_loaded && self.failures.is_empty()
	}

	/// Write the startup diagnostics
	pub fn log(&self) {
		if !self.defaults_loaded {
			warn!("Settings bootstrap skipped: default settings could not be loaded");
			return;
		}
		for failure in &self.failures {
			match failure.config_type {
				Some(config_type) => warn!(
					index = failure.index,
					"Default setting '{}' was not seeded: {}", config_type, failure.error
				),
				None => warn!(index = failure.index, "Default setting was not seeded: {}", failure.error),
			}
		}
		info!(
			"Settings bootstrap finished: {} seeded, {} already stored, {} filters registered, {} failed",
			self.seeded.len(),
			self.existing.len(),
			self.filters_registered,
			self.failures.len()
		);
	}
}

struct Seeded {
	config_type: SettingsType,
	created: bool,
	filters: usize,
}

/// Load the default document and seed it. Never fails; see the report.
pub async fn bootstrap_settings(
	loader: &DefaultsLoader,
	store: &SettingsStore,
	filters: &FilterRegistry,
) -> BootstrapReport {
	match loader.load_defaults().await {
		Ok(defaults) => seed_defaults(defaults, store, filters).await,
		Err(err) => {
			warn!("Cannot load default settings from {}: {}", loader.root().display(), err);
			BootstrapReport::default()
		}
	}
}

/// Seed already parsed defaults record by record
pub async fn seed_defaults(
	defaults: Vec<CsResult<Settings>>,
	store: &SettingsStore,
	filters: &FilterRegistry,
) -> BootstrapReport {
	let mut report = BootstrapReport { defaults_loaded: true, ..BootstrapReport::default() };

	for (index, default) in defaults.into_iter().enumerate() {
		let config_type = default.as_ref().ok().map(Settings::config_type);
		match seed_setting(store, filters, default).await {
			Ok(seeded) => {
				if seeded.created {
					report.seeded.push(seeded.config_type);
				} else {
					report.existing.push(seeded.config_type);
				}
				report.filters_registered += seeded.filters;
			}
			Err(error) => report.failures.push(BootstrapFailure { index, config_type, error }),
		}
	}

	report
}

async fn seed_setting(
	store: &SettingsStore,
	filters: &FilterRegistry,
	default: CsResult<Settings>,
) -> CsResult<Seeded> {
	let default = default?;
	let config_type = default.config_type();

	let (stored, created) = match store.find(config_type).await? {
		Some(stored) => {
			debug!("Setting '{}' already stored, keeping it", config_type);
			(stored, false)
		}
		None => match store.create(&default).await {
			Ok(()) => (default, true),
			// Someone else created it between the lookup and the insert
			Err(Error::Conflict(_)) => (store.get_by_key(config_type).await?, false),
			Err(err) => return Err(err),
		},
	};

	let registered = match stored.filters() {
		Some(list) => {
			for entry in list {
				filters.add(entry.clone());
			}
			list.len()
		}
		None => 0,
	};

	Ok(Seeded { config_type, created, filters: registered })
}

// vim: ts=4
