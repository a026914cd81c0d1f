//! App state type

use std::{path::Path, sync::Arc};

use crate::filter_registry::FilterRegistry;
use crate::settings::service::SettingsService;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process-wide state owned by the composition root and shared with handlers
pub struct AppState {
	pub opts: AppBuilderOpts,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub filters: Arc<FilterRegistry>,
}

pub type App = Arc<AppState>;

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Root searched for the bundled default settings document
	pub resource_dir: Box<Path>,
	/// Capacity of the settings LRU cache
	pub cache_size: usize,
}

// vim: ts=4
