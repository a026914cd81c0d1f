//! App builder - composes the settings store and runs the HTTP server

use std::{future::Future, path::PathBuf, pin::Pin, sync::Arc};

use crate::prelude::*;
use crate::routes;
use catalog_settings_core::bootstrap::bootstrap_settings;
use catalog_settings_core::defaults::DefaultsLoader;
use catalog_settings_core::filter_registry::FilterRegistry;
use catalog_settings_core::settings::{SettingsCache, SettingsService, SettingsStore};
use catalog_settings_types::settings_adapter::SettingsAdapter;

pub use catalog_settings_core::app::{App, AppBuilderOpts, AppState, VERSION};

/// Type alias for async initialization callbacks
type InitCallback =
	Box<dyn FnOnce(App) -> Pin<Box<dyn Future<Output = CsResult<()>> + Send>> + Send>;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	on_init: Vec<InitCallback>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// Several builders may exist in one process (tests), keep the first subscriber
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				resource_dir: PathBuf::from("./resources").into(),
				cache_size: 64,
			},
			settings_adapter: None,
			on_init: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn resource_dir(&mut self, resource_dir: impl Into<Box<std::path::Path>>) -> &mut Self {
		self.opts.resource_dir = resource_dir.into();
		self
	}
	pub fn cache_size(&mut self, cache_size: usize) -> &mut Self {
		self.opts.cache_size = cache_size;
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.settings_adapter = Some(settings_adapter);
		self
	}

	/// Register an async initialization callback that runs after the settings
	/// have been bootstrapped, before the server accepts requests.
	pub fn on_init<F, Fut>(&mut self, f: F) -> &mut Self
	where
		F: FnOnce(App) -> Fut + Send + 'static,
		Fut: Future<Output = CsResult<()>> + Send + 'static,
	{
		self.on_init.push(Box::new(move |app| Box::pin(f(app))));
		self
	}

	/// Compose the application: store, cache, filter registry, bootstrap
	pub async fn build(self) -> CsResult<App> {
		let Some(settings_adapter) = self.settings_adapter else {
			error!("FATAL: No settings adapter configured");
			return Err(Error::Internal("No settings adapter configured".to_string()));
		};

		let store = Arc::new(SettingsStore::new(settings_adapter));
		let cache = Arc::new(SettingsCache::new(self.opts.cache_size));
		cache.initialize(store.clone())?;
		let filters = Arc::new(FilterRegistry::new());

		let loader = DefaultsLoader::new(self.opts.resource_dir.to_path_buf()).map_err(|e| {
			error!("FATAL: Cannot create defaults loader: {}", e);
			e
		})?;
		let report = bootstrap_settings(&loader, &store, &filters).await;
		report.log();

		let settings = Arc::new(SettingsService::new(cache, filters.clone())?);
		info!("Settings subsystem initialized ({} filtered entities)", filters.len());

		let app: App = Arc::new(AppState { opts: self.opts, settings, filters });

		// Run custom init callbacks
		for callback in self.on_init {
			callback(app.clone()).await?;
		}

		Ok(app)
	}

	pub async fn run(self) -> CsResult<()> {
		info!("Catalog settings store V{}", VERSION);

		let app = self.build().await?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(&*app.opts.listen).await.map_err(|e| {
			error!("FATAL: Cannot listen on {}: {}", app.opts.listen, e);
			e
		})?;
		info!("Listening on HTTP {}", app.opts.listen);

		axum::serve(listener, router).await?;
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
