use std::process::ExitCode;
use std::sync::Arc;

use catalog_settings::AppBuilder;
use catalog_settings_adapter_sqlite::SettingsAdapterSqlite;
use tracing::error;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
	// Installs the tracing subscriber
	let mut builder = AppBuilder::new();

	let config = match Config::from_env() {
		Ok(config) => config,
		Err(e) => {
			error!("FATAL: Invalid configuration: {}", e);
			return ExitCode::FAILURE;
		}
	};

	let settings_adapter = match SettingsAdapterSqlite::new(config.db_dir.join("settings.db")).await
	{
		Ok(adapter) => adapter,
		Err(e) => {
			error!("FATAL: Cannot open settings database in {}: {}", config.db_dir.display(), e);
			return ExitCode::FAILURE;
		}
	};

	builder
		.listen(config.listen)
		.resource_dir(config.resource_dir)
		.cache_size(config.cache_size)
		.settings_adapter(Arc::new(settings_adapter));

	match builder.run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("FATAL: {}", e);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
