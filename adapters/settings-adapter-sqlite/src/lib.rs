//! SQLite implementation of the settings adapter.
//!
//! Settings live in a single table keyed by the settings type. Each adapter
//! call maps to one statement, so readers never see a half-written record.

#![forbid(unsafe_code)]

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use catalog_settings_types::{prelude::*, settings_adapter::SettingsAdapter};

mod schema;
mod setting;

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	/// Open (or create) the database file at `path` and make sure the schema exists
	pub async fn new(path: impl AsRef<Path>) -> CsResult<Self> {
		if let Some(parent) = path.as_ref().parent() {
			tokio::fs::create_dir_all(parent).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DB: cannot open {}: {:#?}", path.as_ref().display(), err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DB: schema init failed: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("Settings database opened at {}", path.as_ref().display());
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn read_setting(&self, config_type: SettingsType) -> CsResult<Option<Settings>> {
		setting::read(&self.db, config_type).await
	}

	async fn list_settings(&self) -> CsResult<Vec<Settings>> {
		setting::list(&self.db).await
	}

	async fn create_setting(&self, settings: &Settings) -> CsResult<()> {
		setting::create(&self.db, settings).await
	}

	async fn upsert_setting(&self, settings: &Settings) -> CsResult<()> {
		setting::upsert(&self.db, settings).await
	}

	async fn update_setting(&self, settings: &Settings) -> CsResult<()> {
		setting::update(&self.db, settings).await
	}
}

// vim: ts=4
