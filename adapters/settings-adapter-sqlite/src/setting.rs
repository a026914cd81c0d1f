//! Settings table access
//!
//! Payloads are stored as serialized JSON next to their settings type key.

use sqlx::{Row, SqlitePool};

use catalog_settings_types::prelude::*;

fn decode(config_type: &str, json: &str) -> CsResult<Settings> {
	let config_type: SettingsType = config_type.parse()?;
	let value: serde_json::Value = serde_json::from_str(json)
		.map_err(|e| Error::ValidationError(format!("Stored payload is not JSON: {}", e)))?;
	Settings::new(config_type, value)
}

fn encode(settings: &Settings) -> CsResult<String> {
	Ok(settings.to_json_value()?.to_string())
}

/// List all settings ordered by key. Rows that fail to decode are skipped.
pub(crate) async fn list(db: &SqlitePool) -> CsResult<Vec<Settings>> {
	let rows = sqlx::query("SELECT config_type, json FROM settings ORDER BY config_type")
		.fetch_all(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let mut settings = Vec::with_capacity(rows.len());
	for row in rows {
		let config_type: String = row.try_get("config_type").or(Err(Error::DbError))?;
		let json: String = row.try_get("json").or(Err(Error::DbError))?;
		match decode(&config_type, &json) {
			Ok(s) => settings.push(s),
			Err(err) => warn!("Skipping undecodable setting '{}': {}", config_type, err),
		}
	}

	Ok(settings)
}

/// Read a single setting by key
pub(crate) async fn read(db: &SqlitePool, config_type: SettingsType) -> CsResult<Option<Settings>> {
	let row = sqlx::query("SELECT json FROM settings WHERE config_type = ?")
		.bind(config_type.as_str())
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let Some(row) = row else {
		return Ok(None);
	};
	let json: String = row.try_get("json").or(Err(Error::DbError))?;
	decode(config_type.as_str(), &json)
		.map(Some)
		.inspect_err(|err| warn!("DB: stored setting '{}' is invalid: {}", config_type, err))
		.map_err(|_| Error::DbError)
}

/// Insert a new setting, failing if the key already exists
pub(crate) async fn create(db: &SqlitePool, settings: &Settings) -> CsResult<()> {
	let json = encode(settings)?;
	let res = sqlx::query("INSERT INTO settings (config_type, json) VALUES (?, ?)")
		.bind(settings.config_type().as_str())
		.bind(json)
		.execute(db)
		.await;

	match res {
		Ok(_) => Ok(()),
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Err(Error::Conflict(
			format!("Setting '{}' already exists", settings.config_type()),
		)),
		Err(err) => {
			warn!("DB: {:#?}", err);
			Err(Error::DbError)
		}
	}
}

/// Insert or fully replace a setting
pub(crate) async fn upsert(db: &SqlitePool, settings: &Settings) -> CsResult<()> {
	let json = encode(settings)?;
	sqlx::query(
		"INSERT INTO settings (config_type, json) VALUES (?, ?)
		ON CONFLICT(config_type) DO UPDATE SET json = excluded.json, updated_at = unixepoch()",
	)
	.bind(settings.config_type().as_str())
	.bind(json)
	.execute(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	Ok(())
}

/// Replace the payload of an existing setting
pub(crate) async fn update(db: &SqlitePool, settings: &Settings) -> CsResult<()> {
	let json = encode(settings)?;
	let res = sqlx::query("UPDATE settings SET json = ?, updated_at = unixepoch() WHERE config_type = ?")
		.bind(json)
		.bind(settings.config_type().as_str())
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
