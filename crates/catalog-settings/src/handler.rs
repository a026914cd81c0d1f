//! Settings handlers
//!
//! Request bodies are read as raw bytes and parsed here, so that a malformed
//! body (or one sent without a JSON content type) is reported as a
//! validation error in the usual error envelope.

use axum::{
	Json,
	body::Bytes,
	extract::{Path, State},
};
use json_patch::Patch;
use serde::Serialize;

use crate::prelude::*;

#[derive(Debug, Serialize)]
pub struct Paging {
	pub total: usize,
}

/// List envelope
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
	pub data: Vec<T>,
	pub paging: Paging,
}

impl<T> ListResponse<T> {
	pub fn new(data: Vec<T>) -> Self {
		let total = data.len();
		Self { data, paging: Paging { total } }
	}
}

/// Settings type from a path segment. Unknown names do not exist.
fn setting_key(name: &str) -> CsResult<SettingsType> {
	name.parse().map_err(|_| {
		debug!("Unknown setting requested: {}", name);
		Error::NotFound
	})
}

fn from_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> CsResult<T> {
	serde_json::from_slice(body)
		.map_err(|e| Error::ValidationError(format!("Invalid request body: {}", e)))
}

/// GET /api/v1/settings
pub async fn list_settings(State(app): State<App>) -> CsResult<Json<ListResponse<Settings>>> {
	let settings = app.settings.list_all().await?;
	Ok(Json(ListResponse::new(settings)))
}

/// GET /api/v1/settings/{setting_name}
pub async fn get_setting(
	State(app): State<App>,
	Path(setting_name): Path<String>,
) -> CsResult<Json<Settings>> {
	let key = setting_key(&setting_name)?;
	Ok(Json(app.settings.get(key).await?))
}

/// PUT /api/v1/settings - create or replace a whole record
pub async fn put_setting(
	State(app): State<App>,
	body: Bytes,
) -> CsResult<Json<Settings>> {
	let settings: Settings = from_body(&body)?;
	Ok(Json(app.settings.create_or_update(settings).await?))
}

/// PUT /api/v1/settings/filter/{entity_name}/add - replace the rules of one entity
pub async fn add_entity_filter(
	State(app): State<App>,
	Path(entity_name): Path<String>,
	body: Bytes,
) -> CsResult<Json<Filters>> {
	let rules: Vec<FilterRule> = from_body(&body)?;
	Ok(Json(app.settings.update_entity_filter(&entity_name, rules).await?))
}

/// PATCH /api/v1/settings/{setting_name} - apply an RFC 6902 patch document
pub async fn patch_setting(
	State(app): State<App>,
	Path(setting_name): Path<String>,
	body: Bytes,
) -> CsResult<Json<Settings>> {
	let key = setting_key(&setting_name)?;
	let patch: Patch = from_body(&body)?;
	Ok(Json(app.settings.patch(key, &patch).await?))
}

// vim: ts=4
