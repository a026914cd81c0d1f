//! Error taxonomy shared by the store, cache, bootstrap and transport layers.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::Serialize;

pub type CsResult<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The requested settings key does not exist
	#[error("not found")]
	NotFound,

	/// Create on a key that already has a record
	#[error("conflict: {0}")]
	Conflict(String),

	/// Malformed input or a payload that does not fit its settings type
	#[error("validation error: {0}")]
	ValidationError(String),

	/// Patch document invalid or inapplicable to the current document
	#[error("patch error: {0}")]
	PatchError(String),

	/// Default settings document missing or ambiguous
	#[error("config load error: {0}")]
	ConfigLoad(String),

	/// Underlying persistence failure (details are logged where it happens)
	#[error("settings store unavailable")]
	DbError,

	/// The settings cache is already bound to a different store
	#[error("settings cache already initialized")]
	AlreadyInitialized,

	#[error("internal error: {0}")]
	Internal(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::PatchError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Error::DbError => StatusCode::SERVICE_UNAVAILABLE,
			Error::ConfigLoad(_) | Error::AlreadyInitialized | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Stable machine-readable error code used in response bodies
	pub fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOT-FOUND",
			Error::Conflict(_) => "E-CONFLICT",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::PatchError(_) => "E-PATCH",
			Error::ConfigLoad(_) => "E-CONFIG-LOAD",
			Error::DbError => "E-STORE-UNAVAILABLE",
			Error::AlreadyInitialized => "E-ALREADY-INITIALIZED",
			Error::Internal(_) | Error::Io(_) => "E-INTERNAL",
		}
	}
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
	code: &'static str,
	message: String,
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status_code();
		if status.is_server_error() {
			tracing::warn!(code = self.code(), "request failed: {}", self);
		}
		let body = ErrorResponse { code: self.code(), message: self.to_string() };
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
