//! Catalog settings store.
//!
//! Persistent settings records keyed by settings type, with a read-through
//! cache, RFC 6902 patching, an event filter registry, and startup seeding
//! of bundled defaults. This crate composes the pieces and serves them over
//! HTTP.
//!
//! # Usage
//!
//! ```no_run
//! # async fn run() -> catalog_settings::error::CsResult<()> {
//! use std::sync::Arc;
//! use catalog_settings_adapter_sqlite::SettingsAdapterSqlite;
//!
//! let adapter = SettingsAdapterSqlite::new("./data/settings.db").await?;
//! let mut builder = catalog_settings::AppBuilder::new();
//! builder
//! 	.listen("127.0.0.1:8080")
//! 	.resource_dir(std::path::Path::new("./resources"))
//! 	.settings_adapter(Arc::new(adapter));
//! builder.run().await
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub use catalog_settings_types::error;
pub use catalog_settings_types::settings_adapter;
pub use catalog_settings_types::types;

pub use catalog_settings_core::bootstrap;
pub use catalog_settings_core::defaults;
pub use catalog_settings_core::filter_registry;
pub use catalog_settings_core::settings;

pub mod app;
pub mod handler;
pub mod prelude;
pub mod routes;

pub use app::{App, AppBuilder, AppState};

// vim: ts=4
