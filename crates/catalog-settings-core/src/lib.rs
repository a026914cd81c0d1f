//! Core of the catalog settings store.
//!
//! This crate holds the settings store (key-unique persistence on top of a
//! [`SettingsAdapter`](catalog_settings_types::settings_adapter::SettingsAdapter)),
//! the read-through settings cache, the in-memory event filter registry, and
//! the one-time bootstrap that seeds defaults at startup.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod bootstrap;
pub mod defaults;
pub mod filter_registry;
pub mod prelude;
pub mod settings;

pub use app::{App, AppBuilderOpts, AppState};
pub use filter_registry::FilterRegistry;

// vim: ts=4
