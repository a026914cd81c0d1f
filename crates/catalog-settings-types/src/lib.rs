//! Shared types, the settings adapter trait, and error types for the catalog settings store.
//!
//! This crate contains the foundational types that are shared between the
//! core crate, the server crate and all adapter implementations. Keeping them
//! in a separate crate lets adapters compile without pulling in the service.

#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
