//! Settings subsystem: persistence, caching and per-key write serialization
//!
//! # Architecture
//!
//! - **Store** (`store.rs`): key-unique reads and writes on top of the adapter
//! - **Cache** (`cache.rs`): read-through LRU cache bound once to a store
//! - **Service** (`service.rs`): cache-aware write path used by the transport
//! - **Key locks** (`key_lock.rs`): one async mutex per settings type
//!
//! Writes through the service hold the key lock while they persist and
//! refresh the cache, so a read after a write never sees a stale entry.

pub mod cache;
pub mod key_lock;
pub mod service;
pub mod store;

pub use cache::SettingsCache;
pub use service::SettingsService;
pub use store::SettingsStore;

// vim: ts=4
