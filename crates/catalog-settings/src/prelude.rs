pub use catalog_settings_core::prelude::*;
pub use catalog_settings_core::{App, AppState};

// vim: ts=4
