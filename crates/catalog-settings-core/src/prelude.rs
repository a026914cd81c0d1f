pub use catalog_settings_types::prelude::*;

// vim: ts=4
