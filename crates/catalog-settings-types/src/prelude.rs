pub use crate::error::{CsResult, Error};
pub use crate::types::{EventType, FilterRule, Filters, SettingValue, Settings, SettingsType};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
