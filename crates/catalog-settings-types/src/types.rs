//! Settings entity model
//!
//! A settings record is keyed by its [`SettingsType`]. The type selects the
//! shape of the payload: the activity feed filter setting carries a typed list
//! of [`Filters`], every other type carries an opaque JSON value. Mismatched
//! type/payload pairs are rejected when the record is constructed or
//! deserialized.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

use crate::error::{CsResult, Error};

/// Wildcard entity name whose filters apply to entities without their own entry
pub const ALL_ENTITIES: &str = "all";

/// Wildcard field name in a filter rule's include list
pub const ALL_FIELDS: &str = "all";

/// Closed set of settings kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsType {
	AuthorizerConfiguration,
	AuthenticationConfiguration,
	JwtTokenConfiguration,
	Elasticsearch,
	EventHandlerConfiguration,
	AirflowConfiguration,
	FernetConfiguration,
	SlackEventPublishers,
	SecretsManagerConfiguration,
	SandboxModeEnabled,
	SlackChat,
	ActivityFeedFilterSetting,
}

impl SettingsType {
	pub const ALL: [SettingsType; 12] = [
		SettingsType::AuthorizerConfiguration,
		SettingsType::AuthenticationConfiguration,
		SettingsType::JwtTokenConfiguration,
		SettingsType::Elasticsearch,
		SettingsType::EventHandlerConfiguration,
		SettingsType::AirflowConfiguration,
		SettingsType::FernetConfiguration,
		SettingsType::SlackEventPublishers,
		SettingsType::SecretsManagerConfiguration,
		SettingsType::SandboxModeEnabled,
		SettingsType::SlackChat,
		SettingsType::ActivityFeedFilterSetting,
	];

	/// The one settings type whose payload is a list of entity filters
	pub const FILTER_SETTING: SettingsType = SettingsType::ActivityFeedFilterSetting;

	pub fn as_str(self) -> &'static str {
		match self {
			SettingsType::AuthorizerConfiguration => "authorizerConfiguration",
			SettingsType::AuthenticationConfiguration => "authenticationConfiguration",
			SettingsType::JwtTokenConfiguration => "jwtTokenConfiguration",
			SettingsType::Elasticsearch => "elasticsearch",
			SettingsType::EventHandlerConfiguration => "eventHandlerConfiguration",
			SettingsType::AirflowConfiguration => "airflowConfiguration",
			SettingsType::FernetConfiguration => "fernetConfiguration",
			SettingsType::SlackEventPublishers => "slackEventPublishers",
			SettingsType::SecretsManagerConfiguration => "secretsManagerConfiguration",
			SettingsType::SandboxModeEnabled => "sandboxModeEnabled",
			SettingsType::SlackChat => "slackChat",
			SettingsType::ActivityFeedFilterSetting => "activityFeedFilterSetting",
		}
	}

	pub fn is_filter_setting(self) -> bool {
		self == Self::FILTER_SETTING
	}
}

impl fmt::Display for SettingsType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SettingsType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| Error::ValidationError(format!("Unknown settings type: {}", s)))
	}
}

/// Entity lifecycle events a filter rule can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
	EntityCreated,
	EntityUpdated,
	EntitySoftDeleted,
	EntityDeleted,
}

/// Inclusion/exclusion predicate for one event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
	pub event_type: EventType,
	#[serde(default)]
	pub include: Vec<String>,
	#[serde(default)]
	pub exclude: Vec<String>,
}

impl FilterRule {
	/// Rule that accepts every field of the given event type
	pub fn all(event_type: EventType) -> Self {
		Self { event_type, include: vec![ALL_FIELDS.to_string()], exclude: Vec::new() }
	}

	pub fn allows_field(&self, field: &str) -> bool {
		!self.exclude.iter().any(|f| f == field)
			&& self.include.iter().any(|f| f == ALL_FIELDS || f == field)
	}

	/// With no changed fields the rule matches when anything is included.
	pub fn allows(&self, changed_fields: &[&str]) -> bool {
		if changed_fields.is_empty() {
			!self.include.is_empty()
		} else {
			changed_fields.iter().any(|field| self.allows_field(field))
		}
	}
}

/// Event filters of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
	#[serde(alias = "entityType")]
	pub entity_name: String,
	#[serde(default, alias = "filters")]
	pub rules: Vec<FilterRule>,
}

impl Filters {
	pub fn new(entity_name: impl Into<String>, rules: Vec<FilterRule>) -> CsResult<Self> {
		let filters = Self { entity_name: entity_name.into(), rules };
		filters.validate()?;
		Ok(filters)
	}

	pub fn validate(&self) -> CsResult<()> {
		if self.entity_name.trim().is_empty() {
			return Err(Error::ValidationError("Filter entity name must not be blank".into()));
		}
		Ok(())
	}

	/// Rule for the given event type, if the entity subscribes to it
	pub fn rule(&self, event_type: EventType) -> Option<&FilterRule> {
		self.rules.iter().find(|r| r.event_type == event_type)
	}
}

/// Payload of a settings record, shaped by its settings type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
	Filters(Vec<Filters>),
	Json(serde_json::Value),
}

/// Wire representation, validated into [`Settings`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
	config_type: SettingsType,
	#[serde(default)]
	config_value: serde_json::Value,
}

/// A settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSettings")]
pub struct Settings {
	config_type: SettingsType,
	config_value: SettingValue,
}

impl Settings {
	/// Build a record from a JSON payload, validating it against the settings type
	pub fn new(config_type: SettingsType, value: serde_json::Value) -> CsResult<Self> {
		if config_type.is_filter_setting() {
			let filters: Vec<Filters> = serde_json::from_value(value).map_err(|e| {
				Error::ValidationError(format!("Invalid {} payload: {}", config_type, e))
			})?;
			return Self::with_filters(filters);
		}

		if value.is_null() {
			return Err(Error::ValidationError(format!("Setting '{}' requires a configValue", config_type)));
		}
		Ok(Self { config_type, config_value: SettingValue::Json(value) })
	}

	/// Build the filter-bearing record from a list of entity filters
	pub fn with_filters(filters: Vec<Filters>) -> CsResult<Self> {
		let mut seen = HashSet::new();
		for entry in &filters {
			entry.validate()?;
			if !seen.insert(entry.entity_name.as_str()) {
				return Err(Error::ValidationError(format!(
					"Duplicate filter entity: {}",
					entry.entity_name
				)));
			}
		}
		Ok(Self { config_type: SettingsType::FILTER_SETTING, config_value: SettingValue::Filters(filters) })
	}

	pub fn config_type(&self) -> SettingsType {
		self.config_type
	}

	/// Entity filters, present only on the filter-bearing settings type
	pub fn filters(&self) -> Option<&[Filters]> {
		match &self.config_value {
			SettingValue::Filters(filters) => Some(filters),
			SettingValue::Json(_) => None,
		}
	}

	/// Payload as a JSON document (the patch target)
	pub fn to_json_value(&self) -> CsResult<serde_json::Value> {
		serde_json::to_value(&self.config_value)
			.map_err(|e| Error::Internal(format!("Failed to serialize setting: {}", e)))
	}
}

impl TryFrom<RawSettings> for Settings {
	type Error = Error;

	fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
		Settings::new(raw.config_type, raw.config_value)
	}
}


// vim: ts=4
