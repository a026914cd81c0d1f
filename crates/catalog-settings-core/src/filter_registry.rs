//! In-memory registry of activity feed event filters
//!
//! Rebuilt from the filter setting at every start and kept in step with it by
//! the settings service. The event dispatcher consults it through
//! [`FilterRegistry::lookup`] and [`FilterRegistry::is_event_allowed`].

use parking_lot::RwLock;
use std::collections::HashMap;

use catalog_settings_types::types::ALL_ENTITIES;

use crate::prelude::*;

#[derive(Debug, Default)]
pub struct FilterRegistry {
	filters: RwLock<HashMap<String, Filters>>,
}

impl FilterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace the rules of one entity
	pub fn add(&self, filters: Filters) {
		debug!("Registering {} filter rules for '{}'", filters.rules.len(), filters.entity_name);
		self.filters.write().insert(filters.entity_name.clone(), filters);
	}

	/// Replace the whole registry with the given entries
	pub fn sync(&self, filters: &[Filters]) {
		let entries = filters.iter().map(|f| (f.entity_name.clone(), f.clone())).collect();
		*self.filters.write() = entries;
		info!("Filter registry synchronized with {} entities", filters.len());
	}

	/// Rules registered for the entity, or an empty list
	pub fn lookup(&self, entity_name: &str) -> Vec<FilterRule> {
		self.filters.read().get(entity_name).map(|f| f.rules.clone()).unwrap_or_default()
	}

	/// Decide whether an event should reach the activity feed.
	///
	/// Uses the entity's own entry, falling back to the `all` entry. Without
	/// any entry the event is allowed; an event type without a rule is not.
	pub fn is_event_allowed(
		&self,
		entity_name: &str,
		event_type: EventType,
		changed_fields: &[&str],
	) -> bool {
		let filters = self.filters.read();
		let Some(entry) = filters.get(entity_name).or_else(|| filters.get(ALL_ENTITIES)) else {
			return true;
		};
		entry.rule(event_type).is_some_and(|rule| rule.allows(changed_fields))
	}

	pub fn entities(&self) -> Vec<String> {
		let mut names: Vec<_> = self.filters.read().keys().cloned().collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.filters.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.filters.read().is_empty()
	}
}


// vim: ts=4
