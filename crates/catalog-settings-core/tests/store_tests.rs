//! Settings store tests: uniqueness, upsert, patch and entity filters

mod common;

use json_patch::Patch;
use serde_json::json;
use std::sync::Arc;

use catalog_settings_types::prelude::*;
use common::*;

fn patch(ops: serde_json::Value) -> Patch {
	serde_json::from_value(ops).expect("valid patch document")
}

#[tokio::test]
async fn test_create_existing_key_conflicts() {
	let (store, _temp) = create_sqlite_store().await;

	store.create(&sandbox(true)).await.expect("create");
	let result = store.create(&sandbox(false)).await;
	assert!(matches!(result, Err(Error::Conflict(_))));

	let all = store.list_all().await.expect("list");
	assert_eq!(all, vec![sandbox(true)]);
}

#[tokio::test]
async fn test_get_missing_key() {
	let (store, _temp) = create_sqlite_store().await;

	let result = store.get_by_key(SettingsType::SlackChat).await;
	assert!(matches!(result, Err(Error::NotFound)));
	assert!(store.find(SettingsType::SlackChat).await.expect("find").is_none());
}

#[tokio::test]
async fn test_create_or_update_is_idempotent() {
	let (store, _temp) = create_sqlite_store().await;

	let first = store.create_or_update(sandbox(false)).await.expect("upsert");
	let once = store.list_all().await.expect("list");
	let second = store.create_or_update(sandbox(false)).await.expect("upsert");
	let twice = store.list_all().await.expect("list");

	assert_eq!(first, second);
	assert_eq!(once, twice);
	assert_eq!(twice.len(), 1);
}

#[tokio::test]
async fn test_create_or_update_replaces_payload() {
	let (store, _temp) = create_sqlite_store().await;

	store.create_or_update(sandbox(false)).await.expect("insert");
	store.create_or_update(sandbox(true)).await.expect("replace");

	assert_eq!(store.get_by_key(SettingsType::SandboxModeEnabled).await.expect("get"), sandbox(true));
}

#[tokio::test]
async fn test_patch_missing_key() {
	let (store, _temp) = create_sqlite_store().await;

	let result = store
		.patch(SettingsType::Elasticsearch, &patch(json!([{ "op": "replace", "path": "/a", "value": 5 }])))
		.await;
	assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_patch_applies_all_operations() {
	let (store, _temp) = create_sqlite_store().await;
	let search = Settings::new(SettingsType::Elasticsearch, json!({ "host": "localhost", "port": 9200 }))
		.expect("valid setting");
	store.create(&search).await.expect("create");

	let patched = store
		.patch(
			SettingsType::Elasticsearch,
			&patch(json!([
				{ "op": "replace", "path": "/port", "value": 9300 },
				{ "op": "add", "path": "/scheme", "value": "https" },
				{ "op": "remove", "path": "/host" },
				{ "op": "test", "path": "/port", "value": 9300 }
			])),
		)
		.await
		.expect("patch");

	let expected = json!({ "port": 9300, "scheme": "https" });
	assert_eq!(patched.to_json_value().expect("json"), expected);
	let stored = store.get_by_key(SettingsType::Elasticsearch).await.expect("get");
	assert_eq!(stored.to_json_value().expect("json"), expected);
}

#[tokio::test]
async fn test_failed_patch_leaves_store_unchanged() {
	let (store, _temp) = create_sqlite_store().await;
	let search = Settings::new(SettingsType::Elasticsearch, json!({ "host": "localhost", "port": 9200 }))
		.expect("valid setting");
	store.create(&search).await.expect("create");

	// First operation is valid, the second one is not
	let result = store
		.patch(
			SettingsType::Elasticsearch,
			&patch(json!([
				{ "op": "replace", "path": "/port", "value": 1 },
				{ "op": "remove", "path": "/missing" }
			])),
		)
		.await;
	assert!(matches!(result, Err(Error::PatchError(_))), "got {:?}", result);

	// A failing test operation is rejected the same way
	let result = store
		.patch(
			SettingsType::Elasticsearch,
			&patch(json!([
				{ "op": "replace", "path": "/port", "value": 1 },
				{ "op": "test", "path": "/host", "value": "elsewhere" }
			])),
		)
		.await;
	assert!(matches!(result, Err(Error::PatchError(_))));

	assert_eq!(store.get_by_key(SettingsType::Elasticsearch).await.expect("get"), search);
}

#[tokio::test]
async fn test_patch_must_keep_payload_valid() {
	let (store, _temp) = create_sqlite_store().await;
	store.create(&filter_setting(&["table"])).await.expect("create");

	let result = store
		.patch(
			SettingsType::ActivityFeedFilterSetting,
			&patch(json!([{ "op": "replace", "path": "", "value": { "not": "a list" } }])),
		)
		.await;
	assert!(matches!(result, Err(Error::ValidationError(_))));
	assert_eq!(
		store.get_by_key(SettingsType::ActivityFeedFilterSetting).await.expect("get"),
		filter_setting(&["table"])
	);
}

#[tokio::test]
async fn test_update_entity_filter_creates_record() {
	let (store, _temp) = create_sqlite_store().await;

	let rules = vec![FilterRule::all(EventType::EntityDeleted)];
	let filters = store.update_entity_filter("dashboard", rules.clone()).await.expect("update");
	assert_eq!(filters, Filters { entity_name: "dashboard".into(), rules: rules.clone() });

	let stored = store.get_by_key(SettingsType::ActivityFeedFilterSetting).await.expect("get");
	assert_eq!(stored.filters().expect("filters"), &[filters]);
}

#[tokio::test]
async fn test_update_entity_filter_replaces_entry() {
	let (store, _temp) = create_sqlite_store().await;
	store.create(&filter_setting(&["table", "topic"])).await.expect("create");

	let rules = vec![FilterRule::all(EventType::EntitySoftDeleted)];
	store.update_entity_filter("topic", rules.clone()).await.expect("update");

	let stored = store.get_by_key(SettingsType::ActivityFeedFilterSetting).await.expect("get");
	let list = stored.filters().expect("filters");
	assert_eq!(list.len(), 2);
	assert_eq!(list[0], filter_setting(&["table"]).filters().expect("filters")[0]);
	assert_eq!(list[1], Filters { entity_name: "topic".into(), rules });
}

#[tokio::test]
async fn test_update_entity_filter_rejects_blank_name() {
	let (store, _temp) = create_sqlite_store().await;

	let result = store.update_entity_filter("   ", vec![]).await;
	assert!(matches!(result, Err(Error::ValidationError(_))));
	assert!(store.find(SettingsType::ActivityFeedFilterSetting).await.expect("find").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_patches_are_serialized() {
	let (store, _temp) = create_sqlite_store().await;
	let publishers = Settings::new(SettingsType::SlackEventPublishers, json!({ "publishers": [] }))
		.expect("valid setting");
	store.create(&publishers).await.expect("create");

	let mut tasks = Vec::new();
	for name in ["first", "second"] {
		let store = Arc::clone(&store);
		tasks.push(tokio::spawn(async move {
			let ops = patch(json!([{ "op": "add", "path": "/publishers/-", "value": name }]));
			store.patch(SettingsType::SlackEventPublishers, &ops).await
		}));
	}
	for task in tasks {
		task.await.expect("join").expect("patch");
	}

	let stored = store.get_by_key(SettingsType::SlackEventPublishers).await.expect("get");
	let value = stored.to_json_value().expect("json");
	let list = value["publishers"].as_array().expect("array");
	assert_eq!(list.len(), 2);
	assert!(list.contains(&json!("first")));
	assert!(list.contains(&json!("second")));
}

// vim: ts=4
