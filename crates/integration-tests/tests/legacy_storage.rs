//! End-to-end behavior of the one-time legacy-storage migrator, driven
//! through the injected `ClientStore` capability.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use waterlife_storefront::services::legacy_storage::{
    ClientStore, LEGACY_KEYS, MIGRATION_MARKER_KEY, MigrationOutcome, StoreError, run_migration,
};

/// In-memory key-value store standing in for a visitor's session.
#[derive(Default)]
struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    fn seeded(pairs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut entries = store.entries.lock().expect("lock");
            for (key, value) in pairs {
                entries.insert((*key).to_owned(), Value::String((*value).to_owned()));
            }
        }
        store
    }

    fn snapshot(&self) -> HashMap<String, Value> {
        self.entries.lock().expect("lock").clone()
    }
}

impl ClientStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().expect("lock").get(key).cloned())
    }

    async fn insert(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("lock")
            .insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.lock().expect("lock").remove(key).is_some())
    }
}

/// A store whose every operation fails, for the error path.
struct BrokenStore;

impl ClientStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }

    async fn insert(&self, _key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
}

#[tokio::test]
async fn full_store_is_cleaned_completely() {
    let pairs: Vec<(&str, &str)> = LEGACY_KEYS.iter().map(|k| (*k, "cached")).collect();
    let store = MemoryStore::seeded(&pairs);

    let outcome = run_migration(Some(&store)).await.expect("migration");

    assert_eq!(outcome, MigrationOutcome::Cleaned { removed: 5 });

    let snapshot = store.snapshot();
    for key in LEGACY_KEYS {
        assert!(!snapshot.contains_key(key), "{key} should be gone");
    }
    assert_eq!(snapshot.get(MIGRATION_MARKER_KEY), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn removed_count_reflects_only_present_keys() {
    // The spec.md example: only waterlife_products is present.
    let store = MemoryStore::seeded(&[("waterlife_products", "...")]);

    let outcome = run_migration(Some(&store)).await.expect("migration");

    assert_eq!(outcome, MigrationOutcome::Cleaned { removed: 1 });
    let snapshot = store.snapshot();
    assert!(!snapshot.contains_key("waterlife_products"));
    assert_eq!(snapshot.get(MIGRATION_MARKER_KEY), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn running_twice_equals_running_once() {
    let pairs: Vec<(&str, &str)> = LEGACY_KEYS.iter().map(|k| (*k, "cached")).collect();
    let store = MemoryStore::seeded(&pairs);

    run_migration(Some(&store)).await.expect("first run");
    let after_first = store.snapshot();

    let second = run_migration(Some(&store)).await.expect("second run");

    assert_eq!(second, MigrationOutcome::AlreadyMigrated);
    assert_eq!(store.snapshot(), after_first);
}

#[tokio::test]
async fn preexisting_marker_freezes_the_store() {
    let store = MemoryStore::seeded(&[
        ("waterlife_users", "legacy"),
        (MIGRATION_MARKER_KEY, "true"),
    ]);
    let before = store.snapshot();

    let outcome = run_migration(Some(&store)).await.expect("migration");

    assert_eq!(outcome, MigrationOutcome::AlreadyMigrated);
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn unrelated_keys_are_untouched() {
    let store = MemoryStore::seeded(&[("cart", "two filters"), ("waterlife_categories", "x")]);

    run_migration(Some(&store)).await.expect("migration");

    let snapshot = store.snapshot();
    assert_eq!(
        snapshot.get("cart"),
        Some(&Value::String("two filters".to_string()))
    );
    assert!(!snapshot.contains_key("waterlife_categories"));
}

#[tokio::test]
async fn missing_store_is_a_silent_no_op() {
    let outcome = run_migration(None::<&MemoryStore>)
        .await
        .expect("no-op migration");
    assert_eq!(outcome, MigrationOutcome::Unavailable);
}

#[tokio::test]
async fn store_errors_propagate_to_the_caller() {
    let result = run_migration(Some(&BrokenStore)).await;
    assert!(matches!(result, Err(StoreError::Backend(_))));
}

#[test]
fn legacy_key_set_is_stable() {
    // These identifiers are a compatibility contract with deployed clients.
    assert_eq!(
        LEGACY_KEYS,
        [
            "waterlife_products",
            "waterlife_categories",
            "waterlife_manufacturers",
            "waterlife_auth_session",
            "waterlife_users",
        ]
    );
    assert_eq!(MIGRATION_MARKER_KEY, "waterlife_migrated_v2");
}
