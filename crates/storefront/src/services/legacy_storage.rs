//! One-time cleanup of the retired client-storage scheme.
//!
//! Early WaterLife kept catalog caches and authentication state in
//! client-local storage. Those records moved to Postgres; the keys they
//! lived under are retired and must be removed from every returning
//! visitor's store exactly once.
//!
//! The cleanup is keyed on a marker entry: once [`MIGRATION_MARKER_KEY`] is
//! present the migrator never touches the store again, so it is safe to run
//! on every startup. Two visitors racing (e.g. two tabs) can at most repeat
//! a delete-if-present, which is harmless.
//!
//! The storage capability is injected via [`ClientStore`] so the migrator
//! does not care whether the backing store is the visitor's session or an
//! in-memory map in tests.

use serde_json::Value;
use thiserror::Error;
use tower_sessions::Session;

/// Marker key set after a successful cleanup run.
///
/// Once written it is never removed by this module; its absence is the only
/// trigger for cleanup.
pub const MIGRATION_MARKER_KEY: &str = "waterlife_migrated_v2";

/// Keys from the retired storage scheme.
///
/// Stable identifiers - renaming any of these requires a compatibility plan
/// for stores that still hold the old entries.
pub const LEGACY_KEYS: [&str; 5] = [
    "waterlife_products",
    "waterlife_categories",
    "waterlife_manufacturers",
    "waterlife_auth_session",
    "waterlife_users",
];

/// Errors from the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The session backend failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Any other storage backend failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A client-scoped key-value storage capability.
///
/// `remove` reports whether the key was present so the migrator can count
/// what it actually deleted.
#[allow(async_fn_in_trait)]
pub trait ClientStore {
    /// Fetch the raw value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`.
    async fn insert(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`, returning whether it was present.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// Result of a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No client store was available; nothing was read or written.
    Unavailable,
    /// The marker was already set; no other key was touched.
    AlreadyMigrated,
    /// Cleanup ran: `removed` legacy keys were deleted and the marker set.
    Cleaned {
        /// Number of legacy keys that were present and removed.
        removed: usize,
    },
}

/// Run the one-time legacy-storage cleanup.
///
/// Callers pass `None` when the current context has no client store (e.g. a
/// request that never touched the session layer); that is a silent no-op,
/// not an error. Calling again after a completed run is always a no-op.
///
/// # Errors
///
/// Returns [`StoreError`] if the backing store fails. Callers at the request
/// boundary log and discard the error; it must never fail the caller's flow.
pub async fn run_migration<S: ClientStore>(
    store: Option<&S>,
) -> Result<MigrationOutcome, StoreError> {
    let Some(store) = store else {
        return Ok(MigrationOutcome::Unavailable);
    };

    if store.get(MIGRATION_MARKER_KEY).await?.is_some() {
        return Ok(MigrationOutcome::AlreadyMigrated);
    }

    let mut removed = 0usize;
    for key in LEGACY_KEYS {
        if store.remove(key).await? {
            removed += 1;
        }
    }

    store.insert(MIGRATION_MARKER_KEY, Value::Bool(true)).await?;

    if removed > 0 {
        tracing::info!(removed, "removed legacy client storage keys");
    } else {
        tracing::debug!("legacy client storage already clean");
    }

    Ok(MigrationOutcome::Cleaned { removed })
}

/// [`ClientStore`] backed by the visitor's session.
///
/// The session is the client-local persisted store of this architecture:
/// per-visitor, durable across requests, and invisible to other visitors.
pub struct SessionStore<'a> {
    session: &'a Session,
}

impl<'a> SessionStore<'a> {
    /// Wrap a session handle.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl ClientStore for SessionStore<'_> {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.session.get::<Value>(key).await?)
    }

    async fn insert(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.session.insert(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.session.remove::<Value>(key).await?.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory store for exercising the migrator without a session backend.
    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, Value>>,
    }

    impl MemoryStore {
        fn with_keys(keys: &[&str]) -> Self {
            let store = Self::default();
            {
                let mut entries = store.entries.lock().unwrap();
                for key in keys {
                    entries.insert((*key).to_owned(), Value::String("cached".into()));
                }
            }
            store
        }

        fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    impl ClientStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn insert(&self, key: &str, value: Value) -> Result<(), StoreError> {
            self.entries.lock().unwrap().insert(key.to_owned(), value);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<bool, StoreError> {
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }
    }

    #[tokio::test]
    async fn test_removes_all_legacy_keys_and_sets_marker() {
        let store = MemoryStore::with_keys(&LEGACY_KEYS);

        let outcome = run_migration(Some(&store)).await.unwrap();

        assert_eq!(outcome, MigrationOutcome::Cleaned { removed: 5 });
        for key in LEGACY_KEYS {
            assert!(!store.contains(key));
        }
        assert_eq!(
            store.get(MIGRATION_MARKER_KEY).await.unwrap(),
            Some(Value::Bool(true))
        );
    }

    #[tokio::test]
    async fn test_counts_only_keys_that_were_present() {
        let store = MemoryStore::with_keys(&["waterlife_products"]);

        let outcome = run_migration(Some(&store)).await.unwrap();

        assert_eq!(outcome, MigrationOutcome::Cleaned { removed: 1 });
        assert!(!store.contains("waterlife_products"));
        assert!(store.contains(MIGRATION_MARKER_KEY));
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let store = MemoryStore::with_keys(&LEGACY_KEYS);

        run_migration(Some(&store)).await.unwrap();
        let second = run_migration(Some(&store)).await.unwrap();

        assert_eq!(second, MigrationOutcome::AlreadyMigrated);
        // Only the marker remains, untouched by the second call.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_marker_present_leaves_other_keys_alone() {
        let store = MemoryStore::with_keys(&["waterlife_products"]);
        store
            .insert(MIGRATION_MARKER_KEY, Value::Bool(true))
            .await
            .unwrap();

        let outcome = run_migration(Some(&store)).await.unwrap();

        assert_eq!(outcome, MigrationOutcome::AlreadyMigrated);
        assert!(store.contains("waterlife_products"));
    }

    #[tokio::test]
    async fn test_clean_store_still_sets_marker() {
        let store = MemoryStore::default();

        let outcome = run_migration(Some(&store)).await.unwrap();

        assert_eq!(outcome, MigrationOutcome::Cleaned { removed: 0 });
        assert!(store.contains(MIGRATION_MARKER_KEY));
    }

    #[tokio::test]
    async fn test_no_store_is_a_no_op() {
        let outcome = run_migration(None::<&MemoryStore>).await.unwrap();
        assert_eq!(outcome, MigrationOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_unrelated_keys_survive_cleanup() {
        let store = MemoryStore::default();
        store
            .insert("cart", Value::String("kept".into()))
            .await
            .unwrap();

        run_migration(Some(&store)).await.unwrap();

        assert!(store.contains("cart"));
    }
}
