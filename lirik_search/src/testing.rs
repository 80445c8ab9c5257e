use async_trait::async_trait;

use crate::store::{KeyValueStore, KeyValueStoreError};


/// A store whose every operation fails.
pub(crate) struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Err(KeyValueStoreError::TimedOut)
    }

    async fn put(
        &self,
        _key: &str,
        _value: String,
        _time_to_live_seconds: Option<i64>,
    ) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::Unavailable {
            reason: "offline".to_string(),
        })
    }

    async fn delete(&self, _key: &str) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::TimedOut)
    }
}


/// An in-memory database with the full schema applied.
pub(crate) async fn migrated_in_memory_pool() -> sqlx::SqlitePool {
    let pool = lirik_database::connection::establish_in_memory_database_connection_pool()
        .await
        .unwrap();

    let mut connection = pool.acquire().await.unwrap();
    lirik_database::migrations::apply_pending_migrations(&mut connection)
        .await
        .unwrap();
    drop(connection);

    pool
}

/// A pool that never connects; any attempt to use it fails.
pub(crate) fn lazy_unreachable_pool() -> sqlx::SqlitePool {
    sqlx::sqlite::SqlitePoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(50))
        .connect_lazy("sqlite:///nonexistent-directory/never-created.sqlite3")
        .unwrap()
}
