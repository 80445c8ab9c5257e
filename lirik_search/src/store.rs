//! Key-value store abstraction and the in-process implementation.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    #[error("key-value store is unavailable: {}", .reason)]
    Unavailable { reason: String },

    #[error("key-value store operation timed out")]
    TimedOut,
}


/// Best-effort string key-value store with optional per-entry expiry.
///
/// Values may disappear at any time. A `time_to_live_seconds` of zero or less
/// makes the value expire immediately, `None` means it never expires.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    async fn put(
        &self,
        key: &str,
        value: String,
        time_to_live_seconds: Option<i64>,
    ) -> Result<(), KeyValueStoreError>;

    async fn delete(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

pub type SharedKeyValueStore = Arc<dyn KeyValueStore>;



#[derive(Clone, Debug)]
struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at
            .map(|expires_at| expires_at <= now)
            .unwrap_or(false)
    }
}


/// [`KeyValueStore`] kept in process memory.
///
/// Expired entries are dropped lazily on read, or in bulk once the store
/// reaches `max_entries`. If it is still full after that, the entry closest to
/// expiry is evicted. Entries without a time-to-live (view counters, audit entries)
/// are never evicted: once they alone fill the store, new expiring values are
/// dropped while new permanent ones are still stored.
pub struct InMemoryKeyValueStore {
    entries: DashMap<String, StoredValue>,
    max_entries: usize,
}

impl InMemoryKeyValueStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `false` if the store is full of entries that never expire.
    fn make_room_for_one_more(&self) -> bool {
        if self.entries.len() < self.max_entries {
            return true;
        }

        let now = Instant::now();
        self.entries.retain(|_, stored| !stored.is_expired(now));

        if self.entries.len() < self.max_entries {
            return true;
        }

        let evicted_key = self
            .entries
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .expires_at
                    .map(|expires_at| (expires_at, entry.key().clone()))
            })
            .min_by_key(|(expires_at, _)| *expires_at)
            .map(|(_, key)| key);

        match evicted_key {
            Some(evicted_key) => {
                self.entries.remove(&evicted_key);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for InMemoryKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyValueStore")
            .field("entries", &self.entries.len())
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let now = Instant::now();

        let Some(stored) = self.entries.get(key) else {
            return Ok(None);
        };

        if stored.is_expired(now) {
            drop(stored);
            self.entries
                .remove_if(key, |_, stored| stored.is_expired(now));

            return Ok(None);
        }

        Ok(Some(stored.value.clone()))
    }

    async fn put(
        &self,
        key: &str,
        value: String,
        time_to_live_seconds: Option<i64>,
    ) -> Result<(), KeyValueStoreError> {
        let expires_at = match time_to_live_seconds {
            None => None,
            Some(seconds) if seconds <= 0 => {
                self.entries.remove(key);
                return Ok(());
            }
            Some(seconds) => Some(Instant::now() + Duration::from_secs(seconds as u64)),
        };

        if !self.entries.contains_key(key)
            && !self.make_room_for_one_more()
            && expires_at.is_some()
        {
            return Ok(());
        }

        self.entries
            .insert(key.to_string(), StoredValue { value, expires_at });

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.entries.remove(key);

        Ok(())
    }
}
