//! Search result cache on top of a [`KeyValueStore`].
//!
//! Every operation is best-effort: store errors and undecodable values are logged
//! and treated as a cache miss (or a skipped write), never as a request failure.

use std::sync::atomic::{AtomicU64, Ordering};

use lirik_core::api_models::SearchResponse;
use tracing::{debug, warn};

use crate::{
    cache_key::{legacy_song_search_key, song_search_key_index_key},
    store::SharedKeyValueStore,
};


/// How long a cached search response stays valid. Reads don't extend it.
pub const SEARCH_RESULT_TIME_TO_LIVE_SECONDS: i64 = 300;

/// Upper bound on how many search keys are remembered per song.
const MAXIMUM_INDEXED_KEYS_PER_SONG: usize = 256;


pub struct ResultCache {
    store: Option<SharedKeyValueStore>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new(store: SharedKeyValueStore) -> Self {
        Self {
            store: Some(store),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A cache that never stores anything (every lookup is a miss).
    pub fn disabled() -> Self {
        Self {
            store: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }


    pub async fn get(&self, cache_key: &str) -> Option<SearchResponse> {
        let store = self.store.as_ref()?;

        let cached_value = match store.get(cache_key).await {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    error = %error,
                    cache_key,
                    "Failed to read from search cache, falling back to a live query."
                );
                None
            }
        };

        let cached_response = cached_value.and_then(|value| {
            match serde_json::from_str::<SearchResponse>(&value) {
                Ok(response) => Some(response),
                Err(error) => {
                    warn!(
                        error = %error,
                        cache_key,
                        "Ignoring undecodable cached search response."
                    );
                    None
                }
            }
        });

        if cached_response.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(cache_key, "Search cache hit.");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(cache_key, "Search cache miss.");
        }

        cached_response
    }

    /// Stores a response (overwriting any previous one) and records the key
    /// under every song contained in the response, for later invalidation.
    pub async fn put(&self, cache_key: &str, response: &SearchResponse) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let serialized_response = match serde_json::to_string(response) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(error = %error, cache_key, "Failed to serialize search response.");
                return;
            }
        };

        if let Err(error) = store
            .put(
                cache_key,
                serialized_response,
                Some(SEARCH_RESULT_TIME_TO_LIVE_SECONDS),
            )
            .await
        {
            warn!(error = %error, cache_key, "Failed to write to search cache.");
            return;
        }

        for result in &response.results {
            self.remember_key_for_song(&result.slug, cache_key).await;
        }
    }

    async fn read_song_key_index(&self, slug: &str) -> Vec<String> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };

        match store.get(&song_search_key_index_key(slug)).await {
            Ok(Some(value)) => serde_json::from_str::<Vec<String>>(&value).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(error = %error, slug, "Failed to read search key index of song.");
                Vec::new()
            }
        }
    }

    async fn remember_key_for_song(&self, slug: &str, cache_key: &str) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let mut indexed_keys = self.read_song_key_index(slug).await;
        if indexed_keys.iter().any(|key| key == cache_key) {
            return;
        }

        indexed_keys.push(cache_key.to_string());
        if indexed_keys.len() > MAXIMUM_INDEXED_KEYS_PER_SONG {
            let excess = indexed_keys.len() - MAXIMUM_INDEXED_KEYS_PER_SONG;
            indexed_keys.drain(..excess);
        }

        let serialized_keys = match serde_json::to_string(&indexed_keys) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(error = %error, slug, "Failed to serialize search key index.");
                return;
            }
        };

        // Indexed keys outlive their responses by at most one TTL.
        if let Err(error) = store
            .put(
                &song_search_key_index_key(slug),
                serialized_keys,
                Some(SEARCH_RESULT_TIME_TO_LIVE_SECONDS),
            )
            .await
        {
            warn!(error = %error, slug, "Failed to update search key index of song.");
        }
    }

    async fn delete_quietly(&self, key: &str) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        if let Err(error) = store.delete(key).await {
            warn!(error = %error, key, "Failed to delete key from search cache.");
        }
    }

    /// Drops every cached search response known to contain the song,
    /// as well as the legacy per-song key.
    ///
    /// Responses that didn't contain the song (e.g. a song created after
    /// they were cached) are not touched and expire with their TTL.
    pub async fn invalidate_song(&self, slug: &str) -> usize {
        if self.store.is_none() {
            return 0;
        }

        let indexed_keys = self.read_song_key_index(slug).await;

        for cache_key in &indexed_keys {
            self.delete_quietly(cache_key).await;
        }

        self.delete_quietly(&song_search_key_index_key(slug))
            .await;
        self.delete_quietly(&legacy_song_search_key(slug)).await;

        debug!(
            slug,
            invalidated_responses = indexed_keys.len(),
            "Invalidated cached search responses of song."
        );

        indexed_keys.len()
    }
}
