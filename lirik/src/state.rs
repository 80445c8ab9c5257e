//! Application-wide state (shared between endpoint functions).

use std::sync::Arc;

use actix_web::web::Data;
use lirik_configuration::Configuration;
use lirik_search::{
    audit::AuditLog,
    cache::ResultCache,
    service::SearchService,
    store::{InMemoryKeyValueStore, SharedKeyValueStore},
    views::{ViewCounterSampler, DEFAULT_VIEW_SAMPLE_RATE},
};
use sqlx::{pool::PoolConnection, Sqlite, SqlitePool};
use tracing::info;



pub struct ApplicationStateInner {
    pub configuration: Configuration,

    pub database_pool: SqlitePool,

    /// Cached full-text search over the song catalog.
    pub search: SearchService,

    /// Sampled per-song view counters (shares the cache store).
    pub views: ViewCounterSampler,

    pub audit_log: AuditLog,
}

impl ApplicationStateInner {
    /// Builds the state around an already established pool.
    ///
    /// The key-value stores are in-memory: one shared by the search cache and
    /// the view counters, and a separate one for the audit log.
    pub fn new(configuration: Configuration, database_pool: SqlitePool) -> Self {
        let cache_store: Option<SharedKeyValueStore> = if configuration.cache.enabled {
            Some(Arc::new(InMemoryKeyValueStore::new(
                configuration.cache.max_entries,
            )))
        } else {
            None
        };

        let audit_store: Option<SharedKeyValueStore> = if configuration.cache.audit_log_enabled {
            Some(Arc::new(InMemoryKeyValueStore::new(
                configuration.cache.max_entries,
            )))
        } else {
            None
        };

        info!(
            cache_enabled = cache_store.is_some(),
            audit_log_enabled = audit_store.is_some(),
            "Key-value stores initialized."
        );

        let result_cache = match cache_store.as_ref() {
            Some(store) => ResultCache::new(store.clone()),
            None => ResultCache::disabled(),
        };

        Self {
            search: SearchService::new(database_pool.clone(), result_cache),
            views: ViewCounterSampler::new(cache_store, DEFAULT_VIEW_SAMPLE_RATE),
            audit_log: AuditLog::new(audit_store),
            configuration,
            database_pool,
        }
    }

    #[inline]
    pub async fn acquire_database_connection(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.database_pool.acquire().await
    }

    #[inline]
    pub fn admin_token(&self) -> Option<&str> {
        self.configuration.admin.token.as_deref()
    }
}


/// Application-wide state, wrapped in [`Data`] so actix can hand it to every handler.
pub type ApplicationState = Data<ApplicationStateInner>;
