//! The search path: normalize, look up the cache, query the index, cache the result.

use lirik_core::api_models::SearchResponse;
use lirik_database::{
    entities::{is_invalid_match_expression_error, SongSearchParameters, SongSearchQuery},
    IntoExternalModel,
    QueryError,
};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

use crate::{
    cache::ResultCache,
    cache_key::search_cache_key,
    normalizer::{NormalizedQuery, SearchParameters},
};


#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to acquire database connection")]
    UnableToAcquireDatabaseConnection {
        #[source]
        error: sqlx::Error,
    },

    #[error("full-text query failed")]
    QueryFailed {
        #[from]
        #[source]
        error: QueryError,
    },
}


pub struct SearchService {
    database_pool: SqlitePool,
    cache: ResultCache,
}

impl SearchService {
    pub fn new(database_pool: SqlitePool, cache: ResultCache) -> Self {
        Self {
            database_pool,
            cache,
        }
    }

    #[inline]
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Answers a search request.
    ///
    /// A blank query yields an empty response without touching the cache or the database.
    /// A query the full-text index can't parse also yields an empty response, which is not cached.
    /// Otherwise a cached response is returned if present; if not, the index is queried
    /// and the response is cached before being returned.
    pub async fn search(&self, parameters: &SearchParameters) -> Result<SearchResponse, SearchError> {
        let Some(query) = parameters.query.as_ref() else {
            return Ok(SearchResponse::empty());
        };

        let cache_key = search_cache_key(
            query,
            parameters.limit,
            parameters.offset,
            parameters.language.as_str(),
            parameters.title_only,
        );

        if let Some(cached_response) = self.cache.get(&cache_key).await {
            return Ok(cached_response);
        }

        self.query_and_cache(query, parameters, &cache_key).await
    }

    /// Runs the live query and unconditionally overwrites the cached response.
    pub(crate) async fn refresh(
        &self,
        parameters: &SearchParameters,
    ) -> Result<SearchResponse, SearchError> {
        let Some(query) = parameters.query.as_ref() else {
            return Ok(SearchResponse::empty());
        };

        let cache_key = search_cache_key(
            query,
            parameters.limit,
            parameters.offset,
            parameters.language.as_str(),
            parameters.title_only,
        );

        self.query_and_cache(query, parameters, &cache_key).await
    }

    async fn query_and_cache(
        &self,
        query: &NormalizedQuery,
        parameters: &SearchParameters,
        cache_key: &str,
    ) -> Result<SearchResponse, SearchError> {
        let mut database_connection = self
            .database_pool
            .acquire()
            .await
            .map_err(|error| SearchError::UnableToAcquireDatabaseConnection { error })?;

        let search_result = SongSearchQuery::search(
            &mut database_connection,
            SongSearchParameters {
                match_expression: query.match_expression(parameters.title_only),
                language: parameters.language.language(),
                limit: parameters.limit,
                offset: parameters.offset,
            },
        )
        .await;

        drop(database_connection);

        let hits = match search_result {
            Ok(hits) => hits,
            Err(error) if is_invalid_match_expression_error(&error) => {
                debug!(
                    query = query.as_str(),
                    error = ?error,
                    "Full-text index rejected the query, returning no results."
                );

                return Ok(SearchResponse::empty());
            }
            Err(error) => return Err(error.into()),
        };

        let response = SearchResponse {
            results: hits
                .into_iter()
                .map(IntoExternalModel::into_external_model)
                .collect(),
        };

        debug!(
            cache_key,
            result_count = response.len(),
            "Executed live search query."
        );

        self.cache.put(cache_key, &response).await;

        Ok(response)
    }

    /// Drops cached search responses that contain the given song.
    pub async fn invalidate_song(&self, slug: &str) -> usize {
        self.cache.invalidate_song(slug).await
    }
}
