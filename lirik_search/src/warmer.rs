//! Pre-computation of popular searches.

use std::collections::BTreeMap;

use tracing::info;

use crate::{
    normalizer::{NormalizedQuery, SearchParameters},
    service::{SearchError, SearchService},
};


/// Queries whose first result page is pre-computed on every warm-up.
pub const POPULAR_SEARCH_QUERIES: &[&str] = &[
    "kasih",
    "bapa",
    "kudus",
    "yesus",
    "above all",
    "allah itu baik",
];


/// Runs every query in `queries` (free-text, all languages, first page of 10)
/// and overwrites its cache entry, whether or not one already existed.
///
/// Returns each (trimmed) query mapped to its result count. Blank queries are skipped.
pub async fn warm_queries(
    search_service: &SearchService,
    queries: &[&str],
) -> Result<BTreeMap<String, usize>, SearchError> {
    let mut warmed_queries = BTreeMap::new();

    for raw_query in queries {
        let Some(query) = NormalizedQuery::new(raw_query) else {
            continue;
        };

        let query_string = query.as_str().to_string();
        let response = search_service
            .refresh(&SearchParameters::for_popular_query(query))
            .await?;

        warmed_queries.insert(query_string, response.len());
    }

    info!(
        warmed_query_count = warmed_queries.len(),
        "Warmed search cache."
    );

    Ok(warmed_queries)
}

/// [`warm_queries`] with [`POPULAR_SEARCH_QUERIES`].
pub async fn warm_popular_queries(
    search_service: &SearchService,
) -> Result<BTreeMap<String, usize>, SearchError> {
    warm_queries(search_service, POPULAR_SEARCH_QUERIES).await
}



#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lirik_core::api_models::SearchResponse;
    use lirik_database::entities::{NewSong, SongMutation};

    use super::*;
    use crate::{
        cache::ResultCache,
        normalizer::RawSearchParameters,
        store::{InMemoryKeyValueStore, KeyValueStore},
        testing::migrated_in_memory_pool,
    };

    #[tokio::test]
    async fn warms_and_overwrites_popular_queries() {
        let pool = migrated_in_memory_pool().await;
        {
            let mut connection = pool.acquire().await.unwrap();
            SongMutation::upsert(
                &mut connection,
                NewSong {
                    slug: "bapa-yang-kekal".to_string(),
                    title: "Bapa Yang Kekal".to_string(),
                    artist: None,
                    language: "id".to_string(),
                    body: "Bapa yang kekal, kudus namaMu".to_string(),
                },
            )
            .await
            .unwrap();
        }

        let store = Arc::new(InMemoryKeyValueStore::new(64));
        store
            .put(
                "search:bapa:10:0:all:f",
                serde_json::to_string(&SearchResponse::empty()).unwrap(),
                Some(300),
            )
            .await
            .unwrap();

        let service = SearchService::new(pool, ResultCache::new(store.clone()));

        let warmed = warm_popular_queries(&service).await.unwrap();

        assert_eq!(warmed.len(), POPULAR_SEARCH_QUERIES.len());
        assert_eq!(warmed["bapa"], 1);
        assert_eq!(warmed["kudus"], 1);
        assert_eq!(warmed["above all"], 0);

        // The stale empty entry was overwritten.
        let cached = service
            .search(&SearchParameters::from_raw(RawSearchParameters {
                query: Some("bapa"),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(service.cache().hits(), 1);
    }

    #[tokio::test]
    async fn skips_blank_queries() {
        let pool = migrated_in_memory_pool().await;
        let service = SearchService::new(pool, ResultCache::disabled());

        let warmed = warm_queries(&service, &["  ", "kasih"]).await.unwrap();

        assert_eq!(warmed.len(), 1);
        assert_eq!(warmed["kasih"], 0);
    }
}
