//! Key-value store key layout.

use crate::normalizer::{NormalizedQuery, SearchParameters};


/// Builds the cache key of a search: `search:<query>:<limit>:<offset>:<language>:<t|f>`.
///
/// Every field after the query has a fixed shape (no `:` inside), so two different
/// parameter sets can never produce the same key, even if the query itself contains `:`.
pub fn search_cache_key(
    query: &NormalizedQuery,
    limit: u32,
    offset: u32,
    language: &str,
    title_only: bool,
) -> String {
    format!(
        "search:{}:{}:{}:{}:{}",
        query.as_str(),
        limit,
        offset,
        language,
        if title_only { 't' } else { 'f' }
    )
}

/// Cache key for the given parameters, or `None` for a blank query.
pub fn search_cache_key_for_parameters(parameters: &SearchParameters) -> Option<String> {
    let query = parameters.query.as_ref()?;

    Some(search_cache_key(
        query,
        parameters.limit,
        parameters.offset,
        parameters.language.as_str(),
        parameters.title_only,
    ))
}


/// Per-song key that admin mutations have always deleted.
/// No search response is stored under it anymore, but it is still cleared.
pub fn legacy_song_search_key(slug: &str) -> String {
    format!("search:{slug}")
}

/// Key of the list of search cache keys whose cached response contains the song.
pub fn song_search_key_index_key(slug: &str) -> String {
    format!("search-keys:{slug}")
}

/// Key of the sampled view counter of a song.
pub fn view_counter_key(slug: &str) -> String {
    format!("pv:{slug}")
}
