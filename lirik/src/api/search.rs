use actix_web::{get, web};
use lirik_search::normalizer::{RawSearchParameters, SearchParameters};
use serde::Deserialize;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;


pub const SEARCH_CACHE_CONTROL: &str = "public, max-age=60";


/// Query string of `GET /api/search`. Every value is kept as text
/// and interpreted leniently by [`SearchParameters::from_raw`].
#[derive(Deserialize, Debug, Default)]
pub struct SearchQueryParameters {
    q: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
    lang: Option<String>,
    #[serde(rename = "titleOnly")]
    title_only: Option<String>,
}

impl SearchQueryParameters {
    fn to_search_parameters(&self) -> SearchParameters {
        SearchParameters::from_raw(RawSearchParameters {
            query: self.q.as_deref(),
            limit: self.limit.as_deref(),
            offset: self.offset.as_deref(),
            language: self.lang.as_deref(),
            title_only: self.title_only.as_deref(),
        })
    }
}


/// Full-text song search.
///
/// # Query parameters
/// - `q`: search text; blank returns `{ "results": [] }`.
/// - `limit`: `1..=50`, default `10`.
/// - `offset`: default `0`.
/// - `lang`: `all`, `id` or `en`, default `all`.
/// - `titleOnly`: `1` restricts matching to song titles.
///
/// Responses are cached for five minutes; admin edits to a song invalidate
/// the cached responses that contain it.
#[get("/search")]
pub async fn search_songs(
    state: ApplicationState,
    parameters: web::Query<SearchQueryParameters>,
) -> EndpointResult {
    let search_parameters = parameters.to_search_parameters();

    let response = state.search.search(&search_parameters).await?;

    EndpointResponseBuilder::ok()
        .with_cache_control(SEARCH_CACHE_CONTROL)
        .with_json_body(&response)
        .build()
}
