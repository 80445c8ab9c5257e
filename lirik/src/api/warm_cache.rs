use actix_web::route;
use lirik_core::api_models::WarmCacheResponse;
use lirik_search::warmer::warm_popular_queries;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::authentication::AdminAuthenticationExtractor;
use crate::state::ApplicationState;


/// Pre-computes the search responses of the popular query list.
///
/// Requires the admin token as a bearer token, unless no admin token is configured.
#[route("/warm-cache", method = "GET", method = "POST")]
pub async fn warm_search_cache(
    state: ApplicationState,
    authentication: AdminAuthenticationExtractor,
) -> EndpointResult {
    authentication.require_admin_bearer_if_configured()?;

    let warmed = warm_popular_queries(&state.search).await?;

    EndpointResponseBuilder::ok()
        .with_cache_control("no-store")
        .with_json_body(&WarmCacheResponse { ok: true, warmed })
        .build()
}
