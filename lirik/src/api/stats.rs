use actix_web::http::header::{self, HeaderValue};
use actix_web::{get, HttpRequest};
use lirik_core::api_models::StatsResponse;
use lirik_database::entities::SongQuery;
use sha2::{Digest, Sha256};

use crate::api::errors::{EndpointError, EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;


const STATS_CACHE_CONTROL: &str = "public, max-age=60";

const LATEST_SONG_COUNT: u32 = 6;


/// Weak entity tag over the serialized response body.
fn weak_entity_tag(serialized_body: &[u8]) -> String {
    format!("W/\"{:x}\"", Sha256::digest(serialized_body))
}


/// Catalog statistics: the total song count and the six most recently updated songs.
///
/// The response carries a weak `ETag`; a matching `If-None-Match` yields `304 Not Modified`.
#[get("/stats")]
pub async fn get_stats(state: ApplicationState, request: HttpRequest) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;

    let total = SongQuery::count(&mut database_connection).await?;
    let latest = SongQuery::recently_updated(&mut database_connection, LATEST_SONG_COUNT)
        .await?
        .into_iter()
        .map(|song| song.into_stats_song())
        .collect();

    drop(database_connection);


    let serialized_body = serde_json::to_vec(&StatsResponse { total, latest })
        .map_err(EndpointError::internal_error)?;

    let entity_tag = weak_entity_tag(&serialized_body);
    let entity_tag_header_value =
        HeaderValue::from_str(&entity_tag).map_err(EndpointError::internal_error)?;

    let is_not_modified = request
        .headers()
        .get(header::IF_NONE_MATCH)
        .is_some_and(|if_none_match| *if_none_match == entity_tag_header_value);

    if is_not_modified {
        return EndpointResponseBuilder::not_modified()
            .with_header(header::ETAG, entity_tag_header_value)
            .with_cache_control(STATS_CACHE_CONTROL)
            .build();
    }

    EndpointResponseBuilder::ok()
        .with_header(header::ETAG, entity_tag_header_value)
        .with_cache_control(STATS_CACHE_CONTROL)
        .with_raw_body("application/json; charset=utf-8", serialized_body)
        .build()
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_tag_is_weak_sha256_hex() {
        let entity_tag = weak_entity_tag(b"{}");

        assert!(entity_tag.starts_with("W/\""));
        assert!(entity_tag.ends_with('"'));
        assert_eq!(entity_tag.len(), 3 + 64 + 1);
        assert_eq!(entity_tag, weak_entity_tag(b"{}"));
        assert_ne!(entity_tag, weak_entity_tag(b"{ }"));
    }
}
