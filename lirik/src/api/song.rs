use actix_web::{get, web};
use lirik_core::api_models::{SongDetails, SongResponse, SongsErrorReason};
use lirik_database::entities::{SongModel, SongQuery};

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;


const SONG_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=86400";


/// Turns every run of two or more horizontal whitespace characters into a line break,
/// then trims the result. Lyrics pasted from single-line sources keep their verse breaks this way.
fn normalize_song_body(body: &str) -> String {
    let mut normalized = String::with_capacity(body.len());
    let mut pending_whitespace = String::new();

    let flush = |normalized: &mut String, pending_whitespace: &mut String| {
        if pending_whitespace.chars().count() >= 2 {
            normalized.push('\n');
        } else {
            normalized.push_str(pending_whitespace);
        }

        pending_whitespace.clear();
    };

    for character in body.chars() {
        if character.is_whitespace() && character != '\n' && character != '\r' {
            pending_whitespace.push(character);
        } else {
            flush(&mut normalized, &mut pending_whitespace);
            normalized.push(character);
        }
    }

    flush(&mut normalized, &mut pending_whitespace);

    normalized.trim().to_string()
}

fn song_details_from_model(song: SongModel) -> SongDetails {
    SongDetails {
        id: song.id,
        body: normalize_song_body(&song.body),
        slug: song.slug,
        title: song.title,
        artist: song.artist,
        language: song.language,
        created_at: song.created_at,
        updated_at: song.updated_at,
    }
}


/// Returns a single song along with its (sampled) view count.
/// Every successful read is counted as a view.
#[get("/song/{slug}")]
pub async fn get_song(state: ApplicationState, slug: web::Path<String>) -> EndpointResult {
    let slug = slug.into_inner();

    let mut database_connection = state.acquire_database_connection().await?;
    let song = SongQuery::get_by_slug(&mut database_connection, &slug).await?;
    drop(database_connection);

    let Some(song) = song else {
        return EndpointResponseBuilder::not_found()
            .with_error_reason(SongsErrorReason::song_not_found())
            .build();
    };

    let views = state.views.record_view(&slug).await;

    EndpointResponseBuilder::ok()
        .with_cache_control(SONG_CACHE_CONTROL)
        .with_json_body(&SongResponse {
            song: song_details_from_model(song),
            views,
        })
        .build()
}
