use std::borrow::Cow;

use actix_web::{delete, get, post, web};
use lirik_core::api_models::{
    AdminAcknowledgementResponse,
    AdminSongsResponse,
    SongUpsertRequest,
    SongUpsertResponse,
    SongsErrorReason,
    UpsertedSong,
};
use lirik_core::language::DEFAULT_SONG_LANGUAGE;
use lirik_core::slug::slugify_or_generate;
use lirik_database::entities::{NewSong, SongMutation, SongQuery};
use lirik_database::IntoExternalModel;
use lirik_search::audit::AuditAction;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::errors::{parse_json_body, EndpointResponseBuilder, EndpointResult};
use crate::authentication::AdminAuthenticationExtractor;
use crate::state::ApplicationState;


const ADMIN_SONG_LIST_LIMIT: u32 = 200;


fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}


/// A validated upsert request.
#[derive(Debug, PartialEq, Eq)]
struct ValidatedSongUpsert {
    new_song: NewSong,
}

impl ValidatedSongUpsert {
    /// Checks that `title` and `body` are present and derives the slug:
    /// the explicit `slug` if given, otherwise the title, slugified either way.
    fn try_from_request(request: SongUpsertRequest) -> Result<Self, SongsErrorReason> {
        let title = non_blank(request.title.as_deref());
        let body = non_blank(request.body.as_deref());

        let mut missing_fields: Vec<Cow<'static, str>> = Vec::with_capacity(2);
        if title.is_none() {
            missing_fields.push("title".into());
        }
        if body.is_none() {
            missing_fields.push("body".into());
        }

        let (Some(title), Some(_)) = (title, body) else {
            return Err(SongsErrorReason::missing_fields(missing_fields));
        };

        let slug = match non_blank(request.slug.as_deref()) {
            Some(explicit_slug) => slugify_or_generate(explicit_slug),
            None => slugify_or_generate(title),
        };

        let language = non_blank(request.language.as_deref())
            .unwrap_or(DEFAULT_SONG_LANGUAGE.as_str())
            .to_string();

        Ok(Self {
            new_song: NewSong {
                slug,
                title: title.to_string(),
                artist: non_blank(request.artist.as_deref()).map(str::to_string),
                language,
                body: request.body.unwrap_or_default(),
            },
        })
    }
}



/// Lists the 200 most recently updated songs.
#[get("/songs")]
pub async fn list_songs(
    state: ApplicationState,
    authentication: AdminAuthenticationExtractor,
) -> EndpointResult {
    authentication.require_admin()?;

    let mut database_connection = state.acquire_database_connection().await?;

    let songs = SongQuery::recently_updated(&mut database_connection, ADMIN_SONG_LIST_LIMIT)
        .await?
        .into_iter()
        .map(IntoExternalModel::into_external_model)
        .collect();

    EndpointResponseBuilder::ok()
        .with_cache_control("no-store")
        .with_json_body(&AdminSongsResponse {
            ok: true,
            data: songs,
        })
        .build()
}


/// Creates a song, or updates the song with the same slug.
///
/// Cached search responses containing the song are invalidated afterwards.
#[post("/songs")]
pub async fn upsert_song(
    state: ApplicationState,
    authentication: AdminAuthenticationExtractor,
    body: web::Bytes,
) -> EndpointResult {
    authentication.require_admin()?;

    let request = parse_json_body::<SongUpsertRequest>(&body)?;

    let validated_request = match ValidatedSongUpsert::try_from_request(request) {
        Ok(validated_request) => validated_request,
        Err(reason) => {
            return EndpointResponseBuilder::bad_request()
                .with_error_reason(reason)
                .build();
        }
    };


    let mut database_connection = state.acquire_database_connection().await?;
    let upserted_song =
        SongMutation::upsert(&mut database_connection, validated_request.new_song).await?;
    drop(database_connection);

    let invalidated_keys = state.search.invalidate_song(&upserted_song.slug).await;

    info!(
        slug = %upserted_song.slug,
        invalidated_keys,
        "Upserted song."
    );

    state
        .audit_log
        .record(
            AuditAction::Upsert,
            Some(json!({ "slug": upserted_song.slug, "title": upserted_song.title })),
        )
        .await;


    EndpointResponseBuilder::ok()
        .with_json_body(&SongUpsertResponse {
            ok: true,
            data: UpsertedSong {
                slug: upserted_song.slug,
                title: upserted_song.title,
            },
        })
        .build()
}


#[derive(Deserialize)]
pub struct DeleteSongQueryParameters {
    slug: Option<String>,
}

/// Deletes the song with the given `slug` query parameter.
/// Deleting a song that doesn't exist still succeeds.
#[delete("/songs")]
pub async fn delete_song(
    state: ApplicationState,
    authentication: AdminAuthenticationExtractor,
    parameters: web::Query<DeleteSongQueryParameters>,
) -> EndpointResult {
    authentication.require_admin()?;

    let Some(slug) = non_blank(parameters.slug.as_deref()) else {
        return EndpointResponseBuilder::bad_request()
            .with_error_reason(SongsErrorReason::missing_slug())
            .build();
    };


    let mut database_connection = state.acquire_database_connection().await?;
    let was_deleted = SongMutation::delete_by_slug(&mut database_connection, slug).await?;
    drop(database_connection);

    let invalidated_keys = state.search.invalidate_song(slug).await;

    info!(
        slug = %slug,
        was_deleted,
        invalidated_keys,
        "Deleted song."
    );

    state
        .audit_log
        .record(AuditAction::Delete, Some(json!({ "slug": slug })))
        .await;


    EndpointResponseBuilder::ok()
        .with_json_body(&AdminAcknowledgementResponse::ok())
        .build()
}
