use actix_web::post;
use lirik_core::api_models::AdminAcknowledgementResponse;
use lirik_database::entities::SongMutation;
use lirik_search::audit::AuditAction;
use tracing::info;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::authentication::AdminAuthenticationExtractor;
use crate::state::ApplicationState;


/// Rebuilds the full-text index from the song table.
#[post("/reindex")]
pub async fn rebuild_search_index(
    state: ApplicationState,
    authentication: AdminAuthenticationExtractor,
) -> EndpointResult {
    authentication.require_admin()?;

    let mut database_connection = state.acquire_database_connection().await?;
    SongMutation::rebuild_search_index(&mut database_connection).await?;
    drop(database_connection);

    info!("Rebuilt full-text search index.");

    state.audit_log.record(AuditAction::Reindex, None).await;

    EndpointResponseBuilder::ok()
        .with_json_body(&AdminAcknowledgementResponse::ok())
        .build()
}
