use actix_web::get;
use chrono::Utc;
use lirik_core::api_models::HealthResponse;
use tracing::error;

use crate::api::errors::{EndpointResponseBuilder, EndpointResult};
use crate::state::ApplicationState;


/// Liveness check: succeeds if the database answers `SELECT 1`.
#[get("/health")]
pub async fn health_check(state: ApplicationState) -> EndpointResult {
    let ping_result = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.database_pool)
        .await;

    match ping_result {
        Ok(_) => EndpointResponseBuilder::ok()
            .with_cache_control("no-store")
            .with_json_body(&HealthResponse::healthy(
                Utc::now().timestamp_millis(),
            ))
            .build(),
        Err(ping_error) => {
            error!(error = %ping_error, "Health check database ping failed.");

            EndpointResponseBuilder::internal_server_error()
                .with_cache_control("no-store")
                .with_json_body(&HealthResponse::unhealthy("db_error"))
                .build()
        }
    }
}
