use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::header::{self, HeaderValue};
use actix_web::post;
use lirik_core::api_models::AdminAcknowledgementResponse;
use lirik_search::audit::AuditAction;

use crate::api::errors::{EndpointError, EndpointResponseBuilder, EndpointResult};
use crate::authentication::{AdminAuthenticationExtractor, ADMIN_TOKEN_COOKIE_NAME};
use crate::state::ApplicationState;


const ADMIN_SESSION_DURATION_HOURS: i64 = 12;


fn admin_session_cookie(token: &str) -> Cookie<'_> {
    Cookie::build(ADMIN_TOKEN_COOKIE_NAME, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::hours(ADMIN_SESSION_DURATION_HOURS))
        .secure(!cfg!(debug_assertions))
        .finish()
}


/// Exchanges a bearer admin token for an `admin_token` cookie (valid for 12 hours),
/// so browser-based admin tools don't need to attach the header to every request.
#[post("/session")]
pub async fn create_admin_session(
    state: ApplicationState,
    authentication: AdminAuthenticationExtractor,
) -> EndpointResult {
    authentication.require_admin_bearer()?;

    let Some(token) = authentication.bearer_token() else {
        return Err(EndpointError::missing_authentication());
    };

    let cookie_header_value = HeaderValue::from_str(&admin_session_cookie(token).to_string())
        .map_err(EndpointError::internal_error)?;

    state.audit_log.record(AuditAction::Session, None).await;

    EndpointResponseBuilder::ok()
        .with_header(header::SET_COOKIE, cookie_header_value)
        .with_cache_control("no-store")
        .with_json_body(&AdminAcknowledgementResponse::ok())
        .build()
}
