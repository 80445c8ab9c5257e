//! Admin authentication.
//!
//! Administrative endpoints are protected by a single shared secret (`admin.token`).
//! Callers can present it as a `Bearer` token in the `Authorization` header,
//! as a `token` query parameter or through the `admin_token` cookie set by
//! `POST /api/admin/session`.

use actix_utils::future::{self, Ready};
use actix_web::dev::Payload;
use actix_web::http::{header, StatusCode};
use actix_web::web::{Data, Query};
use actix_web::{FromRequest, HttpRequest};
use serde::Deserialize;
use tracing::{debug, error};

use crate::api::errors::EndpointError;
use crate::state::ApplicationStateInner;


/// Name of the cookie holding the admin token.
pub const ADMIN_TOKEN_COOKIE_NAME: &str = "admin_token";


#[derive(Deserialize)]
struct TokenQueryParameters {
    token: Option<String>,
}


/// Admin token as presented by the caller, per source.
#[derive(Default, Debug, Clone)]
struct PresentedAdminTokens {
    bearer: Option<String>,
    query: Option<String>,
    cookie: Option<String>,
}

impl PresentedAdminTokens {
    fn from_request(request: &HttpRequest) -> Self {
        let bearer = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(strip_bearer_prefix)
            .and_then(non_blank);

        let query = Query::<TokenQueryParameters>::from_query(request.query_string())
            .ok()
            .and_then(|parameters| parameters.into_inner().token)
            .and_then(|token| non_blank(&token));

        let cookie = request
            .cookie(ADMIN_TOKEN_COOKIE_NAME)
            .and_then(|cookie| non_blank(cookie.value()));

        Self {
            bearer,
            query,
            cookie,
        }
    }

    /// First presented token, in order: header, query parameter, cookie.
    fn any(&self) -> Option<&str> {
        self.bearer
            .as_deref()
            .or(self.query.as_deref())
            .or(self.cookie.as_deref())
    }
}

fn strip_bearer_prefix(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(char::is_whitespace)?;

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token)
    } else {
        None
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Compares tokens without short-circuiting on the first differing byte.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();

    if presented.len() != expected.len() {
        return false;
    }

    presented
        .iter()
        .zip(expected)
        .fold(0u8, |difference, (left, right)| difference | (left ^ right))
        == 0
}



/// Admin authentication extractor.
///
/// **Holding this struct doesn't mean the caller is an administrator!**
/// Call one of the `require_*` methods inside the handler; they return an
/// [`EndpointError`] (`401 Unauthorized`) that can be propagated with `?`.
pub struct AdminAuthenticationExtractor {
    configured_token: Option<String>,
    presented: PresentedAdminTokens,
}

impl AdminAuthenticationExtractor {
    fn check(&self, presented_token: Option<&str>) -> Result<(), EndpointError> {
        let Some(expected_token) = self.configured_token.as_deref() else {
            return Err(EndpointError::admin_token_not_configured());
        };

        match presented_token {
            Some(token) if tokens_match(token, expected_token) => Ok(()),
            _ => {
                debug!("Rejected request with missing or invalid admin token.");
                Err(EndpointError::missing_authentication())
            }
        }
    }

    /// Requires a valid admin token from any source.
    /// Fails if the server has no admin token configured.
    pub fn require_admin(&self) -> Result<(), EndpointError> {
        self.check(self.presented.any())
    }

    /// Requires a valid admin token in the `Authorization` header.
    /// Fails if the server has no admin token configured.
    pub fn require_admin_bearer(&self) -> Result<(), EndpointError> {
        self.check(self.presented.bearer.as_deref())
    }

    /// Requires a valid admin token in the `Authorization` header,
    /// but only if the server has one configured.
    pub fn require_admin_bearer_if_configured(&self) -> Result<(), EndpointError> {
        if self.configured_token.is_none() {
            return Ok(());
        }

        self.require_admin_bearer()
    }

    /// The bearer token presented by the caller, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.presented.bearer.as_deref()
    }
}

impl FromRequest for AdminAuthenticationExtractor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let configured_token = match req.app_data::<Data<ApplicationStateInner>>() {
            Some(state) => state.admin_token().map(str::to_string),
            None => {
                error!("BUG: No application state injected, all `AdminAuthenticationExtractor`s will fail!");

                return future::err(
                    actix_web::error::InternalError::new(
                        "Missing application state.",
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )
                    .into(),
                );
            }
        };

        future::ok(Self {
            configured_token,
            presented: PresentedAdminTokens::from_request(req),
        })
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(configured: Option<&str>, presented: PresentedAdminTokens) -> AdminAuthenticationExtractor {
        AdminAuthenticationExtractor {
            configured_token: configured.map(str::to_string),
            presented,
        }
    }

    #[test]
    fn parses_bearer_header_case_insensitively() {
        assert_eq!(strip_bearer_prefix("Bearer abc"), Some("abc"));
        assert_eq!(strip_bearer_prefix("bearer   abc"), Some("  abc"));
        assert_eq!(strip_bearer_prefix("Basic abc"), None);
        assert_eq!(strip_bearer_prefix("Bearer"), None);
    }

    #[test]
    fn compares_tokens_exactly() {
        assert!(tokens_match("secret", "secret"));
        assert!(!tokens_match("secret", "secreT"));
        assert!(!tokens_match("secret", "secret2"));
    }

    #[test]
    fn strict_checks_reject_when_no_token_is_configured() {
        let auth = extractor(
            None,
            PresentedAdminTokens {
                bearer: Some("anything".into()),
                ..Default::default()
            },
        );

        assert!(matches!(
            auth.require_admin(),
            Err(EndpointError::AdminTokenNotConfigured)
        ));
        assert!(auth.require_admin_bearer_if_configured().is_ok());
    }

    #[test]
    fn accepts_token_from_cookie_or_query() {
        let from_cookie = extractor(
            Some("secret"),
            PresentedAdminTokens {
                cookie: Some("secret".into()),
                ..Default::default()
            },
        );
        assert!(from_cookie.require_admin().is_ok());
        assert!(from_cookie.require_admin_bearer().is_err());

        let from_query = extractor(
            Some("secret"),
            PresentedAdminTokens {
                query: Some("secret".into()),
                ..Default::default()
            },
        );
        assert!(from_query.require_admin().is_ok());
    }

    #[test]
    fn rejects_wrong_token() {
        let auth = extractor(
            Some("secret"),
            PresentedAdminTokens {
                bearer: Some("nope".into()),
                ..Default::default()
            },
        );

        assert!(matches!(
            auth.require_admin(),
            Err(EndpointError::MissingAuthentication)
        ));
        assert!(auth.require_admin_bearer_if_configured().is_err());
    }
}
