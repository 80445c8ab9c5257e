//! Endpoint errors and the response builder used by every handler.

use std::fmt::{Display, Formatter};

use actix_web::body::BoxBody;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use lirik_core::api_models::{
    ErrorReason,
    ErrorReasonName,
    InvalidJsonBodyReason,
    ResponseWithErrorReason,
};
use lirik_database::QueryError;
use lirik_search::service::SearchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::error;



/// Reason text sent in place of internal error details in release builds.
const GENERIC_INTERNAL_ERROR_REASON: &str = "Internal server error.";



/// General-purpose endpoint error type.
///
/// Client errors carry an [`ErrorReason`] in the response body.
/// Internal errors always become `500 Internal Server Error`; their details are
/// logged and, in debug builds only, included in the response body.
#[derive(Debug, Error)]
pub enum EndpointError {
    /*
     * Client errors.
     */
    /// The caller did not present a valid admin token.
    MissingAuthentication,

    /// The endpoint requires an admin token, but the server has none configured.
    AdminTokenNotConfigured,

    MissingJsonBody,

    InvalidJsonBody {
        reason: InvalidJsonBodyReason,
    },

    /*
     * Server errors.
     */
    InternalGenericError {
        #[source]
        error: Box<dyn std::error::Error>,
    },

    InternalDatabaseError {
        #[from]
        #[source]
        error: sqlx::Error,
    },
}

impl EndpointError {
    pub const fn missing_authentication() -> Self {
        Self::MissingAuthentication
    }

    pub const fn admin_token_not_configured() -> Self {
        Self::AdminTokenNotConfigured
    }

    pub const fn missing_json_body() -> Self {
        Self::MissingJsonBody
    }

    pub const fn invalid_json_body(reason: InvalidJsonBodyReason) -> Self {
        Self::InvalidJsonBody { reason }
    }

    pub fn internal_error<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::InternalGenericError {
            error: Box::new(error),
        }
    }

    fn client_error_reason(&self) -> Option<ErrorReason> {
        match self {
            Self::MissingAuthentication => Some(ErrorReason::missing_authentication()),
            Self::AdminTokenNotConfigured => Some(ErrorReason::admin_token_not_configured()),
            Self::MissingJsonBody => Some(ErrorReason::missing_json_body()),
            Self::InvalidJsonBody { reason } => Some(ErrorReason::invalid_json_body(*reason)),
            _ => None,
        }
    }
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthentication
            | Self::AdminTokenNotConfigured
            | Self::MissingJsonBody
            | Self::InvalidJsonBody { .. } => match self.client_error_reason() {
                Some(reason) => write!(f, "Client error: {}.", reason.reason_description()),
                None => write!(f, "Client error."),
            },
            Self::InternalGenericError { error } => {
                write!(f, "Internal server error (generic): {error}.")
            }
            Self::InternalDatabaseError { error } => {
                write!(
                    f,
                    "Internal server error (database error): {error}."
                )
            }
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingAuthentication => StatusCode::UNAUTHORIZED,
            Self::AdminTokenNotConfigured => StatusCode::UNAUTHORIZED,
            Self::MissingJsonBody => StatusCode::BAD_REQUEST,
            Self::InvalidJsonBody { .. } => StatusCode::BAD_REQUEST,
            Self::InternalGenericError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalDatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let reason = match self.client_error_reason() {
            Some(reason) => reason,
            None => {
                error!(error = %self, "Request failed with an internal error.");

                if cfg!(debug_assertions) {
                    ErrorReason::other(self.to_string())
                } else {
                    ErrorReason::other(GENERIC_INTERNAL_ERROR_REASON)
                }
            }
        };

        EndpointResponseBuilder::new(self.status_code())
            .with_error_reason(reason)
            .build()
            .unwrap_or_else(|_| HttpResponse::InternalServerError().finish())
    }
}


impl From<QueryError> for EndpointError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::SqlxError { error } => Self::InternalDatabaseError { error },
        }
    }
}

impl From<SearchError> for EndpointError {
    fn from(value: SearchError) -> Self {
        match value {
            SearchError::UnableToAcquireDatabaseConnection { error } => {
                Self::InternalDatabaseError { error }
            }
            SearchError::QueryFailed { error } => Self::from(error),
        }
    }
}


/// Parses a request body as JSON.
///
/// An empty (or whitespace-only) body is reported as [`EndpointError::MissingJsonBody`].
/// Endpoints parse the body themselves, after authentication, instead of using
/// the `Json` extractor, so unauthenticated callers never get body validation errors.
pub fn parse_json_body<T>(body: &[u8]) -> Result<T, EndpointError>
where
    T: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(EndpointError::missing_json_body());
    }

    serde_json::from_slice(body).map_err(|error| {
        if error.is_data() {
            EndpointError::invalid_json_body(InvalidJsonBodyReason::InvalidData)
        } else {
            EndpointError::invalid_json_body(InvalidJsonBodyReason::NotJson)
        }
    })
}




pub struct EndpointResponseBuilder {
    status_code: StatusCode,

    body: Option<Result<Vec<u8>, serde_json::Error>>,

    additional_headers: Vec<(HeaderName, HeaderValue)>,
}

impl EndpointResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            additional_headers: Vec::with_capacity(2),
        }
    }

    #[inline]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    #[inline]
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    #[inline]
    pub fn not_modified() -> Self {
        Self::new(StatusCode::NOT_MODIFIED)
    }

    #[inline]
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_json_body<S>(mut self, data: &S) -> Self
    where
        S: Serialize + ?Sized,
    {
        self.additional_headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        ));

        self.body = Some(serde_json::to_vec(data));
        self
    }

    /// Sets an already encoded body with the given `Content-Type`.
    pub fn with_raw_body<B>(mut self, content_type: &'static str, body: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        self.additional_headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type),
        ));

        self.body = Some(Ok(body.into()));
        self
    }

    pub fn with_error_reason<R>(self, reason: R) -> Self
    where
        R: Into<ErrorReason>,
    {
        self.with_json_body(&ResponseWithErrorReason::new(reason.into()))
    }

    pub fn with_header(mut self, header_name: HeaderName, header_value: HeaderValue) -> Self {
        self.additional_headers.push((header_name, header_value));
        self
    }

    #[inline]
    pub fn with_cache_control(self, cache_control: &'static str) -> Self {
        self.with_header(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        )
    }

    pub fn build(self) -> EndpointResult {
        let optional_body = match self.body {
            Some(body_or_error) => match body_or_error {
                Ok(body) => Some(body),
                Err(serialization_error) => {
                    return Err(EndpointError::internal_error(serialization_error))
                }
            },
            None => None,
        };


        let mut response_builder = HttpResponse::build(self.status_code);

        for (header_name, header_value) in self.additional_headers {
            response_builder.insert_header((header_name, header_value));
        }


        match optional_body {
            Some(body) => Ok(response_builder.body(body)),
            None => Ok(response_builder.finish()),
        }
    }
}




/// Short for [`Result`]`<`[`HttpResponse`]`, `[`EndpointError`]`>`, intended to be used
/// as the return type of every endpoint handler.
pub type EndpointResult<Body = BoxBody> = Result<HttpResponse<Body>, EndpointError>;
