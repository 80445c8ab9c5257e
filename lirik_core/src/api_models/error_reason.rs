use std::borrow::Cow;

use serde::{Deserialize, Serialize};



/// Provides a quick static description for a given error reason.
pub trait ErrorReasonName {
    fn reason_description(&self) -> &'static str;
}



/// Reasons for a JSON body to not be accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidJsonBodyReason {
    /// The provided data could not be parsed as JSON at all.
    #[serde(rename = "not-json")]
    NotJson,

    /// The provided JSON was valid, but did not match the expected shape.
    #[serde(rename = "invalid-data")]
    InvalidData,

    /// The provided JSON data was too large.
    #[serde(rename = "too-large")]
    TooLarge,
}



/// Pertains to all endpoints under `/api/admin/songs`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "songs-error-type")]
#[non_exhaustive]
pub enum SongsErrorReason {
    /// `title` or `body` was missing (or blank) in an upsert request.
    #[serde(rename = "missing-fields")]
    MissingFields { fields: Vec<Cow<'static, str>> },

    /// The `slug` query parameter was missing on a delete request.
    #[serde(rename = "missing-slug")]
    MissingSlug,

    #[serde(rename = "song-not-found")]
    SongNotFound,
}

impl SongsErrorReason {
    pub fn missing_fields(fields: Vec<Cow<'static, str>>) -> Self {
        Self::MissingFields { fields }
    }

    pub const fn missing_slug() -> Self {
        Self::MissingSlug
    }

    pub const fn song_not_found() -> Self {
        Self::SongNotFound
    }
}

impl ErrorReasonName for SongsErrorReason {
    fn reason_description(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "missing fields",
            Self::MissingSlug => "missing slug",
            Self::SongNotFound => "song not found",
        }
    }
}



#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "type", content = "data")]
pub enum ErrorReason {
    /// Indicates that admin authentication is required on the endpoint,
    /// but the caller did not provide a valid admin token.
    #[serde(rename = "missing-authentication")]
    MissingAuthentication,

    /// Indicates that the endpoint requires an admin token,
    /// but the server has none configured.
    #[serde(rename = "admin-token-not-configured")]
    AdminTokenNotConfigured,

    /// Indicates that the request is missing a JSON body.
    #[serde(rename = "missing-json-body")]
    MissingJsonBody,

    /// Indicates that the request has an invalid JSON body (see [`InvalidJsonBodyReason`]).
    #[serde(rename = "invalid-json-body")]
    InvalidJsonBody { reason: InvalidJsonBodyReason },

    #[serde(rename = "songs")]
    Songs(SongsErrorReason),

    #[serde(rename = "other")]
    Other { reason: Cow<'static, str> },
}

impl ErrorReason {
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

    pub fn other<R>(reason: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::Other {
            reason: reason.into(),
        }
    }
}

impl ErrorReasonName for ErrorReason {
    fn reason_description(&self) -> &'static str {
        match self {
            Self::MissingAuthentication => "missing authentication",
            Self::AdminTokenNotConfigured => "admin token not configured",
            Self::MissingJsonBody => "missing JSON body",
            Self::InvalidJsonBody { .. } => "invalid JSON body",
            Self::Songs(songs_error_reason) => songs_error_reason.reason_description(),
            Self::Other { .. } => "other reason",
        }
    }
}

impl From<SongsErrorReason> for ErrorReason {
    fn from(value: SongsErrorReason) -> Self {
        Self::Songs(value)
    }
}



/// A JSON-serializable model containing a single field named `reason` ([`ErrorReason`]).
///
/// Endpoint code should not construct this directly, but respond through
/// the server's response builder, which wraps the reason for you.
#[derive(Serialize, PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
    feature = "serde_impls_for_client_on_models",
    derive(serde::Deserialize)
)]
pub struct ResponseWithErrorReason {
    pub reason: ErrorReason,
}

impl ResponseWithErrorReason {
    #[inline]
    pub fn new(reason: ErrorReason) -> Self {
        Self { reason }
    }
}



#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_reasons_serialize_as_tagged_objects() {
        assert_eq!(
            serde_json::to_value(ResponseWithErrorReason::new(
                ErrorReason::missing_authentication()
            ))
            .unwrap(),
            json!({ "reason": { "type": "missing-authentication" } })
        );

        assert_eq!(
            serde_json::to_value(ErrorReason::from(SongsErrorReason::missing_fields(vec![
                "title".into()
            ])))
            .unwrap(),
            json!({
                "type": "songs",
                "data": { "songs-error-type": "missing-fields", "fields": ["title"] }
            })
        );
    }
}
