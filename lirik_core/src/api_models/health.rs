use serde::Serialize;


/// Returned by `GET /api/health`.
///
/// A healthy response carries `ts` (milliseconds since the unix epoch),
/// an unhealthy one carries `reason` instead.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct HealthResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthResponse {
    pub fn healthy(timestamp_millis: i64) -> Self {
        Self {
            ok: true,
            ts: Some(timestamp_millis),
            reason: None,
        }
    }

    pub fn unhealthy<R>(reason: R) -> Self
    where
        R: Into<String>,
    {
        Self {
            ok: false,
            ts: None,
            reason: Some(reason.into()),
        }
    }
}
