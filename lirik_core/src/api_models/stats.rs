use serde::Serialize;


#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct StatsSong {
    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    /// Unix timestamp (seconds).
    pub updated_at: Option<i64>,
}


/// Returned by `GET /api/stats`.
///
/// The serialized form is also what the response's `ETag` is computed from.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct StatsResponse {
    pub total: i64,

    pub latest: Vec<StatsSong>,
}
