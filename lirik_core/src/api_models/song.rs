use serde::Serialize;

use crate::id::SongId;


#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct SongDetails {
    pub id: SongId,

    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    pub language: String,

    /// Lyrics, with runs of horizontal whitespace turned into line breaks.
    pub body: String,

    /// Unix timestamp (seconds).
    pub created_at: Option<i64>,

    /// Unix timestamp (seconds).
    pub updated_at: Option<i64>,
}


/// Returned by `GET /api/song/{slug}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct SongResponse {
    pub song: SongDetails,

    /// Sampled, approximate view count.
    pub views: f64,
}
