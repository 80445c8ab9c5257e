use serde::{Deserialize, Serialize};

use crate::id::SongId;


#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct AdminSongListItem {
    pub id: SongId,

    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    pub language: String,
}


/// Returned by `GET /api/admin/songs` (the 200 most recently updated songs).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct AdminSongsResponse {
    pub ok: bool,

    pub data: Vec<AdminSongListItem>,
}


/// Body of `POST /api/admin/songs`.
///
/// Every field is optional at the parsing level; `title` and `body` are
/// validated by the endpoint so a missing one can be reported by name.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
pub struct SongUpsertRequest {
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub artist: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub body: Option<String>,
}


#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct UpsertedSong {
    pub slug: String,

    pub title: String,
}


#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct SongUpsertResponse {
    pub ok: bool,

    pub data: UpsertedSong,
}


/// `{ "ok": true, "data": null }`, used by admin endpoints with nothing to return.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct AdminAcknowledgementResponse {
    pub ok: bool,

    pub data: (),
}

impl AdminAcknowledgementResponse {
    #[inline]
    pub const fn ok() -> Self {
        Self { ok: true, data: () }
    }
}
