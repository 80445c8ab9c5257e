use lirik_core::{
    api_models::{AdminSongListItem, SearchResultItem, StatsSong},
    id::SongId,
    language::DEFAULT_SONG_LANGUAGE,
};
use sqlx::{sqlite::SqliteRow, FromRow};

use crate::{coercion::read_column, IntoExternalModel};


/// Columns projected by every full song query.
pub(super) const SONG_COLUMNS: &str =
    "id, slug, title, artist, language, body, metadata, created_at, updated_at";

/// Columns projected by song summary queries.
pub(super) const SONG_SUMMARY_COLUMNS: &str = "id, slug, title, artist, language, updated_at";



#[derive(Clone, Debug, PartialEq)]
pub struct SongModel {
    pub id: SongId,

    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    /// Two-letter language code, `id` if the stored value is missing or blank.
    pub language: String,

    pub body: String,

    /// Opaque JSON, not interpreted by the backend.
    pub metadata: Option<serde_json::Value>,

    /// Unix timestamp (seconds).
    pub created_at: Option<i64>,

    /// Unix timestamp (seconds).
    pub updated_at: Option<i64>,
}

impl<'r> FromRow<'r, SqliteRow> for SongModel {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: SongId::new(read_column(row, "id")?.into_string_lossy()),
            slug: read_column(row, "slug")?.into_string_lossy(),
            title: read_column(row, "title")?.into_string_lossy(),
            artist: read_column(row, "artist")?.into_optional_string(),
            language: read_column(row, "language")?
                .into_non_blank_string_or(DEFAULT_SONG_LANGUAGE.as_str()),
            body: read_column(row, "body")?.into_string_lossy(),
            metadata: read_column(row, "metadata")?.into_optional_json(),
            created_at: read_column(row, "created_at")?.into_optional_integer(),
            updated_at: read_column(row, "updated_at")?.into_optional_integer(),
        })
    }
}



/// A song without its lyrics, as shown in listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongSummaryModel {
    pub id: SongId,

    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    pub language: String,

    pub updated_at: Option<i64>,
}

impl<'r> FromRow<'r, SqliteRow> for SongSummaryModel {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: SongId::new(read_column(row, "id")?.into_string_lossy()),
            slug: read_column(row, "slug")?.into_string_lossy(),
            title: read_column(row, "title")?.into_string_lossy(),
            artist: read_column(row, "artist")?.into_optional_string(),
            language: read_column(row, "language")?
                .into_non_blank_string_or(DEFAULT_SONG_LANGUAGE.as_str()),
            updated_at: read_column(row, "updated_at")?.into_optional_integer(),
        })
    }
}

impl IntoExternalModel for SongSummaryModel {
    type ExternalModel = AdminSongListItem;

    fn into_external_model(self) -> Self::ExternalModel {
        AdminSongListItem {
            id: self.id,
            slug: self.slug,
            title: self.title,
            artist: self.artist,
            language: self.language,
        }
    }
}

impl SongSummaryModel {
    pub fn into_stats_song(self) -> StatsSong {
        StatsSong {
            slug: self.slug,
            title: self.title,
            artist: self.artist,
            updated_at: self.updated_at,
        }
    }
}



/// A single row of a full-text search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongSearchHitModel {
    pub id: SongId,

    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    pub language: String,

    /// Empty if the index produced no textual snippet.
    pub snippet: String,
}

impl<'r> FromRow<'r, SqliteRow> for SongSearchHitModel {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: SongId::new(read_column(row, "id")?.into_string_lossy()),
            slug: read_column(row, "slug")?.into_string_lossy(),
            title: read_column(row, "title")?.into_string_lossy(),
            artist: read_column(row, "artist")?.into_optional_string(),
            language: read_column(row, "language")?
                .into_non_blank_string_or(DEFAULT_SONG_LANGUAGE.as_str()),
            snippet: read_column(row, "snippet")?.into_string_or_empty(),
        })
    }
}

impl IntoExternalModel for SongSearchHitModel {
    type ExternalModel = SearchResultItem;

    fn into_external_model(self) -> Self::ExternalModel {
        SearchResultItem {
            id: self.id,
            slug: self.slug,
            title: self.title,
            artist: self.artist,
            language: self.language,
            snippet: self.snippet,
        }
    }
}
