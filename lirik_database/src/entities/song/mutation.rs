use chrono::Utc;
use lirik_core::id::SongId;
use sqlx::SqliteConnection;

use super::{SongModel, SONG_COLUMNS};
use crate::QueryResult;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewSong {
    pub slug: String,
    pub title: String,
    pub artist: Option<String>,
    pub language: String,
    pub body: String,
}


pub struct SongMutation;

impl SongMutation {
    /// Inserts a song, or overwrites the mutable fields of the song with the same slug.
    ///
    /// `updated_at` is refreshed on every call and never moves backwards.
    /// `id`, `created_at` and `metadata` of an existing song are left untouched.
    pub async fn upsert(
        database_connection: &mut SqliteConnection,
        song: NewSong,
    ) -> QueryResult<SongModel> {
        let new_song_id = SongId::generate();
        let now = Utc::now().timestamp();

        let upserted_song = sqlx::query_as::<_, SongModel>(&format!(
            "INSERT INTO songs \
                (id, slug, title, artist, language, body, metadata, created_at, updated_at) \
                VALUES (?, ?, ?, ?, ?, ?, NULL, ?, ?) \
                ON CONFLICT (slug) DO UPDATE SET \
                    title = excluded.title, \
                    artist = excluded.artist, \
                    language = excluded.language, \
                    body = excluded.body, \
                    updated_at = MAX(songs.updated_at, excluded.updated_at) \
                RETURNING {SONG_COLUMNS}"
        ))
        .bind(new_song_id.into_inner())
        .bind(song.slug)
        .bind(song.title)
        .bind(song.artist)
        .bind(song.language)
        .bind(song.body)
        .bind(now)
        .bind(now)
        .fetch_one(database_connection)
        .await?;

        Ok(upserted_song)
    }

    /// Returns `true` if a song with the given slug existed and was deleted.
    pub async fn delete_by_slug(
        database_connection: &mut SqliteConnection,
        slug: &str,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query("DELETE FROM songs WHERE slug = ?")
            .bind(slug)
            .execute(database_connection)
            .await?;

        Ok(query_result.rows_affected() > 0)
    }

    /// Rebuilds the full-text index from the `songs` table.
    pub async fn rebuild_search_index(database_connection: &mut SqliteConnection) -> QueryResult<()> {
        sqlx::query("INSERT INTO songs_fts (songs_fts) VALUES ('rebuild')")
            .execute(database_connection)
            .await?;

        Ok(())
    }
}
