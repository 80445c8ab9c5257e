use sqlx::SqliteConnection;

use super::{SongModel, SongSummaryModel, SONG_COLUMNS, SONG_SUMMARY_COLUMNS};
use crate::QueryResult;


pub struct SongQuery;

impl SongQuery {
    pub async fn get_by_slug(
        database_connection: &mut SqliteConnection,
        slug: &str,
    ) -> QueryResult<Option<SongModel>> {
        let song = sqlx::query_as::<_, SongModel>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE slug = ? LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(database_connection)
        .await?;

        Ok(song)
    }

    pub async fn count(database_connection: &mut SqliteConnection) -> QueryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM songs")
            .fetch_one(database_connection)
            .await?;

        Ok(count)
    }

    /// Returns up to `limit` songs, most recently updated first.
    pub async fn recently_updated(
        database_connection: &mut SqliteConnection,
        limit: u32,
    ) -> QueryResult<Vec<SongSummaryModel>> {
        let songs = sqlx::query_as::<_, SongSummaryModel>(&format!(
            "SELECT {SONG_SUMMARY_COLUMNS} FROM songs \
                ORDER BY updated_at DESC \
                LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(database_connection)
        .await?;

        Ok(songs)
    }
}
