use lirik_core::language::LanguageCode;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use super::SongSearchHitModel;
use crate::{QueryError, QueryResult};


/// Error message prefixes SQLite uses when it rejects an FTS5 match expression.
const MATCH_EXPRESSION_ERROR_PREFIXES: &[&str] = &[
    "fts5:",
    "no such column:",
    "unterminated string",
    "unknown special query",
];


/// Full-text match arguments, already validated and clamped by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongSearchParameters {
    /// An FTS5 match expression. Must not be empty.
    pub match_expression: String,

    pub language: Option<LanguageCode>,

    pub limit: u32,

    pub offset: u32,
}


fn build_song_search_query(parameters: SongSearchParameters) -> QueryBuilder<'static, Sqlite> {
    let mut query_builder = QueryBuilder::new(
        "SELECT s.id, s.slug, s.title, s.artist, s.language, \
            snippet(songs_fts, 1, '<mark>', '</mark>', '…', 12) AS snippet \
            FROM songs_fts \
            JOIN songs s ON s.internal_id = songs_fts.rowid \
            WHERE songs_fts MATCH ",
    );

    query_builder.push_bind(parameters.match_expression);

    if let Some(language) = parameters.language {
        query_builder.push(" AND s.language = ");
        query_builder.push_bind(language.as_str());
    }

    query_builder.push(" ORDER BY rank LIMIT ");
    query_builder.push_bind(parameters.limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(parameters.offset);

    query_builder
}


pub struct SongSearchQuery;

impl SongSearchQuery {
    /// Runs a ranked full-text search, most relevant hits first.
    pub async fn search(
        database_connection: &mut SqliteConnection,
        parameters: SongSearchParameters,
    ) -> QueryResult<Vec<SongSearchHitModel>> {
        let mut query_builder = build_song_search_query(parameters);

        let hits = query_builder
            .build_query_as::<SongSearchHitModel>()
            .fetch_all(database_connection)
            .await?;

        Ok(hits)
    }
}


/// Returns `true` if SQLite refused to parse the match expression itself
/// (e.g. free text containing `'`, `?` or a `-` that FTS5 reads as an operator).
pub fn is_invalid_match_expression_error(error: &QueryError) -> bool {
    let QueryError::SqlxError {
        error: sqlx::Error::Database(database_error),
    } = error
    else {
        return false;
    };

    let message = database_error.message();

    MATCH_EXPRESSION_ERROR_PREFIXES
        .iter()
        .any(|prefix| message.starts_with(prefix))
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::{NewSong, SongMutation},
        testing::migrated_in_memory_pool,
    };

    fn parameters(match_expression: &str, language: Option<LanguageCode>) -> SongSearchParameters {
        SongSearchParameters {
            match_expression: match_expression.to_string(),
            language,
            limit: 10,
            offset: 0,
        }
    }

    async fn seed(connection: &mut SqliteConnection) {
        let songs = [
            (
                "kasih-setiamu",
                "Kasih SetiaMu",
                "id",
                "Kasih setiaMu yang kualami tak berkesudahan",
            ),
            (
                "allah-itu-baik",
                "Allah Itu Baik",
                "id",
                "Allah itu baik bagi semua orang",
            ),
            (
                "above-all",
                "Above All",
                "en",
                "Above all powers above all kings",
            ),
        ];

        for (slug, title, language, body) in songs {
            SongMutation::upsert(
                connection,
                NewSong {
                    slug: slug.to_string(),
                    title: title.to_string(),
                    artist: None,
                    language: language.to_string(),
                    body: body.to_string(),
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn finds_songs_with_highlighted_snippets() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();
        seed(&mut connection).await;

        let hits = SongSearchQuery::search(&mut connection, parameters("kasih setia", None))
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "kasih-setiamu");
        assert!(hits[0].snippet.contains("<mark>"));
    }

    #[tokio::test]
    async fn malformed_match_expressions_are_recognized() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();
        seed(&mut connection).await;

        for malformed_expression in ["don't", "kasih-setia", "?", "\"kasih"] {
            let error = SongSearchQuery::search(
                &mut connection,
                parameters(malformed_expression, None),
            )
            .await
            .unwrap_err();

            assert!(
                is_invalid_match_expression_error(&error),
                "{malformed_expression}: {error:?}"
            );
        }
    }

    #[tokio::test]
    async fn missing_index_is_not_a_malformed_expression() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();

        sqlx::query("DROP TABLE songs_fts")
            .execute(&mut *connection)
            .await
            .unwrap();

        let error = SongSearchQuery::search(&mut connection, parameters("kasih", None))
            .await
            .unwrap_err();

        assert!(!is_invalid_match_expression_error(&error));
    }

    #[tokio::test]
    async fn filters_by_language() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();
        seed(&mut connection).await;

        let english_hits = SongSearchQuery::search(
            &mut connection,
            parameters("above", Some(LanguageCode::English)),
        )
        .await
        .unwrap();
        assert_eq!(english_hits.len(), 1);

        let indonesian_hits = SongSearchQuery::search(
            &mut connection,
            parameters("above", Some(LanguageCode::Indonesian)),
        )
        .await
        .unwrap();
        assert!(indonesian_hits.is_empty());
    }

    #[tokio::test]
    async fn restricts_title_only_expressions_to_titles() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();
        seed(&mut connection).await;

        let body_only_word = SongSearchQuery::search(
            &mut connection,
            parameters("title:(\"semua\")", None),
        )
        .await
        .unwrap();
        assert!(body_only_word.is_empty());

        let title_words = SongSearchQuery::search(
            &mut connection,
            parameters("title:(\"allah\" AND \"baik\")", None),
        )
        .await
        .unwrap();
        assert_eq!(title_words.len(), 1);
        assert_eq!(title_words[0].slug, "allah-itu-baik");
    }

    #[tokio::test]
    async fn applies_limit_and_offset() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();
        seed(&mut connection).await;

        let all_hits = SongSearchQuery::search(&mut connection, parameters("all", None))
            .await
            .unwrap();
        assert_eq!(all_hits.len(), 2);

        let second_page = SongSearchQuery::search(
            &mut connection,
            SongSearchParameters {
                limit: 1,
                offset: 1,
                ..parameters("all", None)
            },
        )
        .await
        .unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].slug, all_hits[1].slug);
    }

    #[tokio::test]
    async fn deleted_and_reindexed_songs_stay_consistent() {
        let pool = migrated_in_memory_pool().await;
        let mut connection = pool.acquire().await.unwrap();
        seed(&mut connection).await;

        SongMutation::delete_by_slug(&mut connection, "kasih-setiamu")
            .await
            .unwrap();
        SongMutation::rebuild_search_index(&mut connection)
            .await
            .unwrap();

        let hits = SongSearchQuery::search(&mut connection, parameters("kasih", None))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
