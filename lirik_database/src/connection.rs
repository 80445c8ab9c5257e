use std::{str::FromStr, time::Duration};

use lirik_configuration::DatabaseConfiguration;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};


/// Opens (and creates, if missing) the SQLite database described by the configuration.
pub async fn establish_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<SqlitePool, sqlx::Error> {
    let connection_options = SqliteConnectOptions::new()
        .filename(&database_configuration.database_file_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .statement_cache_capacity(
            database_configuration
                .statement_cache_capacity
                .unwrap_or(200),
        );

    SqlitePoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .min_connections(1)
        .max_connections(database_configuration.max_connections)
        .test_before_acquire(true)
        .connect_with(connection_options)
        .await
}


/// Opens a private in-memory database.
///
/// The pool holds exactly one connection that is never recycled,
/// since every new in-memory connection would see an empty database.
pub async fn establish_in_memory_database_connection_pool() -> Result<SqlitePool, sqlx::Error> {
    let connection_options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .idle_timeout(None)
        .max_lifetime(None)
        .min_connections(1)
        .max_connections(1)
        .connect_with(connection_options)
        .await
}
