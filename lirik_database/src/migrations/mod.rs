//! Embedded, forward-only schema migrations.
//!
//! Each migration is an `up.sql` script under `lirik_database/migrations/M<version>_<name>/`.
//! Applied migrations are tracked in the `schema_migrations` table together
//! with a SHA-256 hash of their script, so edits to an already-applied script are detected.

use std::time::{Duration, Instant};

use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::{Connection, SqliteConnection};
use tracing::info;

mod errors;

pub use errors::*;


pub struct EmbeddedMigration {
    pub version: i64,

    pub name: &'static str,

    pub up_sql: &'static str,
}

impl EmbeddedMigration {
    pub fn sha256_hash(&self) -> [u8; 32] {
        <Sha256 as Digest>::digest(self.up_sql.as_bytes()).into()
    }
}


/// All known migrations, ordered by version.
pub static MIGRATIONS: &[EmbeddedMigration] = &[
    EmbeddedMigration {
        version: 1,
        name: "create-songs-table",
        up_sql: include_str!("../../migrations/M0001_create-songs-table/up.sql"),
    },
    EmbeddedMigration {
        version: 2,
        name: "create-songs-full-text-index",
        up_sql: include_str!("../../migrations/M0002_create-songs-full-text-index/up.sql"),
    },
];



async fn ensure_migration_tracking_table_exists(
    database_connection: &mut SqliteConnection,
) -> Result<(), MigrationError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (\
            version INTEGER PRIMARY KEY NOT NULL, \
            name TEXT NOT NULL, \
            up_script_sha256_hash BLOB NOT NULL, \
            applied_at INTEGER NOT NULL, \
            execution_time_milliseconds INTEGER NOT NULL\
        )",
    )
    .execute(database_connection)
    .await
    .map_err(|error| MigrationError::FailedToExecuteQuery { error })?;

    Ok(())
}


/// Returns the migrations that haven't been applied to the database yet.
///
/// Fails if an applied migration has since been modified or is unknown to this build.
pub async fn pending_migrations(
    database_connection: &mut SqliteConnection,
) -> Result<Vec<&'static EmbeddedMigration>, MigrationError> {
    ensure_migration_tracking_table_exists(database_connection).await?;

    let applied_migrations = sqlx::query_as::<_, (i64, Vec<u8>)>(
        "SELECT version, up_script_sha256_hash \
            FROM schema_migrations \
            ORDER BY version ASC",
    )
    .fetch_all(&mut *database_connection)
    .await
    .map_err(|error| MigrationError::FailedToExecuteQuery { error })?;


    for (applied_version, applied_hash) in &applied_migrations {
        let Some(migration) = MIGRATIONS
            .iter()
            .find(|migration| migration.version == *applied_version)
        else {
            return Err(MigrationError::UnknownAppliedMigration {
                version: *applied_version,
            });
        };

        if migration.sha256_hash().as_slice() != applied_hash.as_slice() {
            return Err(MigrationError::ModifiedAfterApplying {
                version: migration.version,
                name: migration.name,
            });
        }
    }

    Ok(MIGRATIONS
        .iter()
        .filter(|migration| {
            !applied_migrations
                .iter()
                .any(|(applied_version, _)| *applied_version == migration.version)
        })
        .collect())
}


async fn apply_migration(
    database_connection: &mut SqliteConnection,
    migration: &EmbeddedMigration,
) -> Result<Duration, MigrationError> {
    let mut transaction = database_connection
        .begin()
        .await
        .map_err(|error| MigrationError::FailedToPerformTransaction { error })?;

    let started_at = Instant::now();

    sqlx::raw_sql(migration.up_sql)
        .execute(&mut *transaction)
        .await
        .map_err(|error| MigrationError::FailedToExecuteQuery { error })?;

    let execution_time = started_at.elapsed();

    sqlx::query(
        "INSERT INTO schema_migrations \
            (version, name, up_script_sha256_hash, applied_at, execution_time_milliseconds) \
            VALUES (?, ?, ?, ?, ?)",
    )
    .bind(migration.version)
    .bind(migration.name)
    .bind(migration.sha256_hash().to_vec())
    .bind(Utc::now().timestamp())
    .bind(execution_time.as_millis() as i64)
    .execute(&mut *transaction)
    .await
    .map_err(|error| MigrationError::FailedToExecuteQuery { error })?;

    transaction
        .commit()
        .await
        .map_err(|error| MigrationError::FailedToPerformTransaction { error })?;

    Ok(execution_time)
}


/// Applies every pending migration in order, each in its own transaction.
///
/// Returns the number of applied migrations.
pub async fn apply_pending_migrations(
    database_connection: &mut SqliteConnection,
) -> Result<usize, MigrationError> {
    let migrations_to_apply = pending_migrations(database_connection).await?;

    for migration in &migrations_to_apply {
        let execution_time = apply_migration(database_connection, migration).await?;

        info!(
            version = migration.version,
            name = migration.name,
            execution_time_milliseconds = execution_time.as_millis() as u64,
            "Applied database migration."
        );
    }

    Ok(migrations_to_apply.len())
}
