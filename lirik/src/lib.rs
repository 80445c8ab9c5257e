//! Search and cache backend for the Lirik Rohani song lyrics site.
//!
//! The binary in `main.rs` wires everything together; this library exposes the
//! router and application state so end-to-end tests can build the same service.

use lirik_configuration::Configuration;
use lirik_database::connection::establish_database_connection_pool;
use lirik_database::migrations::{apply_pending_migrations, pending_migrations};
use miette::{Context, IntoDiagnostic, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

pub mod api;
pub mod authentication;
pub mod cli;
pub mod logging;
pub mod state;



/// Connects to the SQLite database and checks its schema.
///
/// With `apply_migrations`, pending migrations are applied. Otherwise they are only
/// reported, since the server would fail on its first query against a missing table.
pub async fn connect_and_set_up_database(
    configuration: &Configuration,
    apply_migrations: bool,
) -> Result<SqlitePool> {
    configuration
        .database
        .create_database_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create the database directory.")?;

    let database_pool = establish_database_connection_pool(&configuration.database)
        .await
        .into_diagnostic()
        .wrap_err("Failed to connect to the SQLite database.")?;

    let mut database_connection = database_pool
        .acquire()
        .await
        .into_diagnostic()
        .wrap_err("Failed to acquire a database connection.")?;

    if apply_migrations {
        let applied_migration_count = apply_pending_migrations(&mut database_connection)
            .await
            .into_diagnostic()
            .wrap_err("Failed to apply pending database migrations.")?;

        info!(
            applied_migration_count,
            "Database schema is up to date."
        );
    } else {
        let pending = pending_migrations(&mut database_connection)
            .await
            .into_diagnostic()
            .wrap_err("Failed to check for pending database migrations.")?;

        if !pending.is_empty() {
            warn!(
                pending_migration_count = pending.len(),
                "There are pending database migrations, run with --apply-pending-migrations to apply them."
            );
        }
    }

    drop(database_connection);

    Ok(database_pool)
}
