use thiserror::Error;


#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to execute query in database")]
    FailedToExecuteQuery {
        #[source]
        error: sqlx::Error,
    },

    #[error("failed while setting up or commiting transaction")]
    FailedToPerformTransaction {
        #[source]
        error: sqlx::Error,
    },

    #[error(
        "migration {} ({}) was modified after being applied (hash mismatch)",
        .version,
        .name
    )]
    ModifiedAfterApplying { version: i64, name: &'static str },

    #[error(
        "database has migration version {} applied, which this build doesn't know about",
        .version
    )]
    UnknownAppliedMigration { version: i64 },
}
