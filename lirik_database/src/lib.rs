//! SQLite access layer: connection pool, schema migrations,
//! song queries and mutations, and the ranked full-text search query.

use thiserror::Error;

pub(crate) mod coercion;
pub mod connection;
pub mod entities;
pub mod migrations;

#[cfg(test)]
pub(crate) mod testing;



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },
}



pub type QueryResult<R, E = QueryError> = Result<R, E>;



pub trait IntoExternalModel {
    type ExternalModel;

    fn into_external_model(self) -> Self::ExternalModel;
}
