use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::BasePathsConfiguration;
use crate::{
    traits::TryResolveWithContext,
    utilities::{create_directory_if_missing, replace_placeholders_in_path},
    DatabaseConfigurationError,
    MissingDirectoryCreationError,
};


#[derive(Deserialize, Debug, Clone)]
pub(super) struct UnresolvedDatabaseConfiguration {
    database_file_path: String,

    max_connections: Option<u32>,

    statement_cache_capacity: Option<usize>,
}

/// SQLite-related configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfiguration {
    /// Path to the SQLite database file. Created if missing.
    pub database_file_path: PathBuf,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    pub statement_cache_capacity: Option<usize>,
}

impl<'r> TryResolveWithContext<'r> for UnresolvedDatabaseConfiguration {
    type Resolved = DatabaseConfiguration;
    type Context = &'r BasePathsConfiguration;
    type Error = DatabaseConfigurationError;

    fn try_resolve_with_context(
        self,
        base_paths: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let max_connections = self.max_connections.unwrap_or(10);
        if max_connections == 0 {
            return Err(DatabaseConfigurationError::ZeroMaxConnections);
        }

        let database_file_path = replace_placeholders_in_path(
            Path::new(&self.database_file_path),
            base_paths.placeholders(),
        );

        Ok(Self::Resolved {
            database_file_path,
            max_connections,
            statement_cache_capacity: self.statement_cache_capacity,
        })
    }
}


impl DatabaseConfiguration {
    /// Creates the directory the database file lives in.
    /// SQLite creates a missing file, but not its parent directories.
    pub fn create_database_directory_if_missing(
        &self,
    ) -> Result<(), MissingDirectoryCreationError> {
        match self.database_file_path.parent() {
            Some(parent_directory) if !parent_directory.as_os_str().is_empty() => {
                create_directory_if_missing(parent_directory)
            }
            _ => Ok(()),
        }
    }
}
