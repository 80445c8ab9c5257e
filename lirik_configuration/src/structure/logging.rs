use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::BasePathsConfiguration;
use crate::{
    traits::TryResolveWithContext,
    utilities::{create_directory_if_missing, replace_placeholders_in_path},
    LoggingConfigurationError,
    MissingDirectoryCreationError,
};


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    log_file_output_directory: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}

impl<'r> TryResolveWithContext<'r> for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Context = &'r BasePathsConfiguration;
    type Error = LoggingConfigurationError;

    fn try_resolve_with_context(
        self,
        base_paths: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        // Validate the file and console level filters.
        if let Err(error) = EnvFilter::try_new(&self.console_output_level_filter) {
            return Err(LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: self.console_output_level_filter,
                kind: "console_output_level_filter".into(),
                error,
            });
        }

        if let Err(error) = EnvFilter::try_new(&self.log_file_output_level_filter) {
            return Err(LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: self.log_file_output_level_filter,
                kind: "log_file_output_level_filter".into(),
                error,
            });
        }


        let log_file_output_directory = replace_placeholders_in_path(
            Path::new(&self.log_file_output_directory),
            base_paths.placeholders(),
        );

        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}

impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> EnvFilter {
        // PANIC SAFETY: This is safe because we checked that the input is valid when resolving.
        EnvFilter::try_new(&self.console_output_level_filter).unwrap()
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        // PANIC SAFETY: This is safe because we checked that the input is valid when resolving.
        EnvFilter::try_new(&self.log_file_output_level_filter).unwrap()
    }

    pub fn create_log_file_output_directory_if_missing(
        &self,
    ) -> Result<(), MissingDirectoryCreationError> {
        create_directory_if_missing(&self.log_file_output_directory)
    }
}
