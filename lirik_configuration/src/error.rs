use std::{borrow::Cow, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissingDirectoryCreationError {
    #[error("{} exists, but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("unable to create directory {} due to IO error", .directory_path.display())]
    UnableToCreateDirectory {
        directory_path: PathBuf,

        #[source]
        error: io::Error,
    },
}


#[derive(Debug, Error)]
pub enum LoggingConfigurationError {
    #[error(
        "invalid tracing filter of type {} (doesn't parse with EnvFilter): {}",
        .kind,
        .invalid_filter
    )]
    InvalidTracingFilter {
        invalid_filter: String,

        kind: Cow<'static, str>,

        #[source]
        error: tracing_subscriber::filter::ParseError,
    },
}


#[derive(Debug, Error)]
pub enum DatabaseConfigurationError {
    #[error("max_connections must be at least 1")]
    ZeroMaxConnections,
}


#[derive(Debug, Error)]
pub enum SiteConfigurationError {
    #[error("invalid public_base_url: {}", .public_base_url)]
    InvalidPublicBaseUrl {
        public_base_url: String,

        #[source]
        error: url::ParseError,
    },

    #[error("public_base_url must use http or https, got: {}", .scheme)]
    UnsupportedScheme { scheme: String },
}


#[derive(Debug, Error)]
pub enum ConfigurationResolutionError {
    #[error("error while resolving \"logging\" table")]
    LoggingConfigurationError {
        #[from]
        #[source]
        error: LoggingConfigurationError,
    },

    #[error("error while resolving \"database\" table")]
    DatabaseConfigurationError {
        #[from]
        #[source]
        error: DatabaseConfigurationError,
    },

    #[error("error while resolving \"site\" table")]
    SiteConfigurationError {
        #[from]
        #[source]
        error: SiteConfigurationError,
    },
}


#[derive(Debug, Error)]
pub enum ConfigurationLoadingError {
    #[error("unable to determine the current working directory")]
    UnableToDetermineCurrentDirectory {
        #[source]
        error: io::Error,
    },

    #[error("unable to read configuration file at {}", .path.display())]
    UnableToReadConfigurationFile {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("failed to parse the contents of the configuration file as TOML")]
    ParsingError {
        #[from]
        #[source]
        error: toml::de::Error,
    },

    #[error("failed to resolve and validate the contents of the configuration")]
    ResolutionError {
        #[from]
        #[source]
        error: ConfigurationResolutionError,
    },
}
