use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod admin;
mod base_paths;
mod cache;
mod database;
mod http;
mod logging;
mod site;

pub use admin::*;
pub use base_paths::*;
pub use cache::*;
pub use database::*;
pub use http::*;
pub use logging::*;
pub use site::*;

use crate::traits::{Resolve, TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Base paths.
    base_paths: UnresolvedBasePathsConfiguration,

    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Configuration related to the HTTP server.
    http: UnresolvedHttpConfiguration,

    /// Configuration related to the database.
    database: UnresolvedDatabaseConfiguration,

    /// Key-value cache configuration.
    cache: UnresolvedCacheConfiguration,

    /// Administrator access configuration.
    admin: UnresolvedAdminConfiguration,

    /// Public site configuration.
    site: UnresolvedSiteConfiguration,
}


/// The entire Lirik backend configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Base paths
    pub base_paths: BasePathsConfiguration,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Configuration related to the HTTP server.
    pub http: HttpConfiguration,

    /// Configuration related to the database.
    pub database: DatabaseConfiguration,

    /// Key-value cache configuration.
    pub cache: CacheConfiguration,

    /// Administrator access configuration.
    pub admin: AdminConfiguration,

    /// Public site configuration.
    pub site: SiteConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}


impl<'r> TryResolveWithContext<'r> for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let base_paths = self.base_paths.resolve();
        let logging = self.logging.try_resolve_with_context(&base_paths)?;
        let http = self.http.resolve();
        let database = self.database.try_resolve_with_context(&base_paths)?;
        let cache = self.cache.resolve();
        let admin = self.admin.resolve();
        let site = self.site.try_resolve()?;

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            base_paths,
            logging,
            http,
            database,
            cache,
            admin,
            site,
        })
    }
}


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Read the configuration file into memory as a string.
        let configuration_string =
            fs::read_to_string(configuration_file_path.as_ref()).map_err(|error| {
                ConfigurationLoadingError::UnableToReadConfigurationFile {
                    path: configuration_file_path.as_ref().to_path_buf(),
                    error,
                }
            })?;

        let canonical_configuration_file_path =
            dunce::canonicalize(configuration_file_path.as_ref())
                .unwrap_or_else(|_| configuration_file_path.as_ref().to_path_buf());

        Self::load_from_str(
            &configuration_string,
            canonical_configuration_file_path,
        )
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Configuration::load_from_path(get_default_configuration_file_path()?)
    }

    /// Parse and resolve configuration contents that were already read into memory.
    /// `configuration_file_path` is only recorded, never read.
    pub fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Parse the string into the [`UnresolvedConfiguration`] structure and then resolve it.
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .map_err(|error| ConfigurationLoadingError::ParsingError { error })?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path,
            })?;

        Ok(resolved_configuration)
    }
}



#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::MissingDirectoryCreationError;

    const SAMPLE_CONFIGURATION: &str = r#"
[base_paths]
base_data_directory_path = "/srv/lirik"

[logging]
console_output_level_filter = "info"
log_file_output_level_filter = "debug,sqlx=warn"
log_file_output_directory = "{BASE_DATA_DIRECTORY}/logs"

[http]
host = "127.0.0.1"
port = 8866

[database]
database_file_path = "{BASE_DATA_DIRECTORY}/lirik.sqlite3"

[cache]
enabled = true

[admin]
token = "  super-secret  "

[site]
public_base_url = "https://lirikrohani.com/"
"#;

    #[test]
    fn resolves_sample_configuration() {
        let configuration =
            Configuration::load_from_str(SAMPLE_CONFIGURATION, PathBuf::from("test.toml"))
                .unwrap();

        assert_eq!(configuration.http.port, 8866);
        assert_eq!(
            configuration.database.database_file_path,
            PathBuf::from("/srv/lirik/lirik.sqlite3")
        );
        assert_eq!(configuration.database.max_connections, 10);
        assert_eq!(
            configuration.logging.log_file_output_directory,
            PathBuf::from("/srv/lirik/logs")
        );
        assert_eq!(configuration.cache.max_entries, 10_000);
        assert!(configuration.cache.audit_log_enabled);
        assert_eq!(
            configuration.site.public_base_url,
            "https://lirikrohani.com"
        );

        if std::env::var(ADMIN_TOKEN_ENVIRONMENT_VARIABLE_NAME).is_err() {
            assert_eq!(configuration.admin.token.as_deref(), Some("super-secret"));
        }
    }

    #[test]
    fn rejects_invalid_tracing_filter() {
        let broken = SAMPLE_CONFIGURATION.replace(
            "console_output_level_filter = \"info\"",
            "console_output_level_filter = \"lirik=extremely-loud\"",
        );

        let result = Configuration::load_from_str(&broken, PathBuf::from("test.toml"));

        assert!(matches!(
            result,
            Err(ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::LoggingConfigurationError { .. }
            })
        ));
    }

    #[test]
    fn rejects_non_http_site_url() {
        let broken = SAMPLE_CONFIGURATION.replace(
            "https://lirikrohani.com/",
            "ftp://lirikrohani.com",
        );

        let result = Configuration::load_from_str(&broken, PathBuf::from("test.toml"));

        assert!(matches!(
            result,
            Err(ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::SiteConfigurationError { .. }
            })
        ));
    }

    #[test]
    fn loads_configuration_from_file() {
        let mut configuration_file = tempfile::NamedTempFile::new().unwrap();
        configuration_file
            .write_all(SAMPLE_CONFIGURATION.as_bytes())
            .unwrap();

        let configuration = Configuration::load_from_path(configuration_file.path()).unwrap();

        assert_eq!(configuration.http.host, "127.0.0.1");
    }

    #[test]
    fn creates_missing_database_and_log_directories() {
        let data_directory = tempfile::tempdir().unwrap();
        let base_data_directory = data_directory.path().join("fresh").join("data");

        let configuration_string = SAMPLE_CONFIGURATION.replace(
            "/srv/lirik",
            &base_data_directory.to_string_lossy(),
        );
        let configuration =
            Configuration::load_from_str(&configuration_string, PathBuf::from("test.toml"))
                .unwrap();

        assert!(!base_data_directory.exists());

        configuration
            .database
            .create_database_directory_if_missing()
            .unwrap();
        configuration
            .logging
            .create_log_file_output_directory_if_missing()
            .unwrap();

        assert!(base_data_directory.is_dir());
        assert!(base_data_directory.join("logs").is_dir());
        assert!(!configuration.database.database_file_path.exists());
    }

    #[test]
    fn database_directory_must_not_be_a_file() {
        let data_directory = tempfile::tempdir().unwrap();
        let occupied_path = data_directory.path().join("occupied");
        std::fs::write(&occupied_path, "not a directory").unwrap();

        let configuration_string =
            SAMPLE_CONFIGURATION.replace("/srv/lirik", &occupied_path.to_string_lossy());
        let configuration =
            Configuration::load_from_str(&configuration_string, PathBuf::from("test.toml"))
                .unwrap();

        assert!(matches!(
            configuration.database.create_database_directory_if_missing(),
            Err(MissingDirectoryCreationError::NotADirectory { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = Configuration::load_from_path("/definitely/not/here/configuration.toml");

        assert!(matches!(
            result,
            Err(ConfigurationLoadingError::UnableToReadConfigurationFile { .. })
        ));
    }
}
