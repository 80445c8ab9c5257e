//! `.env` file loading. The file only supplies overrides such as `LIRIK_ADMIN_TOKEN`.

use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum EnvironmentFileError {
    #[error("unable to load environment file")]
    UnableToLoad {
        #[source]
        error: dotenvy::Error,
    },
}


fn ignore_missing_file(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, EnvironmentFileError> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(EnvironmentFileError::UnableToLoad { error }),
    }
}


/// Loads `.env` from the current directory or one of its ancestors into the
/// process environment. Returns the path of the loaded file, or `None` if there is none.
///
/// A missing file is fine, a file that can't be read or parsed is an error.
pub fn load_environment_file() -> Result<Option<PathBuf>, EnvironmentFileError> {
    ignore_missing_file(dotenvy::dotenv())
}



#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn load_from(path: &Path) -> Result<Option<PathBuf>, EnvironmentFileError> {
        ignore_missing_file(dotenvy::from_path(path).map(|()| path.to_path_buf()))
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let directory = tempfile::tempdir().unwrap();

        assert!(load_from(&directory.path().join(".env")).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let directory = tempfile::tempdir().unwrap();
        let environment_file_path = directory.path().join(".env");
        std::fs::write(&environment_file_path, "LIRIK_MALFORMED_LINE oops\n").unwrap();

        assert!(matches!(
            load_from(&environment_file_path),
            Err(EnvironmentFileError::UnableToLoad { .. })
        ));
    }

    #[test]
    fn well_formed_file_is_loaded() {
        let directory = tempfile::tempdir().unwrap();
        let environment_file_path = directory.path().join(".env");
        std::fs::write(&environment_file_path, "LIRIK_ENVIRONMENT_FILE_TEST=loaded\n").unwrap();

        assert_eq!(
            load_from(&environment_file_path).unwrap().as_deref(),
            Some(environment_file_path.as_path())
        );
        assert_eq!(
            std::env::var("LIRIK_ENVIRONMENT_FILE_TEST").as_deref(),
            Ok("loaded")
        );
    }
}
