use std::{
    collections::HashMap,
    env::current_dir,
    path::{Path, PathBuf},
};

use crate::{ConfigurationLoadingError, MissingDirectoryCreationError};


/// Returns the default configuration filepath, which is at
/// `{current directory}/data/configuration.toml`.
pub(crate) fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationLoadingError>
{
    let mut configuration_filepath = current_dir()
        .map_err(|error| ConfigurationLoadingError::UnableToDetermineCurrentDirectory { error })?;

    configuration_filepath.push("data/configuration.toml");

    Ok(configuration_filepath)
}


/// Replaces every occurrence of each placeholder key (e.g. `{BASE_DATA_DIRECTORY}`)
/// in the given path with its value.
pub(crate) fn replace_placeholders_in_path(
    path: &Path,
    placeholders: HashMap<&'static str, String>,
) -> PathBuf {
    let mut path_string = path.to_string_lossy().to_string();

    for (key, value) in placeholders {
        path_string = path_string.replace(key, &value);
    }

    PathBuf::from(path_string)
}


/// Creates `directory_path` (and its parents) unless it already exists.
pub(crate) fn create_directory_if_missing(
    directory_path: &Path,
) -> Result<(), MissingDirectoryCreationError> {
    if directory_path.exists() && !directory_path.is_dir() {
        return Err(MissingDirectoryCreationError::NotADirectory {
            path: directory_path.to_path_buf(),
        });
    }

    std::fs::create_dir_all(directory_path).map_err(|error| {
        MissingDirectoryCreationError::UnableToCreateDirectory {
            directory_path: directory_path.to_path_buf(),
            error,
        }
    })
}
