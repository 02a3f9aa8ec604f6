//! Configuration file lookup and local workspace prefix
//!
//! Connection files and dependency manifests are usually referenced by a name
//! relative to a configuration directory (e.g. `MyProject/sync.conf`). They are
//! looked up along the `ELEMENTS_CONF_PATH` search path, then in the system
//! default location, then relative to the current directory.
//!
//! The local workspace can be sandboxed under the `WORKSPACE` directory, which
//! continuous integration jobs set to keep downloaded data out of shared places.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the configuration search path
pub const CONF_PATH_VARIABLE: &str = "ELEMENTS_CONF_PATH";

/// Environment variable holding the local workspace prefix
pub const WORKSPACE_VARIABLE: &str = "WORKSPACE";

/// System-wide configuration directory, searched after `ELEMENTS_CONF_PATH`
pub const DEFAULT_CONF_DIR: &str = "/usr/share/conf";

#[cfg(unix)]
const PATH_SEPARATOR: char = ':';
#[cfg(not(unix))]
const PATH_SEPARATOR: char = ';';

/// Directories searched for configuration files, in order
///
/// The entries of `ELEMENTS_CONF_PATH` (empty entries dropped) followed by
/// [`DEFAULT_CONF_DIR`]. Directories are listed whether or not they exist.
#[must_use]
pub fn configuration_locations() -> Vec<PathBuf> {
    let mut locations: Vec<PathBuf> = std::env::var(CONF_PATH_VARIABLE)
        .map(|value| split_search_path(&value))
        .unwrap_or_default();
    locations.push(PathBuf::from(DEFAULT_CONF_DIR));
    locations
}

fn split_search_path(value: &str) -> Vec<PathBuf> {
    value
        .split(PATH_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Resolve a configuration file name to an existing file
///
/// Absolute paths are returned unchanged. Relative names are searched in
/// [`configuration_locations`] and then relative to the current directory.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] if no location holds the file.
///
/// # Examples
///
/// ```no_run
/// use datasync::paths::conf_file_path;
///
/// let path = conf_file_path("MyProject/sync.conf")?;
/// println!("using {}", path.display());
/// # Ok::<(), datasync::Error>(())
/// ```
pub fn conf_file_path(filename: impl AsRef<Path>) -> Result<PathBuf> {
    conf_file_path_in(filename, &configuration_locations())
}

/// Resolve a configuration file name against explicit search locations
///
/// Same rules as [`conf_file_path`], with `locations` replacing the
/// environment-derived search path.
pub fn conf_file_path_in(filename: impl AsRef<Path>, locations: &[PathBuf]) -> Result<PathBuf> {
    let filename = filename.as_ref();
    if filename.is_absolute() {
        return Ok(filename.to_path_buf());
    }

    if let Some(found) = locations
        .iter()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!(file = %filename.display(), found = %found.display(), "Resolved configuration file");
        return Ok(found);
    }

    if filename.is_file() {
        return Ok(filename.to_path_buf());
    }

    Err(Error::ConfigNotFound(filename.to_path_buf()))
}

/// Prefix under which local workspaces are created
///
/// Value of the `WORKSPACE` environment variable, or an empty path when it is
/// unset or not valid Unicode.
#[must_use]
pub fn local_workspace_prefix() -> PathBuf {
    std::env::var(WORKSPACE_VARIABLE)
        .map(PathBuf::from)
        .unwrap_or_default()
}
