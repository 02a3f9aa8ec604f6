//! iRODS synchronizer using the iCommands

use super::command::DownloadCommand;
use super::traits::DataSynchronizer;
use crate::config::ConnectionConfiguration;
use crate::dependency::DependencyConfiguration;
use crate::error::{Error, Result};
use crate::utils::check_call;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Whether the iRODS iCommands are installed (`iget --help` succeeds)
#[must_use]
pub fn irods_is_installed() -> bool {
    check_call("iget", &["--help"])
}

/// Synchronizer for iRODS hosts
///
/// Files are fetched with `irsync i:<distant> <local>`. The iCommands must be
/// installed and an iRODS session initialized (`iinit`) beforehand.
#[derive(Debug)]
pub struct IrodsSynchronizer {
    connection: ConnectionConfiguration,
    file_map: BTreeMap<PathBuf, PathBuf>,
}

impl IrodsSynchronizer {
    /// Create an iRODS synchronizer
    ///
    /// # Errors
    ///
    /// [`Error::ToolNotInstalled`] if the iCommands are not available.
    pub fn new(
        connection: &ConnectionConfiguration,
        dependency: &DependencyConfiguration,
    ) -> Result<Self> {
        if !irods_is_installed() {
            return Err(Error::ToolNotInstalled("iRODS".to_string()));
        }
        Ok(Self::without_check(connection, dependency))
    }

    fn without_check(
        connection: &ConnectionConfiguration,
        dependency: &DependencyConfiguration,
    ) -> Self {
        Self {
            connection: connection.clone(),
            file_map: dependency.file_map().clone(),
        }
    }
}

impl DataSynchronizer for IrodsSynchronizer {
    fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.file_map
    }

    fn name(&self) -> &'static str {
        "irods"
    }

    fn create_download_command(
        &self,
        distant_file: &Path,
        local_file: &Path,
    ) -> Result<DownloadCommand> {
        let mut source = OsString::from("i:");
        source.push(distant_file);
        Ok(DownloadCommand::new("irsync").arg(source).arg(local_file))
    }
}
