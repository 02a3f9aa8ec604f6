//! Placeholder synchronizer for DSS hosts

use super::command::DownloadCommand;
use super::traits::DataSynchronizer;
use crate::config::ConnectionConfiguration;
use crate::dependency::DependencyConfiguration;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Synchronizer for DSS hosts, which are not supported
///
/// Building a download command always fails with [`Error::UnknownHost`], so
/// downloading any dependency fails. DSS is not a valid `host` value either;
/// this type only exists to be constructed explicitly.
#[derive(Debug)]
pub struct DssSynchronizer {
    connection: ConnectionConfiguration,
    file_map: BTreeMap<PathBuf, PathBuf>,
}

impl DssSynchronizer {
    /// Create a DSS synchronizer
    pub fn new(connection: &ConnectionConfiguration, dependency: &DependencyConfiguration) -> Self {
        Self {
            connection: connection.clone(),
            file_map: dependency.file_map().clone(),
        }
    }
}

impl DataSynchronizer for DssSynchronizer {
    fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.file_map
    }

    fn name(&self) -> &'static str {
        "dss"
    }

    fn create_download_command(
        &self,
        _distant_file: &Path,
        _local_file: &Path,
    ) -> Result<DownloadCommand> {
        Err(Error::UnknownHost("DSS".to_string()))
    }
}
