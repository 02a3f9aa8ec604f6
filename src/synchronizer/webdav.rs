//! WebDAV synchronizer using wget

use super::command::DownloadCommand;
use super::traits::DataSynchronizer;
use crate::config::ConnectionConfiguration;
use crate::dependency::DependencyConfiguration;
use crate::error::Result;
use crate::utils::check_call;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Whether wget is installed (`wget --help` succeeds)
#[must_use]
pub fn webdav_is_installed() -> bool {
    check_call("wget", &["--help"])
}

/// Synchronizer for WebDAV hosts
///
/// Files are fetched with:
///
/// ```text
/// wget --no-check-certificate --user=<user> --password=<password> \
///      -O <local> <host-url>/<distant> --tries <tries>
/// ```
///
/// Certificates are not checked; test data servers commonly use self-signed ones.
#[derive(Debug)]
pub struct WebdavSynchronizer {
    connection: ConnectionConfiguration,
    file_map: BTreeMap<PathBuf, PathBuf>,
}

impl WebdavSynchronizer {
    /// Create a WebDAV synchronizer
    pub fn new(connection: &ConnectionConfiguration, dependency: &DependencyConfiguration) -> Self {
        Self {
            connection: connection.clone(),
            file_map: dependency.file_map().clone(),
        }
    }

    fn url_of(&self, distant_file: &Path) -> String {
        format!("{}/{}", self.connection.host_url, distant_file.display())
    }
}

impl DataSynchronizer for WebdavSynchronizer {
    fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.file_map
    }

    fn name(&self) -> &'static str {
        "webdav"
    }

    fn create_download_command(
        &self,
        distant_file: &Path,
        local_file: &Path,
    ) -> Result<DownloadCommand> {
        Ok(DownloadCommand::new("wget")
            .arg("--no-check-certificate")
            .arg(format!("--user={}", self.connection.user))
            .secret_arg(
                format!("--password={}", self.connection.password),
                "--password=***",
            )
            .arg("-O")
            .arg(local_file)
            .arg(self.url_of(distant_file))
            .arg("--tries")
            .arg(self.connection.tries.to_string()))
    }
}
