//! Test data synchronization entry point
//!
//! [`DataSync`] ties a connection file and a dependency manifest together and
//! downloads the listed files with the right synchronizer. When the main host
//! is down, [`DataSync::download_with_fallback`] retries once with another
//! connection file.

use crate::config::ConnectionConfiguration;
use crate::dependency::DependencyConfiguration;
use crate::error::Result;
use crate::synchronizer::{SynchronizerMaker, create_synchronizer};
use crate::utils::join_under;
use std::path::{Path, PathBuf};

/// Downloads the test data of a suite
///
/// ```no_run
/// use datasync::DataSync;
///
/// # fn main() -> datasync::Result<()> {
/// let mut sync = DataSync::new("sync_webdav.conf", "test_file_list.txt")?;
/// sync.download_with_fallback("sync_irods.conf")?;
/// let catalog = sync.absolute_path("catalog.fits");
/// # let _ = catalog;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DataSync {
    connection: ConnectionConfiguration,
    dependencies: DependencyConfiguration,
    maker: SynchronizerMaker,
}

impl DataSync {
    /// Load a connection file and a dependency manifest
    ///
    /// The manifest is rooted in the workspaces of this connection; a later
    /// fallback does not re-root it.
    ///
    /// # Errors
    ///
    /// Any error of [`ConnectionConfiguration::from_file`] or
    /// [`DependencyConfiguration::from_file`].
    pub fn new(connection_file: impl AsRef<Path>, dependency_file: impl AsRef<Path>) -> Result<Self> {
        let connection = ConnectionConfiguration::from_file(connection_file)?;
        let dependencies = DependencyConfiguration::from_file(
            &connection.distant_root,
            &connection.local_root,
            dependency_file,
        )?;
        Ok(Self::from_configurations(connection, dependencies))
    }

    /// Build from already parsed configurations
    pub fn from_configurations(
        connection: ConnectionConfiguration,
        dependencies: DependencyConfiguration,
    ) -> Self {
        Self {
            connection,
            dependencies,
            maker: create_synchronizer,
        }
    }

    /// Replace the synchronizer factory (defaults to [`create_synchronizer`])
    #[must_use]
    pub fn with_synchronizer_maker(mut self, maker: SynchronizerMaker) -> Self {
        self.maker = maker;
        self
    }

    /// Download every dependency with the current connection
    ///
    /// # Errors
    ///
    /// Whatever the synchronizer construction or download returns.
    pub fn download(&self) -> Result<()> {
        let synchronizer = (self.maker)(&self.connection, &self.dependencies)?;
        synchronizer.download_all_files()
    }

    /// Download, retrying once with another connection on failure
    ///
    /// On failure of the first attempt the connection is replaced by the one
    /// read from `connection_file`, and stays replaced afterwards.
    ///
    /// # Errors
    ///
    /// A parse error of the fallback connection file, or the error of the
    /// second attempt. The first error is only logged.
    pub fn download_with_fallback(&mut self, connection_file: impl AsRef<Path>) -> Result<()> {
        let Err(e) = self.download() else {
            return Ok(());
        };
        let connection_file = connection_file.as_ref();
        tracing::warn!(
            host = %self.connection.host,
            error = %e,
            fallback = %connection_file.display(),
            "Download failed, switching to fallback connection"
        );
        self.connection = ConnectionConfiguration::from_file(connection_file)?;
        tracing::info!(host = %self.connection.host, "Retrying download with fallback connection");
        self.download()
    }

    /// Local path of a test file
    ///
    /// Rooted like the manifest entries: an absolute `relative_path` still
    /// lands under the local root.
    #[must_use]
    pub fn absolute_path(&self, relative_path: impl AsRef<Path>) -> PathBuf {
        join_under(self.dependencies.local_root(), relative_path.as_ref())
    }

    /// Current connection
    #[must_use]
    pub fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    /// Dependency manifest
    #[must_use]
    pub fn dependencies(&self) -> &DependencyConfiguration {
        &self.dependencies
    }
}
