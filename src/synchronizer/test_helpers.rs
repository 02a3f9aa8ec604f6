//! Shared test helpers: a synchronizer running local commands instead of transfers.

use super::{DataSynchronizer, DownloadCommand};
use crate::config::{ConnectionConfiguration, DataHost, OverwritingPolicy};
use crate::dependency::DependencyConfiguration;
use crate::error::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What the mock "download" command does
#[derive(Clone, Copy, Debug)]
pub(crate) enum MockBehavior {
    /// Write the distant path into the local file
    WriteDistantPath,
    /// Run successfully without writing anything
    DoNothing,
    /// Create the local file but leave it empty
    WriteEmptyFile,
    /// Run a program that does not exist
    MissingProgram,
}

/// Connection rooted in a test directory: `<root>/distant` and `<root>/local`
pub(crate) fn test_connection(root: &Path, policy: OverwritingPolicy) -> ConnectionConfiguration {
    ConnectionConfiguration {
        host: DataHost::Webdav,
        host_url: "https://data.example.org".to_string(),
        user: "tester".to_string(),
        password: "secret".to_string(),
        overwriting_policy: policy,
        tries: 8,
        distant_root: root.join("distant"),
        local_root: root.join("local"),
    }
}

pub(crate) struct MockSynchronizer {
    connection: ConnectionConfiguration,
    file_map: BTreeMap<PathBuf, PathBuf>,
    behavior: MockBehavior,
    requested: RefCell<Vec<PathBuf>>,
}

impl MockSynchronizer {
    pub(crate) fn new(
        connection: ConnectionConfiguration,
        files: &[&str],
        behavior: MockBehavior,
    ) -> Self {
        let dependencies = DependencyConfiguration::from_manifest(
            &connection.distant_root,
            &connection.local_root,
            &files.join("\n"),
        );
        Self::from_dependencies(connection, &dependencies, behavior)
    }

    pub(crate) fn from_dependencies(
        connection: ConnectionConfiguration,
        dependencies: &DependencyConfiguration,
        behavior: MockBehavior,
    ) -> Self {
        Self {
            connection,
            file_map: dependencies.file_map().clone(),
            behavior,
            requested: RefCell::new(Vec::new()),
        }
    }

    /// Number of download commands built so far
    pub(crate) fn commands_built(&self) -> usize {
        self.requested.borrow().len()
    }

    /// Whether a download command was built for this local file
    pub(crate) fn was_requested(&self, local_file: &Path) -> bool {
        self.requested.borrow().iter().any(|p| p == local_file)
    }
}

impl DataSynchronizer for MockSynchronizer {
    fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.file_map
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn create_download_command(
        &self,
        distant_file: &Path,
        local_file: &Path,
    ) -> Result<DownloadCommand> {
        self.requested.borrow_mut().push(local_file.to_path_buf());
        let command = match self.behavior {
            MockBehavior::WriteDistantPath => DownloadCommand::new("sh")
                .arg("-c")
                .arg("printf '%s' \"$1\" > \"$2\"")
                .arg("sh")
                .arg(distant_file)
                .arg(local_file),
            MockBehavior::DoNothing => DownloadCommand::new("true"),
            MockBehavior::WriteEmptyFile => DownloadCommand::new("touch").arg(local_file),
            MockBehavior::MissingProgram => {
                DownloadCommand::new("this-download-tool-does-not-exist-7c2e").arg(local_file)
            }
        };
        Ok(command)
    }
}
