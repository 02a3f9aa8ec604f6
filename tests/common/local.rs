//! A synchronizer serving `file://` hosts with `cp`

use datasync::utils::join_under;
use datasync::{
    ConnectionConfiguration, DataSynchronizer, DependencyConfiguration, DownloadCommand, Result,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Copies `<host-url path>/<distant>` to the local file
pub struct CopySynchronizer {
    connection: ConnectionConfiguration,
    file_map: BTreeMap<PathBuf, PathBuf>,
}

impl CopySynchronizer {
    fn host_dir(&self) -> &Path {
        let url = &self.connection.host_url;
        Path::new(url.strip_prefix("file://").unwrap_or(url))
    }
}

impl DataSynchronizer for CopySynchronizer {
    fn connection(&self) -> &ConnectionConfiguration {
        &self.connection
    }

    fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.file_map
    }

    fn name(&self) -> &'static str {
        "copy"
    }

    fn create_download_command(
        &self,
        distant_file: &Path,
        local_file: &Path,
    ) -> Result<DownloadCommand> {
        Ok(DownloadCommand::new("cp")
            .arg(join_under(self.host_dir(), distant_file))
            .arg(local_file))
    }
}

/// Maker ignoring the host kind and copying with `cp`
pub fn copy_maker(
    connection: &ConnectionConfiguration,
    dependencies: &DependencyConfiguration,
) -> Result<Box<dyn DataSynchronizer>> {
    Ok(Box::new(CopySynchronizer {
        connection: connection.clone(),
        file_map: dependencies.file_map().clone(),
    }))
}
