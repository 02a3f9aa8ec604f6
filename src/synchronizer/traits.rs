//! The download loop shared by every hosting solution

use super::command::DownloadCommand;
use crate::config::ConnectionConfiguration;
use crate::error::{Error, Result};
use crate::utils::create_local_dir_of;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Output;

/// Trait for test data synchronizers
///
/// Implementations hold a connection and the dependency file map, and say how
/// to download one file through [`create_download_command`]. Everything else
/// is provided:
///
/// ```text
/// for each (local, distant) in file_map:
///     skip if local exists and overwriting is not allowed
///     build the command, create the local directory, run the command
///     fail unless local now exists and is not empty
/// ```
///
/// The first failure aborts the whole download; files after it are left
/// untouched.
///
/// [`create_download_command`]: DataSynchronizer::create_download_command
pub trait DataSynchronizer {
    /// Connection used for every file
    fn connection(&self) -> &ConnectionConfiguration;

    /// Local path to distant path of every dependency
    fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Build the command that downloads `distant_file` as `local_file`
    ///
    /// # Errors
    ///
    /// Implementations that cannot download anything (e.g. DSS) fail here.
    fn create_download_command(
        &self,
        distant_file: &Path,
        local_file: &Path,
    ) -> Result<DownloadCommand>;

    /// Download every dependency that should be written
    ///
    /// # Errors
    ///
    /// The first error of [`download_one_file`](DataSynchronizer::download_one_file).
    fn download_all_files(&self) -> Result<()> {
        let file_map = self.file_map();
        tracing::info!(
            synchronizer = self.name(),
            host = %self.connection().host,
            files = file_map.len(),
            "Synchronizing test data"
        );

        let mut downloaded = 0usize;
        let mut skipped = 0usize;
        for (local_file, distant_file) in file_map {
            if self.file_should_be_written(local_file) {
                self.download_one_file(distant_file, local_file)?;
                downloaded += 1;
            } else {
                tracing::debug!(
                    local = %local_file.display(),
                    "Local file already exists and overwriting is not allowed, skipping"
                );
                skipped += 1;
            }
        }

        tracing::info!(
            synchronizer = self.name(),
            downloaded,
            skipped,
            "Test data synchronized"
        );
        Ok(())
    }

    /// Whether a local file should be (re)written
    fn file_should_be_written(&self, local_file: &Path) -> bool {
        if !self.file_already_exists(local_file) {
            return true;
        }
        self.connection().overwriting_allowed()
    }

    /// Whether a local file already exists as a regular file
    fn file_already_exists(&self, local_file: &Path) -> bool {
        local_file.is_file()
    }

    /// Download one file and check that it arrived
    ///
    /// # Errors
    ///
    /// - whatever [`create_download_command`](DataSynchronizer::create_download_command) returns
    /// - [`Error::Io`] if the local directory cannot be created
    /// - [`Error::ExternalTool`] if the command cannot be started
    /// - [`Error::DownloadFailed`] if no non-empty local file was produced
    fn download_one_file(&self, distant_file: &Path, local_file: &Path) -> Result<()> {
        let command = self.create_download_command(distant_file, local_file)?;
        create_local_dir_of(local_file)?;

        tracing::debug!(command = %command, "Running download command");
        let output = command.to_command().output().map_err(|e| {
            Error::ExternalTool(format!("Failed to execute {}: {}", command.program(), e))
        })?;
        log_command_output(&command, &output);

        if !self.has_been_downloaded(distant_file, local_file) {
            return Err(Error::DownloadFailed {
                distant: distant_file.to_path_buf(),
                local: local_file.to_path_buf(),
            });
        }
        tracing::debug!(
            distant = %distant_file.display(),
            local = %local_file.display(),
            "Downloaded file"
        );
        Ok(())
    }

    /// Whether a local file exists and is not empty
    fn has_been_downloaded(&self, _distant_file: &Path, local_file: &Path) -> bool {
        local_file.is_file()
            && std::fs::metadata(local_file)
                .map(|metadata| metadata.len() > 0)
                .unwrap_or(false)
    }
}

fn log_command_output(command: &DownloadCommand, output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        tracing::debug!(program = command.program(), stdout = %stdout.trim_end(), "Download command finished");
    } else {
        tracing::warn!(
            program = command.program(),
            status = %output.status,
            stdout = %stdout.trim_end(),
            stderr = %stderr.trim_end(),
            "Download command exited with failure"
        );
    }
}
