//! Synchronizer selection from the connection host

use super::irods::IrodsSynchronizer;
use super::traits::DataSynchronizer;
use super::webdav::WebdavSynchronizer;
use crate::config::{ConnectionConfiguration, DataHost};
use crate::dependency::DependencyConfiguration;
use crate::error::Result;

/// Factory building a synchronizer for a connection and its dependencies
pub type SynchronizerMaker =
    fn(&ConnectionConfiguration, &DependencyConfiguration) -> Result<Box<dyn DataSynchronizer>>;

/// Create the synchronizer matching `connection.host`
///
/// A new instance is built on every call.
///
/// # Errors
///
/// [`crate::Error::ToolNotInstalled`] for iRODS hosts without the iCommands.
pub fn create_synchronizer(
    connection: &ConnectionConfiguration,
    dependency: &DependencyConfiguration,
) -> Result<Box<dyn DataSynchronizer>> {
    tracing::debug!(host = %connection.host, "Creating synchronizer");
    let synchronizer: Box<dyn DataSynchronizer> = match connection.host {
        DataHost::Irods => Box::new(IrodsSynchronizer::new(connection, dependency)?),
        DataHost::Webdav => Box::new(WebdavSynchronizer::new(connection, dependency)),
    };
    Ok(synchronizer)
}
