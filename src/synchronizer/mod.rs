//! Test data synchronization
//!
//! This module downloads the files of a [`DependencyConfiguration`] from the
//! host of a [`ConnectionConfiguration`]. The transfer itself is delegated to
//! the command-line client of each hosting solution.
//!
//! ## Architecture
//!
//! The core abstraction is the [`DataSynchronizer`] trait. It provides the
//! download loop (skip existing files unless overwriting is allowed, create
//! local directories, run the transfer, check the result); implementations
//! only say how to build the transfer command:
//!
//! - [`IrodsSynchronizer`]: `irsync` from the iRODS iCommands
//! - [`WebdavSynchronizer`]: `wget`
//! - [`DssSynchronizer`]: placeholder, always fails with [`crate::Error::UnknownHost`]
//!
//! Commands are [`DownloadCommand`] argument vectors, never shell strings, so
//! paths and credentials are passed to the tools as-is.
//!
//! ## Usage
//!
//! ```no_run
//! use datasync::{ConnectionConfiguration, DependencyConfiguration};
//! use datasync::synchronizer::create_synchronizer;
//!
//! let connection = ConnectionConfiguration::from_file("MyProject/sync.conf")?;
//! let dependencies = DependencyConfiguration::from_file(
//!     &connection.distant_root,
//!     &connection.local_root,
//!     "MyProject/test_file_list.txt",
//! )?;
//! let synchronizer = create_synchronizer(&connection, &dependencies)?;
//! synchronizer.download_all_files()?;
//! # Ok::<(), datasync::Error>(())
//! ```
//!
//! [`ConnectionConfiguration`]: crate::config::ConnectionConfiguration
//! [`DependencyConfiguration`]: crate::dependency::DependencyConfiguration

mod command;
mod dss;
mod irods;
mod maker;
#[cfg(test)]
pub(crate) mod test_helpers;
mod traits;
mod webdav;

pub use command::DownloadCommand;
pub use dss::DssSynchronizer;
pub use irods::{IrodsSynchronizer, irods_is_installed};
pub use maker::{SynchronizerMaker, create_synchronizer};
pub use traits::DataSynchronizer;
pub use webdav::{WebdavSynchronizer, webdav_is_installed};
