//! # datasync
//!
//! Fetch the test data a test suite depends on from a remote host.
//!
//! ## Overview
//!
//! Two small files drive a synchronization:
//! - a **connection file** telling where the data is hosted (iRODS or WebDAV),
//!   with which credentials, and where to put it locally
//! - a **dependency manifest** listing the files to fetch, one per line,
//!   optionally aliased with a tab-separated local name
//!
//! Transfers are delegated to the host's command-line client (`irsync` for
//! iRODS, `wget` for WebDAV), which must be installed. Each file is checked
//! after its transfer; the first failure aborts the synchronization.
//!
//! ## Quick Start
//!
//! ```no_run
//! use datasync::DataSync;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Both files are searched in ELEMENTS_CONF_PATH, then /usr/share/conf
//!     let mut sync = DataSync::new("MyProject/sync_webdav.conf", "MyProject/test_files.txt")?;
//!
//!     // Try the WebDAV host, then the iRODS one if it fails
//!     sync.download_with_fallback("MyProject/sync_irods.conf")?;
//!
//!     let catalog = sync.absolute_path("catalogs/catalog.fits");
//!     println!("Test catalog at {}", catalog.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Connection configuration
pub mod config;
/// Synchronization facade with fallback
pub mod datasync;
/// Dependency manifests
pub mod dependency;
/// Error types
pub mod error;
/// Configuration file lookup
pub mod paths;
/// Synchronizers per hosting solution
pub mod synchronizer;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{ConnectionConfiguration, DataHost, OverwritingPolicy};
pub use datasync::DataSync;
pub use dependency::DependencyConfiguration;
pub use error::{Error, Result};
pub use synchronizer::{
    DataSynchronizer, DownloadCommand, DssSynchronizer, IrodsSynchronizer, SynchronizerMaker,
    WebdavSynchronizer, create_synchronizer, irods_is_installed, webdav_is_installed,
};
