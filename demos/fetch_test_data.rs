//! Fetch test data example
//!
//! This example downloads the files of a dependency manifest:
//! - Loading a connection file and a manifest
//! - Falling back to a second host when the first one fails
//! - Locating the downloaded files
//!
//! ```bash
//! cargo run --example fetch_test_data -- sync_webdav.conf test_file_list.txt [sync_irods.conf]
//! ```
//!
//! Relative file names are searched in `ELEMENTS_CONF_PATH`, then
//! `/usr/share/conf`, then the current directory.

use datasync::{DataSync, irods_is_installed, webdav_is_installed};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(connection_file), Some(manifest)) = (args.next(), args.next()) else {
        eprintln!("usage: fetch_test_data <connection file> <manifest> [fallback connection file]");
        std::process::exit(2);
    };
    let fallback = args.next();

    println!("wget installed: {}", webdav_is_installed());
    println!("iRODS iCommands installed: {}", irods_is_installed());

    let mut sync = DataSync::new(&connection_file, &manifest)?;
    println!(
        "Fetching {} file(s) from {} ({})",
        sync.dependencies().dependency_count(),
        sync.connection().host,
        sync.connection().host_url
    );

    match fallback {
        Some(fallback) => sync.download_with_fallback(fallback)?,
        None => sync.download()?,
    }

    for local in sync.dependencies().local_paths() {
        println!("  {}", local.display());
    }
    println!("Test data available under {}", sync.absolute_path("").display());

    Ok(())
}
