//! Tests against real iRODS and WebDAV hosts
//!
//! Connection files and the manifest are taken from the environment (a `.env`
//! file is loaded first). Tests whose transport client is not installed, or
//! whose variables are missing, are skipped.
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --features live-tests --test live_sync -- --nocapture
//! ```
//!
//! # Environment variables
//!
//! - `DATASYNC_WEBDAV_CONF` - WebDAV connection file
//! - `DATASYNC_IRODS_CONF` - iRODS connection file
//! - `DATASYNC_MANIFEST` - dependency manifest listing files present on both hosts
#![cfg(feature = "live-tests")]

use datasync::{DataSync, irods_is_installed, webdav_is_installed};
use serial_test::serial;

const WEBDAV_CONF: &str = "DATASYNC_WEBDAV_CONF";
const IRODS_CONF: &str = "DATASYNC_IRODS_CONF";
const MANIFEST: &str = "DATASYNC_MANIFEST";

fn live_var(name: &str) -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(name).ok()
}

fn assert_all_downloaded(sync: &DataSync) {
    for local in sync.dependencies().local_paths() {
        let metadata = std::fs::metadata(&local)
            .unwrap_or_else(|e| panic!("{} was not downloaded: {e}", local.display()));
        assert!(metadata.len() > 0, "{} is empty", local.display());
    }
}

#[test]
#[serial]
fn webdav_download() {
    if !webdav_is_installed() {
        eprintln!("Skipping: wget is not installed");
        return;
    }
    let (Some(conf), Some(manifest)) = (live_var(WEBDAV_CONF), live_var(MANIFEST)) else {
        eprintln!("Skipping: {WEBDAV_CONF} or {MANIFEST} not set");
        return;
    };

    let sync = DataSync::new(&conf, &manifest).unwrap();
    sync.download().unwrap();

    assert_all_downloaded(&sync);
}

#[test]
#[serial]
fn irods_download() {
    if !irods_is_installed() {
        eprintln!("Skipping: iRODS iCommands are not installed");
        return;
    }
    let (Some(conf), Some(manifest)) = (live_var(IRODS_CONF), live_var(MANIFEST)) else {
        eprintln!("Skipping: {IRODS_CONF} or {MANIFEST} not set");
        return;
    };

    let sync = DataSync::new(&conf, &manifest).unwrap();
    sync.download().unwrap();

    assert_all_downloaded(&sync);
}

#[test]
#[serial]
fn webdav_with_irods_fallback() {
    if !webdav_is_installed() || !irods_is_installed() {
        eprintln!("Skipping: wget or iRODS iCommands are not installed");
        return;
    }
    let (Some(webdav), Some(irods), Some(manifest)) =
        (live_var(WEBDAV_CONF), live_var(IRODS_CONF), live_var(MANIFEST))
    else {
        eprintln!("Skipping: {WEBDAV_CONF}, {IRODS_CONF} or {MANIFEST} not set");
        return;
    };

    let mut sync = DataSync::new(&webdav, &manifest).unwrap();
    sync.download_with_fallback(&irods).unwrap();

    assert_all_downloaded(&sync);
}
