//! Utility functions for file operations, path manipulation and external commands

use crate::error::Result;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

/// Join `path` under `root`, even when `path` is absolute
///
/// [`Path::join`] replaces the base with an absolute argument. Workspace roots
/// must never be dropped that way, so leading root and prefix components of
/// `path` are stripped first. An empty `root` leaves `path` untouched.
///
/// # Examples
///
/// ```
/// use datasync::utils::join_under;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(join_under(Path::new("/ci"), Path::new("/tmp")), PathBuf::from("/ci/tmp"));
/// assert_eq!(join_under(Path::new("/ci"), Path::new("data")), PathBuf::from("/ci/data"));
/// assert_eq!(join_under(Path::new(""), Path::new("/tmp")), PathBuf::from("/tmp"));
/// ```
#[must_use]
pub fn join_under(root: &Path, path: &Path) -> PathBuf {
    if root.as_os_str().is_empty() {
        return path.to_path_buf();
    }
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative)
}

/// Create the parent directory of a local file, if it is missing
///
/// A file name without a parent directory needs nothing.
pub fn create_local_dir_of(local_file: &Path) -> Result<()> {
    match local_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            std::fs::create_dir_all(dir)?;
            tracing::debug!(dir = %dir.display(), "Created local directory");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Run a program with arguments and report whether it exited successfully
///
/// Output is discarded. A program that cannot be found or started counts as a
/// failure. The program is located with the `which` crate first, so a missing
/// binary is detected without spawning anything.
#[must_use]
pub fn check_call(program: &str, args: &[&str]) -> bool {
    let Ok(binary) = which::which(program) else {
        tracing::debug!(program, "Program not found in PATH");
        return false;
    };
    Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Check whether `substrings` all occur in `input`, in this order
///
/// Each substring is searched from where the previous one was found, so a
/// substring may match the same text as its predecessor. An empty list always
/// matches.
///
/// # Examples
///
/// ```
/// use datasync::utils::contains_in_this_order;
///
/// assert!(contains_in_this_order("0 one Two THREE", &["one", "THR"]));
/// assert!(!contains_in_this_order("0 one Two THREE", &["Two", "one"]));
/// ```
#[must_use]
pub fn contains_in_this_order(input: &str, substrings: &[&str]) -> bool {
    let mut offset = 0;
    for substring in substrings {
        match input[offset..].find(substring) {
            Some(found) => offset += found,
            None => return false,
        }
    }
    true
}
