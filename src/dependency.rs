//! Dependency manifests
//!
//! A dependency manifest lists the test files a suite needs, one per line,
//! relative to the distant and local workspace roots. A line can alias the
//! local copy by giving both names separated by a tab:
//!
//! ```text
//! file1.txt
//! dir/file3.txt
//! catalogs/catalog_v2.fits	catalog.fits
//! ```
//!
//! Lines are taken verbatim, without trimming or comment handling.

use crate::error::Result;
use crate::paths::conf_file_path;
use crate::utils::join_under;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Separator between the distant name and the local alias of a manifest line
pub const ALIAS_SEPARATOR: char = '\t';

/// Files a test suite depends on, keyed by local path
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyConfiguration {
    distant_root: PathBuf,
    local_root: PathBuf,
    file_map: BTreeMap<PathBuf, PathBuf>,
}

impl DependencyConfiguration {
    /// Create an empty configuration for the given roots
    pub fn new(distant_root: impl Into<PathBuf>, local_root: impl Into<PathBuf>) -> Self {
        Self {
            distant_root: distant_root.into(),
            local_root: local_root.into(),
            file_map: BTreeMap::new(),
        }
    }

    /// Parse a manifest file
    ///
    /// The file name is resolved with [`conf_file_path`]. Lines are read as
    /// raw bytes, so on Unix file names need not be valid UTF-8.
    ///
    /// # Errors
    ///
    /// [`crate::Error::ConfigNotFound`] if the manifest cannot be located,
    /// [`crate::Error::Io`] if it cannot be read.
    pub fn from_file(
        distant_root: impl Into<PathBuf>,
        local_root: impl Into<PathBuf>,
        config_file: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = conf_file_path(config_file)?;
        let file = std::fs::File::open(&path)?;
        let config = Self::from_reader(distant_root, local_root, std::io::BufReader::new(file))?;
        tracing::debug!(
            file = %path.display(),
            count = config.dependency_count(),
            "Parsed dependency manifest"
        );
        Ok(config)
    }

    /// Parse a manifest from any buffered reader, line by line
    ///
    /// # Errors
    ///
    /// [`crate::Error::Io`] if reading fails.
    pub fn from_reader(
        distant_root: impl Into<PathBuf>,
        local_root: impl Into<PathBuf>,
        mut reader: impl BufRead,
    ) -> Result<Self> {
        let mut config = Self::new(distant_root, local_root);
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            config.parse_configuration_line(line_from_bytes(&buffer));
        }
        Ok(config)
    }

    /// Parse the content of a manifest
    pub fn from_manifest(
        distant_root: impl Into<PathBuf>,
        local_root: impl Into<PathBuf>,
        content: &str,
    ) -> Self {
        let mut config = Self::new(distant_root, local_root);
        for line in content.lines() {
            config.parse_configuration_line(line);
        }
        config
    }

    /// Add the dependency described by one manifest line
    pub fn parse_configuration_line(&mut self, line: impl AsRef<OsStr>) {
        let line = line.as_ref();
        if self.line_has_alias(line) {
            self.parse_line_with_alias(line);
        } else {
            self.parse_line_without_alias(line);
        }
    }

    /// Whether a manifest line gives a local alias
    #[must_use]
    pub fn line_has_alias(&self, line: impl AsRef<OsStr>) -> bool {
        split_alias(line.as_ref()).is_some()
    }

    /// Add `distant<TAB>local`; everything after the first tab is the local name
    pub fn parse_line_with_alias(&mut self, line: impl AsRef<OsStr>) {
        let line = line.as_ref();
        let (distant, local) = split_alias(line).unwrap_or((line, line));
        self.insert(Path::new(distant), Path::new(local));
    }

    /// Add a file that has the same relative name on both sides
    pub fn parse_line_without_alias(&mut self, line: impl AsRef<OsStr>) {
        let line = Path::new(line.as_ref());
        self.insert(line, line);
    }

    /// Record `local_root/local -> distant_root/distant`, last write wins
    fn insert(&mut self, distant: &Path, local: &Path) {
        let distant_path = join_under(&self.distant_root, distant);
        let local_path = join_under(&self.local_root, local);
        if let Some(previous) = self.file_map.insert(local_path.clone(), distant_path.clone()) {
            tracing::warn!(
                local = %local_path.display(),
                previous = %previous.display(),
                distant = %distant_path.display(),
                "Local file listed twice in dependency manifest, keeping the last entry"
            );
        }
    }

    /// Map of local paths to distant paths
    #[must_use]
    pub fn file_map(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.file_map
    }

    /// Distant path of a local file, if it is a dependency
    #[must_use]
    pub fn distant_path_of(&self, local_file: &Path) -> Option<&Path> {
        self.file_map.get(local_file).map(PathBuf::as_path)
    }

    /// Number of dependencies
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.file_map.len()
    }

    /// Distant paths, in local path order
    #[must_use]
    pub fn distant_paths(&self) -> Vec<PathBuf> {
        self.file_map.values().cloned().collect()
    }

    /// Local paths, sorted
    #[must_use]
    pub fn local_paths(&self) -> Vec<PathBuf> {
        self.file_map.keys().cloned().collect()
    }

    /// Separator between a distant name and its local alias
    #[must_use]
    pub fn alias_separator(&self) -> char {
        ALIAS_SEPARATOR
    }

    /// Root of the distant paths
    #[must_use]
    pub fn distant_root(&self) -> &Path {
        &self.distant_root
    }

    /// Root of the local paths
    #[must_use]
    pub fn local_root(&self) -> &Path {
        &self.local_root
    }
}

/// Strip the `\n` or `\r\n` terminator of a raw manifest line
fn line_from_bytes(raw: &[u8]) -> OsString {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    bytes_to_os_string(line)
}

#[cfg(unix)]
fn bytes_to_os_string(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn bytes_to_os_string(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Split a line at its first alias separator
#[cfg(unix)]
fn split_alias(line: &OsStr) -> Option<(&OsStr, &OsStr)> {
    use std::os::unix::ffi::OsStrExt;
    let bytes = line.as_bytes();
    let at = bytes.iter().position(|&b| b == ALIAS_SEPARATOR as u8)?;
    Some((OsStr::from_bytes(&bytes[..at]), OsStr::from_bytes(&bytes[at + 1..])))
}

/// Split a line at its first alias separator
#[cfg(not(unix))]
fn split_alias(line: &OsStr) -> Option<(&OsStr, &OsStr)> {
    let (distant, local) = line.to_str()?.split_once(ALIAS_SEPARATOR)?;
    Some((OsStr::new(distant), OsStr::new(local)))
}
