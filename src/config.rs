//! Connection configuration for datasync
//!
//! A connection file tells where the test data is hosted and how to fetch it.
//! It is a plain `key = value` file:
//!
//! ```text
//! host = WebDAV
//! host-url = https://data.example.org
//! user = tester
//! password = secret
//! overwrite = yes
//! distant-workspace = /project/test_data
//! local-workspace = /tmp/test_data
//! tries = 8
//! ```
//!
//! `host`, `distant-workspace` and `local-workspace` are required. The others
//! default to an empty string, except `overwrite` (default `no`) and `tries`
//! (default 4).
//!
//! Everything after a `#` is a comment, also at the end of a line, so values
//! cannot contain `#`. Quotes are kept as part of the value.

use crate::error::{Error, Result};
use crate::paths::{conf_file_path, local_workspace_prefix};
use crate::utils::join_under;
use ini::{Ini, ParseOption};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Keys recognized in a connection file
const KNOWN_KEYS: &[&str] = &[
    KEY_HOST,
    KEY_HOST_URL,
    KEY_USER,
    KEY_PASSWORD,
    KEY_OVERWRITE,
    KEY_DISTANT_WORKSPACE,
    KEY_LOCAL_WORKSPACE,
    KEY_TRIES,
];

const KEY_HOST: &str = "host";
const KEY_HOST_URL: &str = "host-url";
const KEY_USER: &str = "user";
const KEY_PASSWORD: &str = "password";
const KEY_OVERWRITE: &str = "overwrite";
const KEY_DISTANT_WORKSPACE: &str = "distant-workspace";
const KEY_LOCAL_WORKSPACE: &str = "local-workspace";
const KEY_TRIES: &str = "tries";

/// Default number of download tries handed to the transport tool
pub const DEFAULT_TRIES: u32 = 4;

const OVERWRITE_ALLOWED: &[&str] = &["true", "yes", "y"];
const OVERWRITE_FORBIDDEN: &[&str] = &["false", "no", "n"];

/// Test data hosting solution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataHost {
    /// iRODS data grid, accessed with the iCommands (`irsync`)
    Irods,
    /// WebDAV server, accessed with `wget`
    Webdav,
}

impl FromStr for DataHost {
    type Err = Error;

    /// Parse a hosting solution name, ignoring case
    fn from_str(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "irods" => Ok(DataHost::Irods),
            "webdav" => Ok(DataHost::Webdav),
            _ => Err(Error::UnknownHost(name.to_string())),
        }
    }
}

impl fmt::Display for DataHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataHost::Irods => f.write_str("iRODS"),
            DataHost::Webdav => f.write_str("WebDAV"),
        }
    }
}

/// What to do when a file to download already exists locally
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwritingPolicy {
    /// Keep the local file and skip the download (default)
    #[default]
    Abort,
    /// Download again and replace the local file
    Overwrite,
}

impl FromStr for OverwritingPolicy {
    type Err = Error;

    /// Parse an `overwrite` value: `true`/`yes`/`y` or `false`/`no`/`n`, ignoring case
    fn from_str(policy: &str) -> Result<Self> {
        let uncased = policy.to_lowercase();
        if OVERWRITE_ALLOWED.contains(&uncased.as_str()) {
            Ok(OverwritingPolicy::Overwrite)
        } else if OVERWRITE_FORBIDDEN.contains(&uncased.as_str()) {
            Ok(OverwritingPolicy::Abort)
        } else {
            Err(Error::UnknownOverwritingPolicy(policy.to_string()))
        }
    }
}

/// Connection to a test data host
///
/// Immutable once parsed. The password is never serialized and is redacted
/// from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfiguration {
    /// Hosting solution
    pub host: DataHost,

    /// Host URL, used by WebDAV (may be empty)
    #[serde(default)]
    pub host_url: String,

    /// User name (may be empty)
    #[serde(default)]
    pub user: String,

    /// Password (may be empty)
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Policy for local files that already exist
    #[serde(default)]
    pub overwriting_policy: OverwritingPolicy,

    /// Number of tries handed to the transport tool
    #[serde(default = "default_tries")]
    pub tries: u32,

    /// Root of the test data on the host
    pub distant_root: PathBuf,

    /// Root of the local copy, already prefixed with the local workspace prefix
    pub local_root: PathBuf,
}

impl ConnectionConfiguration {
    /// Parse a connection file
    ///
    /// The file name is resolved with [`conf_file_path`], and the local
    /// workspace is prefixed with [`local_workspace_prefix`].
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if the file cannot be located
    /// - [`Error::Io`] if it cannot be read
    /// - [`Error::Config`] for syntax errors, unknown, repeated or missing keys, bad `tries`
    /// - [`Error::UnknownHost`] / [`Error::UnknownOverwritingPolicy`] for bad values
    pub fn from_file(config_file: impl AsRef<Path>) -> Result<Self> {
        let path = conf_file_path(config_file)?;
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!(file = %path.display(), "Parsing connection configuration");
        Self::from_str_with_prefix(&content, &local_workspace_prefix())
    }

    /// Parse the content of a connection file with an explicit workspace prefix
    pub fn from_str_with_prefix(content: &str, workspace_prefix: &Path) -> Result<Self> {
        let values = read_key_values(content)?;
        let required = |key: &str| -> Result<&str> {
            values
                .get(key)
                .map(String::as_str)
                .ok_or_else(|| Error::config_key(key, format!("missing required option '{key}'")))
        };
        let optional = |key: &str| values.get(key).cloned().unwrap_or_default();

        let host: DataHost = required(KEY_HOST)?.parse()?;
        let overwriting_policy = match values.get(KEY_OVERWRITE) {
            Some(policy) => policy.parse()?,
            None => OverwritingPolicy::Abort,
        };
        let tries = match values.get(KEY_TRIES) {
            Some(tries) => parse_tries(tries)?,
            None => DEFAULT_TRIES,
        };
        let distant_root = PathBuf::from(required(KEY_DISTANT_WORKSPACE)?);
        let local_root = join_under(
            workspace_prefix,
            Path::new(required(KEY_LOCAL_WORKSPACE)?),
        );

        Ok(Self {
            host,
            host_url: optional(KEY_HOST_URL),
            user: optional(KEY_USER),
            password: optional(KEY_PASSWORD),
            overwriting_policy,
            tries,
            distant_root,
            local_root,
        })
    }

    /// Whether local files may be overwritten
    #[must_use]
    pub fn overwriting_allowed(&self) -> bool {
        self.overwriting_policy == OverwritingPolicy::Overwrite
    }
}

impl fmt::Debug for ConnectionConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("ConnectionConfiguration")
            .field("host", &self.host)
            .field("host_url", &self.host_url)
            .field("user", &self.user)
            .field("password", &password)
            .field("overwriting_policy", &self.overwriting_policy)
            .field("tries", &self.tries)
            .field("distant_root", &self.distant_root)
            .field("local_root", &self.local_root)
            .finish()
    }
}

/// Read the `key = value` pairs of a connection file
///
/// Escapes and quote handling are disabled so that values are taken
/// literally, apart from trailing `#` comments.
fn read_key_values(content: &str) -> Result<HashMap<String, String>> {
    let options = ParseOption {
        enabled_escape: false,
        enabled_quote: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options).map_err(|e| Error::Config {
        message: e.to_string(),
        key: None,
    })?;

    let mut values = HashMap::new();
    for (section, properties) in ini.iter() {
        for (key, value) in properties.iter() {
            let qualified = match section {
                Some(section) => format!("{section}.{key}"),
                None => key.to_string(),
            };
            if !KNOWN_KEYS.contains(&qualified.as_str()) {
                return Err(Error::config_key(
                    &qualified,
                    format!("unrecognised option '{qualified}'"),
                ));
            }
            if values
                .insert(qualified.clone(), strip_comment(value).to_string())
                .is_some()
            {
                return Err(Error::config_key(
                    &qualified,
                    format!("option '{qualified}' cannot be specified more than once"),
                ));
            }
        }
    }
    Ok(values)
}

/// Drop a trailing `# comment` and the blanks before it
fn strip_comment(value: &str) -> &str {
    match value.split_once('#') {
        Some((value, _comment)) => value.trim_end(),
        None => value,
    }
}

fn parse_tries(value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        Error::config_key(
            KEY_TRIES,
            format!("the argument ('{value}') for option 'tries' is invalid"),
        )
    })
}

fn default_tries() -> u32 {
    DEFAULT_TRIES
}
