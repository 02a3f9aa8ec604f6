//! Error types for datasync
//!
//! Every fallible operation in the crate returns [`Result`]. The variants fall
//! into four groups:
//! - configuration errors (unknown host, bad overwrite policy, missing keys, files not found)
//! - unsupported transports (DSS)
//! - precondition failures (transport client not installed)
//! - download failures (the external tool left no usable file behind)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for datasync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for datasync
#[derive(Debug, Error)]
pub enum Error {
    /// The hosting solution named in a connection file is not supported
    #[error("I don't know this hosting solution: {0}")]
    UnknownHost(String),

    /// The `overwrite` value of a connection file is not a known policy
    #[error("I don't know this overwriting policy: {0}")]
    UnknownOverwritingPolicy(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "distant-workspace")
        key: Option<String>,
    },

    /// A configuration file could not be found on the configuration search path
    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The client tools of a hosting solution are not installed
    #[error("You are trying to use {0}, but it does not seem to be installed.")]
    ToolNotInstalled(String),

    /// External tool execution failed (wget, irsync, etc.)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// A file could not be downloaded
    #[error("Unable to download file: '{}' as: '{}'.", .distant.display(), .local.display())]
    DownloadFailed {
        /// Path of the file on the host
        distant: PathBuf,
        /// Path the file should have been written to
        local: PathBuf,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a configuration error tied to a key of the connection file
    pub(crate) fn config_key(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Whether the error comes from reading configuration rather than from a transfer
    ///
    /// Configuration errors are not fixed by trying again with the same files.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownHost(_)
                | Error::UnknownOverwritingPolicy(_)
                | Error::Config { .. }
                | Error::ConfigNotFound(_)
        )
    }

    /// Machine-readable error code, suitable for logs and reports
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::UnknownHost(_) => "unknown_host",
            Error::UnknownOverwritingPolicy(_) => "unknown_overwriting_policy",
            Error::Config { .. } => "config_error",
            Error::ConfigNotFound(_) => "config_not_found",
            Error::ToolNotInstalled(_) => "tool_not_installed",
            Error::ExternalTool(_) => "external_tool_error",
            Error::DownloadFailed { .. } => "download_failed",
            Error::Io(_) => "io_error",
        }
    }
}
