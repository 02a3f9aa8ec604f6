//! Structured external commands

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::{Command, Stdio};

#[derive(Clone, PartialEq, Eq)]
struct Arg {
    value: OsString,
    /// Replacement shown in place of a secret value
    shown: Option<String>,
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shown {
            Some(shown) => fmt::Debug::fmt(shown, f),
            None => fmt::Debug::fmt(&self.value, f),
        }
    }
}

/// A download command: a program and its argument vector
///
/// The command is run without a shell, so arguments containing spaces or
/// shell metacharacters reach the program unchanged. `Display` renders the
/// command line for logs, with secret arguments masked.
///
/// # Examples
///
/// ```
/// use datasync::synchronizer::DownloadCommand;
///
/// let command = DownloadCommand::new("wget")
///     .arg("--user=tester")
///     .secret_arg("--password=hunter2", "--password=***")
///     .arg("-O")
///     .arg("local file.fits");
///
/// assert_eq!(command.program(), "wget");
/// assert_eq!(command.to_string(), "wget --user=tester --password=*** -O local file.fits");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadCommand {
    program: String,
    args: Vec<Arg>,
}

impl DownloadCommand {
    /// Start a command running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, value: impl Into<OsString>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            shown: None,
        });
        self
    }

    /// Append an argument that must not appear in logs, shown as `shown`
    #[must_use]
    pub fn secret_arg(mut self, value: impl Into<OsString>, shown: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            shown: Some(shown.into()),
        });
        self
    }

    /// Program name
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, secrets included
    pub fn args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(|arg| arg.value.as_os_str())
    }

    /// Build the process to spawn
    ///
    /// Standard input is closed, standard output and error are left for the
    /// caller to configure.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.args()).stdin(Stdio::null());
        command
    }
}

impl fmt::Display for DownloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            match &arg.shown {
                Some(shown) => write!(f, " {shown}")?,
                None => write!(f, " {}", arg.value.to_string_lossy())?,
            }
        }
        Ok(())
    }
}
