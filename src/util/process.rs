//! Subprocess execution utilities.
//!
//! Every probe of the R installation goes through a [`CommandRunner`]. A
//! runner distinguishes three outcomes:
//!
//! - the program ran and succeeded: `Ok(Some(stdout))`
//! - the program could not be launched at all: `Ok(None)`
//! - the program ran but exited non-zero: `Err(RuntimeError::CommandFailed)`

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::runtime::RuntimeError;

/// Something that can run a program and capture its standard output.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &Path, args: &[&str]) -> Result<Option<String>, RuntimeError>;
}

/// Runs real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<Option<String>, RuntimeError> {
        ProcessBuilder::new(program).args(args).capture()
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Execute the command and capture stdout as text.
    ///
    /// A spawn failure is demoted to `Ok(None)`; a non-zero exit is an error.
    /// The child and its pipes are consumed by `wait_with_output` on every
    /// path past a successful spawn.
    pub fn capture(&self) -> Result<Option<String>, RuntimeError> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!("could not launch `{}`: {}", self.display_command(), e);
                return Ok(None);
            }
        };

        let output = child
            .wait_with_output()
            .map_err(|source| RuntimeError::Wait {
                command: self.display_command(),
                source,
            })?;

        if !output.status.success() {
            return Err(RuntimeError::CommandFailed {
                command: self.display_command(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
