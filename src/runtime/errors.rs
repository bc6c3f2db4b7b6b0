//! Errors raised while probing an R installation.
//!
//! Absence (no R home, no version) is never an error; it is an `Option`.
//! The variants here are the conditions worth halting on.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while locating R or reading its configuration.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum RuntimeError {
    #[error("the system \"{platform}\" is not supported")]
    #[diagnostic(
        code(rsituation::library::unsupported_platform),
        help("libR can only be located on Linux and Darwin")
    )]
    UnsupportedPlatform { platform: String },

    #[error("`R CMD config {category}` produced no output")]
    #[diagnostic(code(rsituation::config::empty_output))]
    EmptyConfigOutput { category: String },

    #[error("`{command}` failed with exit code {code:?}\n{stderr}")]
    #[diagnostic(code(rsituation::process::failed))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to wait for `{command}`")]
    #[diagnostic(code(rsituation::process::wait))]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("could not launch R executable `{}`", path.display())]
    #[diagnostic(
        code(rsituation::config::no_executable),
        help("Check that R_HOME points at a complete R installation")
    )]
    ExecutableNotFound { path: PathBuf },

    #[error("unbalanced quotes in `R CMD config {category}` output: {input}")]
    #[diagnostic(code(rsituation::flags::malformed))]
    MalformedFlags { category: String, input: String },
}

impl RuntimeError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RuntimeError::UnsupportedPlatform { platform } => {
                Diagnostic::error(format!("cannot locate libR on \"{}\"", platform))
                    .with_context("the shared library path is only known for Linux and Darwin")
            }

            RuntimeError::EmptyConfigOutput { category } => Diagnostic::error(format!(
                "`R CMD config {}` returned nothing",
                category
            ))
            .with_suggestion(suggestions::CHECK_R_INSTALL),

            RuntimeError::CommandFailed {
                command,
                code,
                stderr,
            } => {
                let mut diag = Diagnostic::error(format!("`{}` failed", command));
                if let Some(code) = code {
                    diag = diag.with_context(format!("exit code: {}", code));
                }
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    diag = diag.with_context(line.to_string());
                }
                diag.with_suggestion(suggestions::CHECK_R_INSTALL)
            }

            RuntimeError::Wait { command, source } => {
                Diagnostic::error(format!("lost track of `{}`", command))
                    .with_context(source.to_string())
            }

            RuntimeError::ExecutableNotFound { path } => {
                Diagnostic::error("R executable could not be launched")
                    .with_location(path)
                    .with_suggestion(suggestions::SET_R_HOME)
            }

            RuntimeError::MalformedFlags { category, input } => {
                Diagnostic::error(format!("could not split `R CMD config {}` output", category))
                    .with_context(format!("output: {}", input))
            }
        }
    }
}
