//! Fetching `R CMD config` output.

use std::path::Path;

use crate::core::LibCategory;
use crate::util::process::CommandRunner;

use super::exec::r_exec_path;
use super::warning::{split_warning, WARNING_MARKER};
use super::RuntimeError;

/// Lines printed by one `R CMD config <about>` query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOutput {
    /// Output lines, without the leading warning and without blank lines.
    pub lines: Vec<String>,

    /// Leading warning line R printed, if any.
    pub warning: Option<String>,
}

impl ConfigOutput {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Run `<r_home>/bin/R CMD config <about>` and split its output into lines.
///
/// A leading `WARNING` line is logged and removed. Empty output is an
/// error unless `allow_empty` is set. A non-zero exit from R is returned
/// as [`RuntimeError::CommandFailed`].
pub fn fetch_config(
    runner: &dyn CommandRunner,
    r_home: &Path,
    about: &str,
    allow_empty: bool,
) -> Result<ConfigOutput, RuntimeError> {
    let r_exec = r_exec_path(r_home);
    let args = ["CMD", "config", about];
    tracing::info!("{} {}", r_exec.display(), args.join(" "));

    let stdout = runner
        .run(&r_exec, &args)?
        .ok_or_else(|| RuntimeError::ExecutableNotFound {
            path: r_exec.clone(),
        })?;

    let lines: Vec<&str> = stdout.lines().collect();
    let (warning, rest) = split_warning(&lines, WARNING_MARKER);
    if let Some(warning) = warning {
        tracing::warn!("R emitting a warning: {}", warning);
    }

    let output = ConfigOutput {
        lines: rest
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect(),
        warning: warning.map(str::to_string),
    };

    if output.is_empty() && !allow_empty {
        return Err(RuntimeError::EmptyConfigOutput {
            category: about.to_string(),
        });
    }

    Ok(output)
}

/// Get the raw value of a library variable such as `LAPACK_LIBS`.
///
/// These are allowed to be empty.
pub fn get_r_libs(
    runner: &dyn CommandRunner,
    r_home: &Path,
    libs: LibCategory,
) -> Result<ConfigOutput, RuntimeError> {
    fetch_config(runner, r_home, libs.as_arg(), true)
}
