//! R version probe.

use std::path::Path;

use crate::util::process::CommandRunner;

use super::warning::first_line;

/// Ask the R executable for its version.
///
/// The first line of `R --version` (after any warning line) is returned
/// as-is; it is a display string, not a parsed version.
pub fn r_version(runner: &dyn CommandRunner, executable: &Path) -> Option<String> {
    match runner.run(executable, &["--version"]) {
        Ok(Some(output)) => first_line(&output),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("`R --version` failed: {}", e);
            None
        }
    }
}
