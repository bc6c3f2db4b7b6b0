//! Location of the R executable inside an R home.

use std::path::{Path, PathBuf};

/// Name of the R front-end looked up on `PATH` when no home is known.
pub const DEFAULT_R_EXECUTABLE: &str = "R";

/// Get the path of the R executable used for `R CMD ...` invocations.
///
/// 64-bit Windows builds keep their binaries in `bin/x64`.
pub fn r_exec_path(r_home: &Path) -> PathBuf {
    if cfg!(all(windows, target_pointer_width = "64")) {
        r_home.join("bin").join("x64").join("R")
    } else {
        r_home.join("bin").join("R")
    }
}
