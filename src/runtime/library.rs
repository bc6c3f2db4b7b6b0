//! Location of the R shared library.

use std::path::{Path, PathBuf};

use crate::core::Platform;

use super::RuntimeError;

/// Get the path of `libR` inside an R home.
///
/// Only Linux and Darwin layouts are known; any other platform is a
/// configuration error.
pub fn shared_library_path(r_home: &Path, platform: &Platform) -> Result<PathBuf, RuntimeError> {
    let file_name = match platform {
        Platform::Linux => "libR.so",
        Platform::Darwin => "libR.dylib",
        other => {
            return Err(RuntimeError::UnsupportedPlatform {
                platform: other.to_string(),
            })
        }
    };
    Ok(r_home.join("lib").join(file_name))
}
