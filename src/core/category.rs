//! `R CMD config` query categories.

use serde::{Deserialize, Serialize};

/// Class of build flags requested from `R CMD config`.
///
/// The output of these queries is required to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagCategory {
    /// Linker flags (`--ldflags`)
    LdFlags,
    /// Preprocessor flags (`--cppflags`)
    CppFlags,
}

impl FlagCategory {
    /// All categories, in the order a build session consumes them.
    pub const ALL: [FlagCategory; 2] = [FlagCategory::LdFlags, FlagCategory::CppFlags];

    /// Get the argument passed to `R CMD config`.
    pub fn as_arg(&self) -> &'static str {
        match self {
            FlagCategory::LdFlags => "--ldflags",
            FlagCategory::CppFlags => "--cppflags",
        }
    }
}

impl std::fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl std::str::FromStr for FlagCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('-').to_lowercase().as_str() {
            "ldflags" => Ok(FlagCategory::LdFlags),
            "cppflags" => Ok(FlagCategory::CppFlags),
            _ => Err(format!(
                "invalid flag category '{}'; expected '--ldflags' or '--cppflags'",
                s
            )),
        }
    }
}

/// Library variables reported by `R CMD config`.
///
/// These may legitimately be empty when R uses its internal BLAS/LAPACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibCategory {
    #[serde(rename = "LAPACK_LIBS")]
    Lapack,
    #[serde(rename = "BLAS_LIBS")]
    Blas,
}

impl LibCategory {
    pub const ALL: [LibCategory; 2] = [LibCategory::Lapack, LibCategory::Blas];

    /// Get the variable name passed to `R CMD config`.
    pub fn as_arg(&self) -> &'static str {
        match self {
            LibCategory::Lapack => "LAPACK_LIBS",
            LibCategory::Blas => "BLAS_LIBS",
        }
    }
}

impl std::fmt::Display for LibCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_arg())
    }
}
