//! FFI mode selection.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the FFI mode.
pub const CFFI_MODE_ENV: &str = "RPY2_CFFI_MODE";

/// How bindings to `libR` are built: compiled (API), loaded at runtime
/// (ABI), or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CffiMode {
    Api,
    #[default]
    Abi,
    Both,
}

impl CffiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CffiMode::Api => "API",
            CffiMode::Abi => "ABI",
            CffiMode::Both => "BOTH",
        }
    }

    /// Parse a mode case-insensitively, falling back to `default` for
    /// anything unrecognized (including an empty value).
    pub fn parse_or(value: Option<&str>, default: CffiMode) -> CffiMode {
        match value.map(|v| v.trim().to_uppercase()).as_deref() {
            Some("API") => CffiMode::Api,
            Some("ABI") => CffiMode::Abi,
            Some("BOTH") => CffiMode::Both,
            _ => default,
        }
    }
}

impl std::fmt::Display for CffiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
