//! Host platform identification.

use serde::Serialize;

/// Operating system family, as far as locating R is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Platform {
    /// Linux and other ELF systems shipping `libR.so`
    Linux,
    /// macOS, shipping `libR.dylib`
    Darwin,
    /// Windows; R home may come from the registry
    Windows,
    /// Anything else, kept by name for error messages
    Other(String),
}

impl Platform {
    /// Detect the host platform from the compile-time target OS.
    pub fn host() -> Self {
        Platform::from_os(std::env::consts::OS)
    }

    /// Map an OS name (`std::env::consts::OS` style, or `uname -s` style)
    /// to a platform.
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::Darwin,
            "windows" | "win32" => Platform::Windows,
            _ => Platform::Other(os.to_string()),
        }
    }

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Linux => "Linux",
            Platform::Darwin => "Darwin",
            Platform::Windows => "Windows",
            Platform::Other(name) => name,
        }
    }

    /// Whether R's install path may be recorded in the Windows registry.
    pub fn has_registry(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}
