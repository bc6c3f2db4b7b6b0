//! Configuration file support.
//!
//! Two configuration file locations are supported:
//! - Global: `~/.rsituation/config.toml` - User-wide defaults
//! - Project: `.rsituation/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. The merged file
//! and the environment are folded once into [`Settings`], which is then
//! passed explicitly to everything that needs it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_IGNORE_LIBS;
use crate::core::cffi::CFFI_MODE_ENV;
use crate::core::{CffiMode, Platform};
use crate::runtime::DEFAULT_R_EXECUTABLE;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".rsituation";

/// Environment variable listing extra R package directories.
pub const R_LIBS_ENV: &str = "R_LIBS";

/// Configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// R executable settings
    pub r: RConfig,

    /// C extension build settings
    pub build: BuildConfig,
}

/// R executable settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RConfig {
    /// Name or path of the R executable used for `R RHOME` and `R --version`
    pub executable: Option<String>,
}

/// C extension build settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Libraries dropped when `--ldflags` has no `-L` (defaults to `["R"]`)
    pub ignore_libs: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.r.executable.is_some() {
            self.r.executable = other.r.executable;
        }
        if other.build.ignore_libs.is_some() {
            self.build.ignore_libs = other.build.ignore_libs;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.rsituation/config.toml)
/// 2. Global config (~/.rsituation/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.rsituation).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.rsituation/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.rsituation/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// FFI mode from `RPY2_CFFI_MODE`
    pub cffi_mode: CffiMode,

    /// R executable used for probes that run before R's home is known
    pub r_executable: PathBuf,

    /// Libraries dropped by `add_lib` when no `-L` is present
    pub ignore_libs: Vec<String>,

    /// Host platform
    pub platform: Platform,

    /// Extra package directories from `R_LIBS`, reported as-is
    pub r_libs: Option<String>,
}

impl Settings {
    /// Fold configuration and environment into settings.
    ///
    /// `env` looks up an environment variable; pass `std::env::var(..).ok()`
    /// in production and a fixed map in tests.
    pub fn resolve<F>(config: &Config, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cffi_mode = CffiMode::parse_or(env(CFFI_MODE_ENV).as_deref(), CffiMode::default());

        let r_executable = config
            .r
            .executable
            .clone()
            .unwrap_or_else(|| DEFAULT_R_EXECUTABLE.to_string());

        let ignore_libs = config
            .build
            .ignore_libs
            .clone()
            .unwrap_or_else(|| DEFAULT_IGNORE_LIBS.iter().map(|s| s.to_string()).collect());

        Settings {
            cffi_mode,
            r_executable: PathBuf::from(r_executable),
            ignore_libs,
            platform: Platform::host(),
            r_libs: env(R_LIBS_ENV).filter(|v| !v.is_empty()),
        }
    }

    /// Load config files relative to `cwd` and read the process environment.
    pub fn load(cwd: &Path) -> Self {
        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(cwd));
        Settings::resolve(&config, |key| std::env::var(key).ok())
    }
}
