//! Probing an installed R runtime.
//!
//! Everything here talks to R through a
//! [`CommandRunner`](crate::util::process::CommandRunner):
//!
//! - `home`: where R is installed (`R_HOME`, `R RHOME`, registry)
//! - `version`: what `R --version` says
//! - `library`: where `libR` lives inside the home
//! - `config`: raw `R CMD config` output

pub mod config;
pub mod errors;
pub mod exec;
pub mod home;
pub mod library;
pub mod version;
pub mod warning;

pub use config::{fetch_config, get_r_libs, ConfigOutput};
pub use errors::RuntimeError;
pub use exec::{r_exec_path, DEFAULT_R_EXECUTABLE};
pub use home::{
    EnvVarStrategy, HomeProbe, HomeResolver, HomeStrategy, RegistryStrategy, SubprocessStrategy,
    R_HOME_ENV,
};
pub use library::shared_library_path;
pub use version::r_version;
pub use warning::{split_warning, WARNING_MARKER};
