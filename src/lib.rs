//! rsituation - locate an R installation and the flags needed to build
//! C extensions against it.
//!
//! This crate provides the core library functionality: resolving R's home
//! directory, probing the R executable, fetching and parsing the output of
//! `R CMD config`, and accumulating it into [`BuildOptions`].

pub mod builder;
pub mod core;
pub mod ops;
pub mod runtime;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides a scripted [`CommandRunner`](util::process::CommandRunner) so
/// probes can be exercised without an R installation.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildOptions, ParsedFlags};
pub use core::{CffiMode, FlagCategory, LibCategory, Platform};
pub use runtime::{HomeResolver, RuntimeError};
pub use util::config::Settings;
