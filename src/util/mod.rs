//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod process;

pub use config::{Config, Settings};
pub use diagnostic::Diagnostic;
pub use process::{CommandRunner, SystemRunner};
