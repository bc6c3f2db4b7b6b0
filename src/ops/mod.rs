//! High-level operations.
//!
//! This module contains the implementation of rsituation commands.

pub mod flags;
pub mod situation;

pub use flags::{c_extension_options, to_arguments};
pub use situation::{
    situation, situation_with, CExtension, LibraryStatus, LibsReport, SituationReport,
};
