//! Core data structures.
//!
//! This module contains the small closed sets of values used throughout
//! the crate:
//! - Host platform identification
//! - `R CMD config` query categories
//! - The FFI mode selected through the environment

pub mod category;
pub mod cffi;
pub mod platform;

pub use category::{FlagCategory, LibCategory};
pub use cffi::CffiMode;
pub use platform::Platform;
