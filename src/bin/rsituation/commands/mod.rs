//! Command implementations

pub mod completions;
pub mod flags;
pub mod home;
pub mod report;
