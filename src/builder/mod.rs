//! C extension build options.
//!
//! This module turns `R CMD config` output into the include directories,
//! libraries and extra arguments needed to compile and link against `libR`.

pub mod flags;
pub mod options;

pub use flags::{classify_args, get_r_flags, join_args, parse_flags, split_args, ParsedFlags};
pub use options::{BuildOptions, DEFAULT_IGNORE_LIBS};
