//! Parsing of `R CMD config` compiler and linker flags.
//!
//! The output is split the way a POSIX shell would split it, so quoted
//! paths containing spaces stay whole. Tokens are then sorted into the
//! three flags a C extension build cares about:
//!
//! - `-I<dir>`: include directory
//! - `-L<dir>`: library search directory
//! - `-l<name>`: library to link
//!
//! Everything else is kept, in order, as a passthrough argument.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::FlagCategory;
use crate::runtime::{fetch_config, RuntimeError};
use crate::util::process::CommandRunner;

/// Recognized `-I`, `-L` and `-l` values, in the order they appeared.
///
/// An empty list means the flag was not given at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFlags {
    /// `-I` values
    pub include_dirs: Vec<String>,

    /// `-L` values
    pub library_dirs: Vec<String>,

    /// `-l` values
    pub libraries: Vec<String>,
}

impl ParsedFlags {
    fn slot(&mut self, flag: &str) -> Option<&mut Vec<String>> {
        match flag {
            "-I" => Some(&mut self.include_dirs),
            "-L" => Some(&mut self.library_dirs),
            "-l" => Some(&mut self.libraries),
            _ => None,
        }
    }
}

/// Split a string into words using POSIX shell quoting rules.
///
/// Returns `None` if a quote is left open.
pub fn split_args(input: &str) -> Option<Vec<String>> {
    shlex::split(input)
}

/// Join words back into a single shell-quoted string.
///
/// Splitting the result with [`split_args`] gives back the same words.
/// Returns `None` if a word contains a NUL byte.
pub fn join_args(args: &[String]) -> Option<String> {
    shlex::try_join(args.iter().map(String::as_str)).ok()
}

/// Sort tokens into recognized flags and unknown arguments.
///
/// A flag may carry its value (`-I/usr/include`) or stand alone and take
/// the next token (`-I /usr/include`). A lone flag with no usable value
/// is kept as an unknown argument.
pub fn classify_args(tokens: Vec<String>) -> (ParsedFlags, Vec<String>) {
    let mut flags = ParsedFlags::default();
    let mut unknown = Vec::new();
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        let slot = match token.get(..2) {
            Some(prefix) => flags.slot(prefix),
            None => None,
        };
        let Some(values) = slot else {
            unknown.push(token);
            continue;
        };

        if token.len() > 2 {
            values.push(token[2..].to_string());
        } else if let Some(value) = tokens.next_if(|next| !next.starts_with('-')) {
            values.push(value);
        } else {
            unknown.push(token);
        }
    }

    (flags, unknown)
}

/// Parse the lines of one `R CMD config` query.
///
/// Lines are joined with spaces before splitting, so a quoted value may
/// not span lines.
pub fn parse_flags<S: AsRef<str>>(
    category: FlagCategory,
    lines: &[S],
) -> Result<(ParsedFlags, Vec<String>), RuntimeError> {
    let joined = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    let tokens = split_args(&joined).ok_or_else(|| RuntimeError::MalformedFlags {
        category: category.to_string(),
        input: joined.clone(),
    })?;

    Ok(classify_args(tokens))
}

/// Fetch and parse the flags of `category` from the R installation at
/// `r_home`.
pub fn get_r_flags(
    runner: &dyn CommandRunner,
    r_home: &Path,
    category: FlagCategory,
) -> Result<(ParsedFlags, Vec<String>), RuntimeError> {
    let output = fetch_config(runner, r_home, category.as_arg(), false)?;
    parse_flags(category, &output.lines)
}
