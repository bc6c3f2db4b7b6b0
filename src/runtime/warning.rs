//! Leading warning lines in R's output.
//!
//! R prints `WARNING: ...` ahead of its real output when something about
//! the environment looks off (a locale that cannot be set, for instance).
//! Such a line is never a path or a flag.

/// Prefix marking a diagnostic line emitted by R.
pub const WARNING_MARKER: &str = "WARNING";

/// Split a leading warning line off `lines`.
///
/// Only the first line is inspected, and at most one line is removed.
pub fn split_warning<'a, S: AsRef<str>>(
    lines: &'a [S],
    marker: &str,
) -> (Option<&'a str>, &'a [S]) {
    match lines.split_first() {
        Some((first, rest)) if first.as_ref().starts_with(marker) => {
            (Some(first.as_ref()), rest)
        }
        _ => (None, lines),
    }
}

/// First meaningful line of a probe's output, trimmed.
///
/// Returns `None` when nothing but a warning (or nothing at all) was printed.
pub fn first_line(output: &str) -> Option<String> {
    let lines: Vec<&str> = output.lines().collect();
    let (_, rest) = split_warning(&lines, WARNING_MARKER);
    rest.first()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
}
