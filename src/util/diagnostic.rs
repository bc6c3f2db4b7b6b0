//! User-facing diagnostic messages.
//!
//! A diagnostic carries the problem, whatever R said about it, and how to
//! fix it. Recoverable problems found while building options are kept as
//! warnings; hard failures become errors at the CLI boundary.

use std::fmt::{self, Write};
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when R cannot be found at all.
    pub const SET_R_HOME: &str =
        "help: Set R_HOME to your R installation, or put the `R` executable on PATH";

    /// Suggestion when R is found but misbehaves.
    pub const CHECK_R_INSTALL: &str =
        "help: Run `R CMD config --all` by hand to check the R installation";

    /// Suggestion when a verbose rerun would help.
    pub const RERUN_VERBOSE: &str = "help: Run `rsituation --verbose` for more details";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }

    /// ANSI style for the label.
    fn style(self) -> &'static str {
        match self {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Note => "\x1b[1;36m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines, such as R's stderr
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location, usually the R executable
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Note, message)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Point at a file.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut output, color);
        output
    }

    fn write_to(&self, out: &mut impl Write, color: bool) -> fmt::Result {
        if color {
            write!(out, "{}{}\x1b[0m", self.severity.style(), self.severity)?;
        } else {
            write!(out, "{}", self.severity)?;
        }
        writeln!(out, ": {}", self.message)?;

        if let Some(path) = &self.location {
            writeln!(out, "  --> {}", path.display())?;
        }
        for line in &self.context {
            writeln!(out, "  = {}", line)?;
        }
        for suggestion in &self.suggestions {
            writeln!(out, "  {}", suggestion)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
