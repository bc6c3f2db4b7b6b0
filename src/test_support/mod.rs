//! Test utilities and mocks for unit tests.
//!
//! Provides a scripted [`CommandRunner`] so that probes of an R
//! installation can be tested without R being present.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{MockProcessOutput, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.expect("R --version", MockProcessOutput::success("R version 4.3.1"));
//!
//! // Pass `&runner` wherever a `&dyn CommandRunner` is expected...
//! ```

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::runtime::RuntimeError;
use crate::util::process::CommandRunner;

/// Mock output for a process execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProcessOutput {
    /// Whether the program could be launched at all.
    pub launched: bool,
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            launched: true,
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output with the given status code and stderr.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            launched: true,
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// A program that cannot be launched (not installed).
    pub fn not_found() -> Self {
        MockProcessOutput {
            launched: false,
            status: -1,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Command string ends with the given suffix.
    EndsWith(String),
}

impl CommandPattern {
    /// Check if a command matches this pattern.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::EndsWith(s) => cmd.ends_with(s.as_str()),
        }
    }
}

/// Scripted command runner.
///
/// Commands are matched against expectations in the order they were added.
/// A command with no matching expectation (and no default) behaves as if
/// the program were not installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    default_output: Option<MockProcessOutput>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expectations
            .push((CommandPattern::Exact(cmd.to_string()), output));
        self
    }

    /// Add an expectation for a command ending with `suffix`.
    pub fn expect_suffix(&mut self, suffix: &str, output: MockProcessOutput) -> &mut Self {
        self.expectations
            .push((CommandPattern::EndsWith(suffix.to_string()), output));
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    /// Get all commands that were run, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<Option<String>, RuntimeError> {
        let full_cmd = if args.is_empty() {
            program.display().to_string()
        } else {
            format!("{} {}", program.display(), args.join(" "))
        };

        self.calls.borrow_mut().push(full_cmd.clone());

        let output = self
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&full_cmd))
            .map(|(_, output)| output)
            .or(self.default_output.as_ref())
            .cloned()
            .unwrap_or_else(MockProcessOutput::not_found);

        if !output.launched {
            return Ok(None);
        }
        if output.status != 0 {
            return Err(RuntimeError::CommandFailed {
                command: full_cmd,
                code: Some(output.status),
                stderr: output.stderr,
            });
        }
        Ok(Some(output.stdout))
    }
}

/// Collects the message of every `WARN` event.
struct WarningCollector {
    warnings: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningCollector {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.warnings.lock().unwrap().push(visitor.0);
        }
    }
}

/// Run `f` and return its result with the warnings it logged, in order.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let warnings = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(WarningCollector {
        warnings: Arc::clone(&warnings),
    });

    let value = tracing::subscriber::with_default(subscriber, f);
    let warnings = warnings.lock().unwrap().clone();
    (value, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_expectations() {
        let mut runner = MockRunner::new();
        runner.expect("R --version", MockProcessOutput::success("R version 4.3.1"));
        runner.expect_suffix("CMD config --ldflags", MockProcessOutput::failure(1, "boom"));

        let out = runner.run(Path::new("R"), &["--version"]).unwrap();
        assert_eq!(out.as_deref(), Some("R version 4.3.1"));

        let err = runner
            .run(Path::new("/usr/lib/R/bin/R"), &["CMD", "config", "--ldflags"])
            .unwrap_err();
        assert!(matches!(err, RuntimeError::CommandFailed { code: Some(1), .. }));

        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_capture_warnings_ignores_other_levels() {
        let ((), warnings) = capture_warnings(|| {
            tracing::info!("not a warning");
            tracing::warn!("first {}", 1);
            tracing::warn!("second");
        });
        assert_eq!(warnings, vec!["first 1".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_mock_runner_unknown_command_not_found() {
        let runner = MockRunner::new();
        assert_eq!(runner.run(Path::new("R"), &["RHOME"]).unwrap(), None);
        assert_eq!(runner.calls(), vec!["R RHOME".to_string()]);
    }
}
