//! Options for compiling C extensions against `libR`.

use std::path::Path;

use serde::Serialize;

use crate::core::FlagCategory;
use crate::runtime::RuntimeError;
use crate::util::diagnostic::Diagnostic;
use crate::util::process::CommandRunner;

use super::flags::{get_r_flags, ParsedFlags};

/// Libraries dropped by [`BuildOptions::add_lib`] when no `-L` is given.
///
/// Linking `-lR` without a search path would point at whatever `libR`
/// the system linker finds first.
pub const DEFAULT_IGNORE_LIBS: &[&str] = &["R"];

/// Accumulated include directories, libraries and passthrough arguments.
///
/// Values are appended in the order they are added and are never
/// deduplicated or reordered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildOptions {
    pub include_dirs: Vec<String>,
    pub library_dirs: Vec<String>,
    pub libraries: Vec<String>,
    pub extra_compile_args: Vec<String>,
    pub extra_link_args: Vec<String>,

    #[serde(skip)]
    warnings: Vec<Diagnostic>,
}

impl BuildOptions {
    /// Create empty options.
    pub fn new() -> Self {
        BuildOptions::default()
    }

    /// Collect the options for the R installation at `r_home`: linker flags
    /// first, then preprocessor flags.
    pub fn from_runtime<S: AsRef<str>>(
        runner: &dyn CommandRunner,
        r_home: &Path,
        ignore: &[S],
    ) -> Result<Self, RuntimeError> {
        let mut options = BuildOptions::new();

        let (flags, unknown) = get_r_flags(runner, r_home, FlagCategory::LdFlags)?;
        options.add_lib(&flags, &unknown, ignore);

        let (flags, unknown) = get_r_flags(runner, r_home, FlagCategory::CppFlags)?;
        options.add_include(&flags, &unknown);

        Ok(options)
    }

    /// Add include directories from parsed `--cppflags`.
    ///
    /// Unknown arguments always go to `extra_compile_args`.
    pub fn add_include(&mut self, flags: &ParsedFlags, unknown: &[String]) {
        if flags.include_dirs.is_empty() {
            self.warn("No include specified");
        } else {
            self.include_dirs.extend(flags.include_dirs.iter().cloned());
        }
        self.extra_compile_args.extend(unknown.iter().cloned());
    }

    /// Add libraries from parsed `--ldflags`.
    ///
    /// Without any `-L`, the `-l` names are used minus those in `ignore`.
    /// With `-L`, the search directories and *all* `-l` names are added and
    /// `ignore` is deliberately not applied: an explicit search path makes
    /// `-lR` resolve to the right library, and downstream builds rely on it
    /// being present. Unknown arguments always go to `extra_link_args`.
    pub fn add_lib<S: AsRef<str>>(&mut self, flags: &ParsedFlags, unknown: &[String], ignore: &[S]) {
        if flags.library_dirs.is_empty() {
            if flags.libraries.is_empty() {
                self.warn("No libraries as -l arguments to the compiler.");
            } else {
                self.libraries.extend(
                    flags
                        .libraries
                        .iter()
                        .filter(|lib| !ignore.iter().any(|i| i.as_ref() == lib.as_str()))
                        .cloned(),
                );
            }
        } else {
            self.library_dirs.extend(flags.library_dirs.iter().cloned());
            self.libraries.extend(flags.libraries.iter().cloned());
        }
        self.extra_link_args.extend(unknown.iter().cloned());
    }

    /// Warnings raised while adding flags, in order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.warnings.push(Diagnostic::warning(message));
    }
}
