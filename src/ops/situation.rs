//! The situation report.
//!
//! The `report` command runs every probe against the current machine and
//! prints what it found: where R's home is according to each strategy,
//! which R is on `PATH`, where `libR` should be, and the flags a C
//! extension would be built with.
//!
//! ## Usage
//!
//! ```bash
//! rsituation report           # Human-readable report
//! rsituation report --verbose # Include executable path and BLAS/LAPACK
//! rsituation report --json    # Machine-readable report
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::builder::BuildOptions;
use crate::core::{CffiMode, LibCategory, Platform};
use crate::runtime::{
    get_r_libs, r_version, shared_library_path, HomeProbe, HomeResolver, RuntimeError,
};
use crate::util::config::Settings;
use crate::util::process::{find_executable, CommandRunner};

/// Where `libR` is expected to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LibraryStatus {
    /// Path computed and present on disk
    Found { path: PathBuf },
    /// Path computed but nothing there
    Missing { path: PathBuf },
    /// No known layout for this platform
    Unsupported { platform: String },
    /// R's home was not found, so there is nothing to look in
    NoHome,
}

/// Outcome of collecting C extension build options.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CExtension {
    Resolved {
        options: BuildOptions,
        warnings: Vec<String>,
    },
    NoHome,
    Failed {
        error: String,
    },
}

/// One `LAPACK_LIBS` / `BLAS_LIBS` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibsReport {
    pub variable: LibCategory,
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the probes found.
#[derive(Debug, Clone, Serialize)]
pub struct SituationReport {
    /// Version of this tool
    pub version: String,

    pub platform: Platform,

    pub cffi_mode: CffiMode,

    /// Each home strategy's own answer, in chain order
    pub home_probes: Vec<HomeProbe>,

    /// The home the chain settled on
    pub r_home: Option<PathBuf>,

    /// The R executable found on `PATH`
    pub r_executable: Option<PathBuf>,

    pub r_version: Option<String>,

    pub shared_library: LibraryStatus,

    /// Raw `R_LIBS` value
    pub r_libs: Option<String>,

    pub c_extension: CExtension,

    /// Empty when R's home was not found
    pub linear_algebra: Vec<LibsReport>,
}

impl SituationReport {
    /// Whether collecting C extension flags failed outright.
    pub fn is_healthy(&self) -> bool {
        !matches!(self.c_extension, CExtension::Failed { .. })
    }

    /// Render as text.
    pub fn display(&self, verbose: bool) -> ReportDisplay<'_> {
        ReportDisplay {
            report: self,
            verbose,
        }
    }
}

/// Run every probe with the standard home strategy chain.
pub fn situation(runner: &dyn CommandRunner, settings: &Settings) -> SituationReport {
    let resolver = HomeResolver::new(&settings.r_executable, &settings.platform);
    situation_with(runner, settings, &resolver)
}

/// Run every probe with an explicit home strategy chain.
pub fn situation_with(
    runner: &dyn CommandRunner,
    settings: &Settings,
    resolver: &HomeResolver,
) -> SituationReport {
    // The chain's answer is the first strategy that found something, taken
    // from the same probes the report lists.
    let home_probes = resolver.probe_all(runner);
    let r_home = home_probes.iter().find_map(|probe| probe.home.clone());

    let r_executable = settings
        .r_executable
        .to_str()
        .and_then(find_executable);
    let version = r_version(runner, &settings.r_executable);

    let shared_library = match &r_home {
        None => LibraryStatus::NoHome,
        Some(home) => match shared_library_path(home, &settings.platform) {
            Ok(path) if path.exists() => LibraryStatus::Found { path },
            Ok(path) => LibraryStatus::Missing { path },
            Err(RuntimeError::UnsupportedPlatform { platform }) => {
                LibraryStatus::Unsupported { platform }
            }
            Err(e) => LibraryStatus::Unsupported {
                platform: e.to_string(),
            },
        },
    };

    let c_extension = match &r_home {
        None => CExtension::NoHome,
        Some(home) => match BuildOptions::from_runtime(runner, home, &settings.ignore_libs) {
            Ok(options) => {
                let warnings = options
                    .warnings()
                    .iter()
                    .map(|w| w.message.clone())
                    .collect();
                CExtension::Resolved { options, warnings }
            }
            Err(e) => {
                tracing::debug!("collecting C extension flags failed: {}", e);
                CExtension::Failed {
                    error: e.to_string(),
                }
            }
        },
    };

    let linear_algebra = match &r_home {
        None => Vec::new(),
        Some(home) => LibCategory::ALL
            .iter()
            .map(|&variable| match get_r_libs(runner, home, variable) {
                Ok(output) => LibsReport {
                    variable,
                    lines: output.lines,
                    error: None,
                },
                Err(e) => LibsReport {
                    variable,
                    lines: Vec::new(),
                    error: Some(e.to_string()),
                },
            })
            .collect(),
    };

    SituationReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: settings.platform.clone(),
        cffi_mode: settings.cffi_mode,
        home_probes,
        r_home,
        r_executable,
        r_version: version,
        shared_library,
        r_libs: settings.r_libs.clone(),
        c_extension,
        linear_algebra,
    }
}

fn probe_label(strategy: &str) -> &str {
    match strategy {
        "environment" => "Environment variable R_HOME",
        "R RHOME" => "Calling `R RHOME`",
        "registry" => "InstallPath in the registry",
        other => other,
    }
}

fn or_none<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// Text rendering of a [`SituationReport`].
pub struct ReportDisplay<'a> {
    report: &'a SituationReport,
    verbose: bool,
}

impl fmt::Display for ReportDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        let title = format!("rsituation {}", report.version);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}\n", "=".repeat(title.len()))?;

        writeln!(f, "Platform: {}", report.platform)?;
        writeln!(f, "CFFI mode: {}", report.cffi_mode)?;
        writeln!(f)?;

        writeln!(f, "Looking for R's HOME:")?;
        for probe in &report.home_probes {
            writeln!(
                f,
                "    {}: {}",
                probe_label(probe.strategy),
                or_none(probe.home.as_ref().map(|h| h.display()))
            )?;
        }
        writeln!(
            f,
            "  Using: {}",
            or_none(report.r_home.as_ref().map(|h| h.display()))
        )?;
        writeln!(f)?;

        writeln!(f, "R version:")?;
        writeln!(f, "    In the PATH: {}", or_none(report.r_version.as_deref()))?;
        if self.verbose {
            writeln!(
                f,
                "    Executable: {}",
                or_none(report.r_executable.as_ref().map(|p| p.display()))
            )?;
        }
        match &report.shared_library {
            LibraryStatus::Found { path } => {
                writeln!(f, "    Shared library: {} [OK]", path.display())?
            }
            LibraryStatus::Missing { path } => {
                writeln!(f, "    Shared library: {} [!!] not found", path.display())?
            }
            LibraryStatus::Unsupported { platform } => writeln!(
                f,
                "    Shared library: unknown location on \"{}\"",
                platform
            )?,
            LibraryStatus::NoHome => writeln!(f, "    Shared library: None")?,
        }
        writeln!(f)?;

        writeln!(f, "Additional directories to load R packages from:")?;
        writeln!(f, "    {}", or_none(report.r_libs.as_deref()))?;
        writeln!(f)?;

        writeln!(f, "C extension compilation:")?;
        match &report.c_extension {
            CExtension::Resolved { options, warnings } => {
                let sections: [(&str, &[String]); 5] = [
                    ("include", options.include_dirs.as_slice()),
                    ("library_dirs", options.library_dirs.as_slice()),
                    ("libraries", options.libraries.as_slice()),
                    ("extra_compile_args", options.extra_compile_args.as_slice()),
                    ("extra_link_args", options.extra_link_args.as_slice()),
                ];
                for (name, values) in sections {
                    writeln!(f, "  {}:", name)?;
                    writeln!(f, "    {:?}", values)?;
                }
                for warning in warnings {
                    writeln!(f, "  warning: {}", warning)?;
                }
            }
            CExtension::NoHome => {
                writeln!(f, "  Warning: R home not found; flags cannot be queried.")?
            }
            CExtension::Failed { error } => {
                for line in error.lines() {
                    writeln!(f, "  [!!] {}", line)?;
                }
            }
        }

        if self.verbose && !report.linear_algebra.is_empty() {
            writeln!(f)?;
            writeln!(f, "Linear algebra:")?;
            for libs in &report.linear_algebra {
                match &libs.error {
                    Some(error) => writeln!(f, "    {}: [!!] {}", libs.variable, error)?,
                    None => writeln!(f, "    {}: {}", libs.variable, libs.lines.join(" "))?,
                }
            }
        }

        Ok(())
    }
}
