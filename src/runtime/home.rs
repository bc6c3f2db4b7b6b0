//! R home directory resolution.
//!
//! R's home (`R_HOME`) is found by trying strategies in a fixed order and
//! keeping the first non-empty answer:
//!
//! 1. The `R_HOME` environment variable
//! 2. `R RHOME`, using the R executable on `PATH`
//! 3. On Windows, `InstallPath` under `HKLM\Software\R-core\R`
//!
//! If every strategy comes up empty the home is `None`. That is a normal
//! outcome (R is simply not installed), not an error.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::Platform;
use crate::util::process::CommandRunner;

use super::exec::DEFAULT_R_EXECUTABLE;
use super::warning::first_line;

/// Environment variable naming the R home directory.
pub const R_HOME_ENV: &str = "R_HOME";

/// Registry key holding R's install path.
pub const REGISTRY_KEY: &str = "Software\\R-core\\R";

/// Registry value holding R's install path.
pub const REGISTRY_VALUE: &str = "InstallPath";

/// One way of finding R's home directory.
pub trait HomeStrategy {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Try to find the home directory.
    fn resolve(&self, runner: &dyn CommandRunner) -> Option<PathBuf>;
}

/// Reads the home directory from an environment variable.
///
/// The value is kept as an `OsString`, so a home that is not valid UTF-8
/// is still returned unchanged.
#[derive(Debug, Clone)]
pub struct EnvVarStrategy {
    value: Option<OsString>,
}

impl EnvVarStrategy {
    /// Snapshot `var` from the process environment.
    pub fn from_env(var: &str) -> Self {
        let value = std::env::var_os(var);
        if value.is_some() {
            tracing::debug!("{} is set", var);
        }
        EnvVarStrategy { value }
    }

    /// Use an already-known value.
    pub fn with_value(value: Option<&str>) -> Self {
        EnvVarStrategy {
            value: value.map(OsString::from),
        }
    }
}

impl HomeStrategy for EnvVarStrategy {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn resolve(&self, _runner: &dyn CommandRunner) -> Option<PathBuf> {
        self.value
            .as_ref()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

/// Asks a live R executable with `R RHOME`.
#[derive(Debug, Clone)]
pub struct SubprocessStrategy {
    executable: PathBuf,
}

impl SubprocessStrategy {
    pub fn new(executable: impl AsRef<Path>) -> Self {
        SubprocessStrategy {
            executable: executable.as_ref().to_path_buf(),
        }
    }
}

impl Default for SubprocessStrategy {
    fn default() -> Self {
        SubprocessStrategy::new(DEFAULT_R_EXECUTABLE)
    }
}

impl HomeStrategy for SubprocessStrategy {
    fn name(&self) -> &'static str {
        "R RHOME"
    }

    fn resolve(&self, runner: &dyn CommandRunner) -> Option<PathBuf> {
        match runner.run(&self.executable, &["RHOME"]) {
            Ok(Some(output)) => first_line(&output).map(PathBuf::from),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("`R RHOME` did not report a home: {}", e);
                None
            }
        }
    }
}

/// Reads `InstallPath` from the Windows registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryStrategy;

impl HomeStrategy for RegistryStrategy {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn resolve(&self, _runner: &dyn CommandRunner) -> Option<PathBuf> {
        r_home_from_registry()
    }
}

#[cfg(windows)]
fn r_home_from_registry() -> Option<PathBuf> {
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE};
    use winreg::RegKey;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = match hklm.open_subkey_with_flags(REGISTRY_KEY, KEY_QUERY_VALUE) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("registry key {} not readable: {}", REGISTRY_KEY, e);
            return None;
        }
    };

    match key.get_value::<String, _>(REGISTRY_VALUE) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("registry value {} not readable: {}", REGISTRY_VALUE, e);
            None
        }
    }
}

#[cfg(not(windows))]
fn r_home_from_registry() -> Option<PathBuf> {
    None
}

/// What a single strategy reported, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeProbe {
    pub strategy: &'static str,
    pub home: Option<PathBuf>,
}

/// Ordered chain of home strategies.
pub struct HomeResolver {
    strategies: Vec<Box<dyn HomeStrategy>>,
}

impl HomeResolver {
    /// The standard chain: `R_HOME`, then `R RHOME`, then (Windows only)
    /// the registry.
    pub fn new(executable: impl AsRef<Path>, platform: &Platform) -> Self {
        let mut strategies: Vec<Box<dyn HomeStrategy>> = vec![
            Box::new(EnvVarStrategy::from_env(R_HOME_ENV)),
            Box::new(SubprocessStrategy::new(executable)),
        ];
        if platform.has_registry() {
            strategies.push(Box::new(RegistryStrategy));
        }
        HomeResolver { strategies }
    }

    /// Build a chain from explicit strategies, tried in the given order.
    pub fn with_strategies(strategies: Vec<Box<dyn HomeStrategy>>) -> Self {
        HomeResolver { strategies }
    }

    /// Find R's home: the first strategy with an answer wins and the rest
    /// are not consulted.
    pub fn resolve(&self, runner: &dyn CommandRunner) -> Option<PathBuf> {
        for strategy in &self.strategies {
            if let Some(home) = strategy.resolve(runner) {
                tracing::debug!("R home from {}: {}", strategy.name(), home.display());
                return Some(home);
            }
            tracing::debug!("no R home from {}", strategy.name());
        }
        None
    }

    /// Run every strategy, without short-circuiting.
    pub fn probe_all(&self, runner: &dyn CommandRunner) -> Vec<HomeProbe> {
        self.strategies
            .iter()
            .map(|strategy| HomeProbe {
                strategy: strategy.name(),
                home: strategy.resolve(runner),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::test_support::{MockProcessOutput, MockRunner};

    /// Records how often it was consulted.
    struct CountingStrategy {
        hits: Rc<Cell<usize>>,
        answer: Option<&'static str>,
    }

    impl HomeStrategy for CountingStrategy {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn resolve(&self, _runner: &dyn CommandRunner) -> Option<PathBuf> {
            self.hits.set(self.hits.get() + 1);
            self.answer.map(PathBuf::from)
        }
    }

    #[test]
    fn test_env_var_wins_over_subprocess_and_registry() {
        let mut runner = MockRunner::new();
        runner.expect("R RHOME", MockProcessOutput::success("/from/subprocess\n"));
        let registry_hits = Rc::new(Cell::new(0));

        let resolver = HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::with_value(Some("/opt/R home/4.3"))),
            Box::new(SubprocessStrategy::default()),
            Box::new(CountingStrategy {
                hits: Rc::clone(&registry_hits),
                answer: Some("C:\\Program Files\\R"),
            }),
        ]);

        assert_eq!(
            resolver.resolve(&runner),
            Some(PathBuf::from("/opt/R home/4.3"))
        );
        assert!(runner.calls().is_empty());
        assert_eq!(registry_hits.get(), 0);
    }

    #[test]
    fn test_empty_env_var_falls_through() {
        let mut runner = MockRunner::new();
        runner.expect("R RHOME", MockProcessOutput::success("/usr/lib/R\n"));

        let resolver = HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::with_value(Some(""))),
            Box::new(SubprocessStrategy::default()),
        ]);

        assert_eq!(resolver.resolve(&runner), Some(PathBuf::from("/usr/lib/R")));
        assert_eq!(runner.calls(), vec!["R RHOME".to_string()]);
    }

    #[test]
    fn test_subprocess_skips_warning_line() {
        let mut runner = MockRunner::new();
        runner.expect(
            "R RHOME",
            MockProcessOutput::success("WARNING: ignoring environment value of R_HOME\n /usr/lib/R \n"),
        );

        let home = SubprocessStrategy::default().resolve(&runner);
        assert_eq!(home, Some(PathBuf::from("/usr/lib/R")));
    }

    #[test]
    fn test_subprocess_failure_is_absence() {
        let mut runner = MockRunner::new();
        runner.expect("R RHOME", MockProcessOutput::failure(2, "fatal"));

        assert_eq!(SubprocessStrategy::default().resolve(&runner), None);
    }

    #[test]
    fn test_registry_consulted_last() {
        let runner = MockRunner::new();
        let registry_hits = Rc::new(Cell::new(0));

        let resolver = HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::with_value(None)),
            Box::new(SubprocessStrategy::default()),
            Box::new(CountingStrategy {
                hits: Rc::clone(&registry_hits),
                answer: Some("C:\\R\\R-4.3.1"),
            }),
        ]);

        assert_eq!(resolver.resolve(&runner), Some(PathBuf::from("C:\\R\\R-4.3.1")));
        assert_eq!(registry_hits.get(), 1);
        assert_eq!(runner.calls(), vec!["R RHOME".to_string()]);
    }

    #[test]
    fn test_nothing_found_is_none() {
        let runner = MockRunner::new();
        let resolver = HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::with_value(None)),
            Box::new(SubprocessStrategy::default()),
        ]);

        assert_eq!(resolver.resolve(&runner), None);
    }

    #[test]
    fn test_probe_all_reports_every_strategy() {
        let mut runner = MockRunner::new();
        runner.expect("R RHOME", MockProcessOutput::success("/usr/lib/R\n"));

        let resolver = HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::with_value(Some("/opt/R"))),
            Box::new(SubprocessStrategy::default()),
        ]);

        let probes = resolver.probe_all(&runner);
        assert_eq!(
            probes,
            vec![
                HomeProbe {
                    strategy: "environment",
                    home: Some(PathBuf::from("/opt/R")),
                },
                HomeProbe {
                    strategy: "R RHOME",
                    home: Some(PathBuf::from("/usr/lib/R")),
                },
            ]
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_env_value_still_wins() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let var = "RSITUATION_TEST_NON_UTF8_R_HOME";
        let value = OsStr::from_bytes(b"/opt/R-\xff/4.3");
        std::env::set_var(var, value);

        let mut runner = MockRunner::new();
        runner.expect("R RHOME", MockProcessOutput::success("/usr/lib/R\n"));

        let resolver = HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::from_env(var)),
            Box::new(SubprocessStrategy::default()),
        ]);
        let home = resolver.resolve(&runner);
        std::env::remove_var(var);

        assert_eq!(home, Some(PathBuf::from(value)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_standard_chain_adds_registry_on_windows_only() {
        let linux = HomeResolver::new("R", &Platform::Linux);
        let windows = HomeResolver::new("R", &Platform::Windows);

        assert_eq!(linux.strategies.len(), 2);
        assert_eq!(windows.strategies.len(), 3);
        assert_eq!(windows.strategies[2].name(), "registry");
    }
}
