//! Build options for the current R installation.

use anyhow::{bail, Context, Result};

use crate::builder::BuildOptions;
use crate::runtime::HomeResolver;
use crate::util::config::Settings;
use crate::util::diagnostic::suggestions;
use crate::util::process::CommandRunner;

/// Resolve R's home and collect the options for compiling a C extension
/// against it.
///
/// Unlike the situation report, a missing home is an error here: there is
/// nothing to build against.
pub fn c_extension_options(
    runner: &dyn CommandRunner,
    settings: &Settings,
    resolver: &HomeResolver,
) -> Result<BuildOptions> {
    let Some(home) = resolver.resolve(runner) else {
        bail!("R home not found\n{}", suggestions::SET_R_HOME);
    };

    BuildOptions::from_runtime(runner, &home, &settings.ignore_libs).with_context(|| {
        format!(
            "failed to collect C extension flags for R at {}",
            home.display()
        )
    })
}

/// Render options as the compiler and linker command-line arguments they
/// stand for.
pub fn to_arguments(options: &BuildOptions) -> (Vec<String>, Vec<String>) {
    let compile = options
        .include_dirs
        .iter()
        .map(|dir| format!("-I{}", dir))
        .chain(options.extra_compile_args.iter().cloned())
        .collect();

    let link = options
        .library_dirs
        .iter()
        .map(|dir| format!("-L{}", dir))
        .chain(options.libraries.iter().map(|lib| format!("-l{}", lib)))
        .chain(options.extra_link_args.iter().cloned())
        .collect();

    (compile, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{EnvVarStrategy, SubprocessStrategy};
    use crate::test_support::{MockProcessOutput, MockRunner};
    use crate::util::config::Config;

    fn resolver(env_home: Option<&str>) -> HomeResolver {
        HomeResolver::with_strategies(vec![
            Box::new(EnvVarStrategy::with_value(env_home)),
            Box::new(SubprocessStrategy::default()),
        ])
    }

    #[test]
    fn test_no_home_is_an_error() {
        let runner = MockRunner::new();
        let settings = Settings::resolve(&Config::default(), |_| None);

        let err = c_extension_options(&runner, &settings, &resolver(None)).unwrap_err();
        assert!(err.to_string().contains("R home not found"));
    }

    #[test]
    fn test_config_failure_carries_context() {
        let mut runner = MockRunner::new();
        runner.expect_suffix(
            "CMD config --ldflags",
            MockProcessOutput::failure(1, "broken"),
        );
        let settings = Settings::resolve(&Config::default(), |_| None);

        let err = c_extension_options(&runner, &settings, &resolver(Some("/opt/R"))).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to collect C extension flags for R at /opt/R"));
        assert!(message.contains("broken"));
    }

    #[test]
    fn test_configured_ignore_set_applies() {
        let mut runner = MockRunner::new();
        runner
            .expect_suffix(
                "CMD config --ldflags",
                MockProcessOutput::success("-lR -lRblas -lm\n"),
            )
            .expect_suffix(
                "CMD config --cppflags",
                MockProcessOutput::success("-I/usr/share/R/include\n"),
            );
        let mut settings = Settings::resolve(&Config::default(), |_| None);
        settings.ignore_libs = vec!["R".to_string(), "Rblas".to_string()];

        let options = c_extension_options(&runner, &settings, &resolver(Some("/opt/R"))).unwrap();
        assert_eq!(options.libraries, vec!["m".to_string()]);
    }

    #[test]
    fn test_to_arguments() {
        let mut options = BuildOptions::new();
        options.include_dirs.push("/usr/share/R/include".to_string());
        options.library_dirs.push("/usr/lib/R/lib".to_string());
        options.libraries.push("R".to_string());
        options.extra_compile_args.push("-DNDEBUG".to_string());
        options.extra_link_args.push("-Wl,--export-dynamic".to_string());

        let (compile, link) = to_arguments(&options);
        assert_eq!(compile, vec!["-I/usr/share/R/include", "-DNDEBUG"]);
        assert_eq!(link, vec!["-L/usr/lib/R/lib", "-lR", "-Wl,--export-dynamic"]);
    }
}
