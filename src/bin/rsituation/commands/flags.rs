//! `rsituation flags` command

use anyhow::{Context, Result};

use crate::cli::FlagsArgs;
use rsituation::builder::join_args;
use rsituation::ops::{c_extension_options, to_arguments};
use rsituation::runtime::HomeResolver;
use rsituation::util::diagnostic;
use rsituation::util::{Settings, SystemRunner};

pub fn execute(args: FlagsArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let settings = Settings::load(&cwd);

    let resolver = HomeResolver::new(&settings.r_executable, &settings.platform);
    let options = c_extension_options(&SystemRunner, &settings, &resolver)?;

    for warning in options.warnings() {
        diagnostic::emit(warning, false);
    }

    if args.json {
        let json =
            serde_json::to_string_pretty(&options).context("failed to serialize build options")?;
        println!("{}", json);
        return Ok(());
    }

    let (compile, link) = to_arguments(&options);

    if !args.link {
        println!("{}", join_args(&compile).context("compile flag contains a NUL byte")?);
    }
    if !args.compile {
        println!("{}", join_args(&link).context("link flag contains a NUL byte")?);
    }

    Ok(())
}
