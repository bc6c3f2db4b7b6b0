//! `rsituation home` command

use anyhow::{bail, Context, Result};

use rsituation::runtime::HomeResolver;
use rsituation::util::diagnostic::suggestions;
use rsituation::util::{Settings, SystemRunner};

pub fn execute() -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let settings = Settings::load(&cwd);

    let resolver = HomeResolver::new(&settings.r_executable, &settings.platform);
    match resolver.resolve(&SystemRunner) {
        Some(home) => {
            println!("{}", home.display());
            Ok(())
        }
        None => bail!("R home not found\n{}", suggestions::SET_R_HOME),
    }
}
