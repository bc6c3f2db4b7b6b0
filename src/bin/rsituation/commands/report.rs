//! `rsituation report` command

use anyhow::{Context, Result};

use crate::cli::ReportArgs;
use rsituation::ops::situation;
use rsituation::util::diagnostic::{self, suggestions, Diagnostic};
use rsituation::util::{Settings, SystemRunner};

pub fn execute(args: ReportArgs, verbose: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let settings = Settings::load(&cwd);

    let report = situation(&SystemRunner, &settings);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", report.display(verbose));
    }

    if report.r_home.is_none() {
        diagnostic::emit(
            &Diagnostic::note("R home not found").with_suggestion(suggestions::SET_R_HOME),
            false,
        );
    }

    // Exit with error code if R was found but its flags could not be read
    if !report.is_healthy() {
        if !verbose {
            eprintln!("{}", suggestions::RERUN_VERBOSE);
        }
        std::process::exit(1);
    }

    Ok(())
}
