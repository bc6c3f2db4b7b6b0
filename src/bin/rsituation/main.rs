//! rsituation CLI - report how R is installed on this machine

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rsituation::util::diagnostic;
use rsituation::RuntimeError;

mod cli;
mod commands;

use cli::{Cli, Commands, ReportArgs};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "RSITUATION_LOG";

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<RuntimeError>() {
            Some(runtime) => {
                eprintln!("error: {}", e);
                diagnostic::emit(&runtime.to_diagnostic(), std::io::stderr().is_terminal());
            }
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("rsituation=debug")
        } else {
            EnvFilter::new("rsituation=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        None => commands::report::execute(ReportArgs::default(), cli.verbose),
        Some(Commands::Report(args)) => commands::report::execute(args, cli.verbose),
        Some(Commands::Home) => commands::home::execute(),
        Some(Commands::Flags(args)) => commands::flags::execute(args),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
    }
}
