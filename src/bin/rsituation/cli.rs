//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// rsituation - locate R and the flags to build C extensions against it
#[derive(Parser)]
#[command(name = "rsituation")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report everything known about the R installation (default)
    Report(ReportArgs),

    /// Print R's home directory
    Home,

    /// Show compile/link flags for building a C extension against libR
    Flags(FlagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Default)]
pub struct ReportArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Print the build options as JSON
    #[arg(long)]
    pub json: bool,

    /// Show compile flags only
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
