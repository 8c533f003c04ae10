//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// pkgs-observer - report upgradable packages to a pkgs.observer endpoint
#[derive(Parser, Debug)]
#[command(name = "pkgs-observer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the agent config file
    #[arg(short, long, global = true, env = "PKGS_OBSERVER_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect upgradable packages and send them to the ingest endpoint
    Report(ReportArgs),

    /// Show the detected distribution and package manager
    Detect(DetectArgs),

    /// List upgradable packages without reporting them
    List(ListArgs),

    /// Show version information
    Version(VersionArgs),
}

/// Options shared by commands that run the package manager
#[derive(Args, Debug, Default)]
pub struct InventoryArgs {
    /// Use this package manager instead of the detected one
    #[arg(long, value_name = "NAME")]
    pub manager: Option<String>,

    /// Kill the package manager after this many seconds (0 for no limit)
    #[arg(long, value_name = "SECONDS")]
    pub command_timeout: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Ingest endpoint URL (overrides INGEST_ENDPOINT)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Print the report instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Leave the machine id out of the report
    #[arg(long)]
    pub no_machine_id: bool,

    #[command(flatten)]
    pub inventory: InventoryArgs,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Use this package manager instead of the detected one
    #[arg(long, value_name = "NAME")]
    pub manager: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub inventory: InventoryArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
