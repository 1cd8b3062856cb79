//! Tileforms - schema-driven dynamic forms for key/value tiles
//!
//! This binary lists tiles, projects them into JSON Forms triples, applies
//! edits through a validated edit session, and manages configuration.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tileforms::cli::{
    CheckIdArgs, CliResult, ConfigArgs, EditArgs, ListArgs, ProjectArgs, ValidateArgs,
};
use tileforms::constants::APP_BINARY_NAME;

/// Tileforms - schema-driven dynamic forms for key/value tiles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every tile as a card
    List(ListArgs),
    /// Print the JSON Forms triple of a tile
    Project(ProjectArgs),
    /// Edit fields of a tile and save
    Edit(EditArgs),
    /// Validate tile structure and field values
    Validate(ValidateArgs),
    /// Check a national ID number
    CheckId(CheckIdArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::List(args) => args.execute(),
            Self::Project(args) => args.execute(),
            Self::Edit(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::CheckId(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("For more options, run:");
        eprintln!("  {APP_BINARY_NAME} --help");
        std::process::exit(e.exit_code());
    }
}
