mod config;
mod main_lib;

use clap::{Parser, Subcommand};
use config::Config;
use main_lib::{build_dispatch, run_codes, run_quotes};

/// Sina quote feed and instrument catalog tool.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch quote snapshots and print them as JSON lines.
    Quotes {
        /// Instrument ids such as `sh601360` or `sz000555`.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Write `<segment>_stock.txt` for each market segment.
    Codes {
        /// Segment keys such as `sh_a` or `sz_a`.
        #[arg(required = true)]
        segments: Vec<String>,

        /// Read each catalog back after writing it.
        #[arg(long)]
        check: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let dispatch = build_dispatch(&config.log)?;

    tracing::dispatcher::with_default(&dispatch, || match &cli.command {
        Command::Quotes { ids } => run_quotes(&config, ids),
        Command::Codes { segments, check } => run_codes(&config, segments, *check),
    })
}
