//! pfind - Parallel Filesystem Name Search
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use pfind::config::{CliArgs, SearchConfig};
use pfind::report::print_summary;
use pfind::walker::SearchCoordinator;
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<u8> {
    setup_logging(args.verbose);

    let config = SearchConfig::from_args(args).context("Invalid arguments")?;
    let show_summary = config.show_summary;

    let coordinator = SearchCoordinator::new(config);

    // Matches stream to stdout as they are found; diagnostics go to stderr
    let result = coordinator.run(io::stdout()).context("Search failed")?;

    if show_summary {
        print_summary(&result);
    }

    Ok(result.exit_code())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pfind=debug,warn")
    } else {
        EnvFilter::new("pfind=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
