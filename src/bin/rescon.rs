//! Rescon CLI Binary
//!
//! Command-line interface for the resource catalog reconciliation pipeline.

use anyhow::Context;
use clap::Parser;
use rescon::logging::init_logging;
use rescon::tooling::cli::{Cli, CliContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let context = CliContext::new(cli.config.clone()).context("failed to load configuration")?;

    let mut logging = context.config().logging.clone();
    if let Some(level) = cli.log_level.as_ref() {
        logging.level = level.clone();
    }
    init_logging(&logging).context("failed to initialize logging")?;

    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}
