//! fmtrc - Entry point
//!
//! Thin wrapper that parses arguments, installs logging and runs a command.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fmtrc_cli::{run, Cli};
use fmtrc_telemetry::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_config()).context("failed to initialize logging")?;
    info!(version = fmtrc_cli::VERSION, "fmtrc starting");

    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}
