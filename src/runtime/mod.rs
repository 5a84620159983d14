use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::Result;

mod commands;
mod settings;

pub use commands::{Outcome, execute};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = settings::load_settings();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &settings, &mut out)
}
