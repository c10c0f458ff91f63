//! `locale-resolve` entry point: parse flags, resolve one key, print it.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use locale_resolver_cli::cli::CommandLine;
use locale_resolver_cli::error::Result;
use locale_resolver_cli::{print_message, resolve_command};

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "LOCALE_RESOLVE_LOG";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = CommandLine::parse();
    let message = resolve_command(&cli)?;
    print_message(&message)?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
