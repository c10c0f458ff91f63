//! Library facade for the `locale-resolve` binary so integration tests can
//! reuse argument parsing and resolution without spawning a process.

pub mod cli;
pub mod error;

use std::io::{self, Write};

use locale_resolver::{Message, ResolverSettings};
use tracing::debug;

use crate::cli::CommandLine;
use crate::error::Result;

/// Loads settings, builds a resolver, and resolves the requested key.
///
/// # Errors
///
/// Returns a [`error::CliError`] when settings cannot be loaded, the
/// resolver cannot be built, an argument is malformed, or resolution fails
/// under a strict policy.
pub fn resolve_command(cli: &CommandLine) -> Result<Message> {
    let overrides = cli.settings_overrides();
    let settings = ResolverSettings::load_with_overrides(cli.config_path.as_deref(), &overrides)?;
    debug!(?settings, "effective settings");
    let resolver = settings.into_resolver()?;
    let context = cli.context()?;
    let options = cli.call_options()?;
    let message = resolver.resolve(&cli.key, Some(&context), options.as_ref())?;
    Ok(message)
}

/// Writes `message` as plain text followed by a newline.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_message(out: &mut impl Write, message: &Message) -> io::Result<()> {
    writeln!(out, "{message}")
}

/// Prints `message` to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_message(message: &Message) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_message(&mut stdout, message)
}
