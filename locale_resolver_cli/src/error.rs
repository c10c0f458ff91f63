//! Error types for the `locale-resolve` binary.
//!
//! Library failures are wrapped unchanged so `main` can report them through
//! `color-eyre` with their full source chain.
use std::io;

use locale_resolver::{ResolveError, ResolverError};
use thiserror::Error;

/// Errors raised by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings, store, or construction failures.
    #[error("failed to build resolver: {0}")]
    Resolver(#[from] ResolverError),
    /// The resolution itself failed.
    #[error("failed to resolve message: {0}")]
    Resolve(#[from] ResolveError),
    /// A command line argument could not be interpreted.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// Writing the message failed.
    #[error("failed to write message: {0}")]
    Io(#[from] io::Error),
}

/// Problems with a command line argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The argument has no `=`.
    #[error("argument '{0}' must have the form name=value")]
    MissingEquals(String),
    /// The name before `=` is blank.
    #[error("argument '{0}' has an empty name")]
    EmptyName(String),
    /// `--call-settings` is not valid JSON.
    #[error("--call-settings is not valid JSON: {0}")]
    CallSettings(String),
}

/// Convenience alias for fallible CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
