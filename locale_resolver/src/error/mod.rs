//! Error types produced while building stores and resolving messages.

mod conversions;
mod types;

pub use types::{ErrorKind, PolicyError, ResolveError, ResolverError, StoreError};
