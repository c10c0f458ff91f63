//! Localisation primitives for consumers that only need text lookup.
//!
//! `Localizer` abstracts string lookup so applications can hold a translation
//! backend behind `Arc<dyn Localizer>` without depending on the resolver's
//! error types. Implementations return `None` when no message can be
//! produced so callers can fall back to built-in text.

use std::sync::Arc;

use tracing::debug;

use crate::resolver::Resolver;
use crate::template::{Context, Message};

/// Provides localised messages for user-facing output.
///
/// The trait is object-safe, allowing applications to store it behind
/// `Arc<dyn Localizer>` and thread it through builders at runtime.
pub trait Localizer: Send + Sync {
    /// Performs a localisation lookup for the provided identifier.
    fn lookup(&self, id: &str, args: Option<&Context>) -> Option<Message>;

    /// Resolves the message and returns `fallback` when no translation exists.
    fn message(&self, id: &str, args: Option<&Context>, fallback: &str) -> Message {
        self.lookup(id, args)
            .unwrap_or_else(|| Message::from(fallback))
    }
}

/// Localiser that declines to translate messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLocalizer;

impl NoOpLocalizer {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Localizer for NoOpLocalizer {
    fn lookup(&self, _id: &str, _args: Option<&Context>) -> Option<Message> {
        None
    }
}

impl Localizer for Resolver {
    fn lookup(&self, id: &str, args: Option<&Context>) -> Option<Message> {
        match self.try_resolve(id, args, None) {
            Ok(message) => Some(message),
            Err(err) => {
                debug!(id, locale = self.locale(), error = %err, "localizer lookup failed");
                None
            }
        }
    }
}

impl<L: Localizer + ?Sized> Localizer for Arc<L> {
    fn lookup(&self, id: &str, args: Option<&Context>) -> Option<Message> {
        (**self).lookup(id, args)
    }
}
