//! ICU MessageFormat parsing and rendering.
//!
//! The resolver talks to templates only through the [`TemplateEngine`] trait:
//! `parse` turns template text into a [`ParsedTemplate`] and `render` turns a
//! parsed template, a locale, and an interpolation [`Context`] into a
//! [`Message`]. [`IcuEngine`] is the bundled implementation.
//!
//! # Supported syntax
//!
//! | Construct | Example |
//! |-----------|---------|
//! | Argument | `Hello {name}!` |
//! | Number, date, time | `{total, number, percent}`, `{when, date, short}` |
//! | Plural | `{n, plural, offset:1 =0{none} one{# item} other{# items}}` |
//! | Ordinal | `{pos, selectordinal, one{#st} two{#nd} few{#rd} other{#th}}` |
//! | Select | `{kind, select, cat{Meow} other{...}}` |
//! | Tags | `Read the <link>guide</link>` |
//! | Escapes | `'{literal}'`, `It''s` |

mod ast;
mod format;
mod parser;
mod plural;
mod render;
mod value;

use std::sync::Arc;

use unic_langid::LanguageIdentifier;

pub use ast::{Branch, Element, ParsedTemplate, PluralKind, Selector};
pub use format::{FormatOptions, NumberStyle};
pub use parser::{MAX_NESTING, ParseError, ParseErrorKind, parse};
pub use render::{RenderError, render};
pub use value::{Context, Fragment, Message, TagFn, Value};

/// Parses and renders templates on behalf of the resolver.
///
/// Implementations must be reentrant: the resolver shares one engine between
/// threads and calls it without synchronisation.
pub trait TemplateEngine: Send + Sync {
    /// Parses template text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the text is not valid syntax.
    fn parse(&self, source: &str) -> Result<ParsedTemplate, ParseError>;

    /// Renders a parsed template for `locale`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when `context` does not supply what the
    /// template requires.
    fn render(
        &self,
        template: &ParsedTemplate,
        locale: &LanguageIdentifier,
        context: Option<&Context>,
        formats: &FormatOptions,
    ) -> Result<Message, RenderError>;
}

/// Bundled ICU MessageFormat engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcuEngine;

impl IcuEngine {
    /// Creates the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TemplateEngine for IcuEngine {
    fn parse(&self, source: &str) -> Result<ParsedTemplate, ParseError> {
        parse(source)
    }

    fn render(
        &self,
        template: &ParsedTemplate,
        locale: &LanguageIdentifier,
        context: Option<&Context>,
        formats: &FormatOptions,
    ) -> Result<Message, RenderError> {
        render(template, locale, context, formats)
    }
}

impl<E: TemplateEngine + ?Sized> TemplateEngine for Arc<E> {
    fn parse(&self, source: &str) -> Result<ParsedTemplate, ParseError> {
        (**self).parse(source)
    }

    fn render(
        &self,
        template: &ParsedTemplate,
        locale: &LanguageIdentifier,
        context: Option<&Context>,
        formats: &FormatOptions,
    ) -> Result<Message, RenderError> {
        (**self).render(template, locale, context, formats)
    }
}
