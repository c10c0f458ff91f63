//! Locale-aware message resolution over ICU MessageFormat templates.
//!
//! A [`TranslationStore`] maps message keys to per-locale templates. A
//! [`Resolver`] bound to a default locale looks templates up, applies
//! fallback and missing-message rules according to a layered
//! [`ResolutionPolicy`], checks that top-level placeholders have values, and
//! renders the result through a [`TemplateEngine`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use locale_resolver::{CallOptions, Context, PolicyLayer, Resolver, TranslationStore};
//!
//! let store = Arc::new(TranslationStore::from_json_str(
//!     r#"{"greetings": {"en": "Hello {name}!", "da": "Hej {name}!"}}"#,
//! )?);
//! let resolver = Resolver::new(
//!     store,
//!     "de",
//!     PolicyLayer::new().strict(false).fallback_language("en"),
//! )?;
//!
//! let context = Context::new().with("name", "English");
//! assert_eq!(resolver.resolve("greetings", Some(&context), None)?, "Hello English!");
//!
//! let strict = CallOptions::with_settings(PolicyLayer::new().strict(true));
//! assert!(resolver.resolve("greetings", Some(&context), Some(&strict)).is_err());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod error;
mod fs;
mod localizer;
pub mod policy;
mod resolver;
mod result_ext;
pub mod store;
pub mod template;

pub use config::{ENV_PREFIX, ResolverSettings};
pub use error::{ErrorKind, PolicyError, ResolveError, ResolverError, StoreError};
pub use localizer::{Localizer, NoOpLocalizer};
pub use policy::{PolicyLayer, PolicyProvenance, ResolutionPolicy};
pub use resolver::{CallOptions, Resolver, create_resolver};
pub use result_ext::ResolveResultExt;
pub use store::{TemplateLookup, Translation, TranslationStore, TranslationStoreBuilder};
pub use template::{
    Context, FormatOptions, Fragment, IcuEngine, Message, NumberStyle, TemplateEngine, Value,
};
