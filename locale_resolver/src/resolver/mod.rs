//! The resolution state machine.
//!
//! A [`Resolver`] is bound to a shared [`TranslationStore`], a default locale,
//! and a construction-time policy layer. Each call merges the built-in
//! defaults, the construction layer, and an optional per-call layer, then
//! walks lookup, fallback, missing-message substitution, parsing, placeholder
//! validation, and rendering. Failures are classified as [`ResolveError`]
//! values and the strict/lenient decision is applied once at the end.

mod validate;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, trace};
use unic_langid::LanguageIdentifier;

use crate::policy::{self, PolicyLayer, ResolutionPolicy};
use crate::result_ext::ResolveResultExt;
use crate::store::{TemplateLookup, Translation, TranslationStore};
use crate::template::{Context, FormatOptions, IcuEngine, Message, TemplateEngine};
use crate::{ResolveError, ResolverError};

/// Per-call overrides for formatting and policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Named number, date, and time styles for this call.
    pub formats: FormatOptions,
    /// Policy fields that override the resolver's configuration.
    pub settings: PolicyLayer,
}

impl CallOptions {
    /// Options that only override policy fields.
    #[must_use]
    pub fn with_settings(settings: PolicyLayer) -> Self {
        Self {
            formats: FormatOptions::default(),
            settings,
        }
    }

    /// Options that only override formatting styles.
    #[must_use]
    pub fn with_formats(formats: FormatOptions) -> Self {
        Self {
            formats,
            settings: PolicyLayer::new(),
        }
    }
}

/// Resolves message keys to rendered messages for one default locale.
///
/// Resolvers are cheap to clone and safe to share between threads; the
/// store and engine sit behind `Arc`s and nothing is mutated per call.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use locale_resolver::{Context, PolicyLayer, Resolver, TranslationStore};
///
/// let store = TranslationStore::from_json_str(
///     r#"{"greetings": {"en": "Hello {name}!", "da": "Hej {name}!"}}"#,
/// )?;
/// let resolver = Resolver::new(Arc::new(store), "en", PolicyLayer::new())?;
///
/// let context = Context::new().with("name", "World");
/// let message = resolver.resolve("greetings", Some(&context), None)?;
/// assert_eq!(message, "Hello World!");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Resolver {
    store: Arc<TranslationStore>,
    locale: String,
    language: LanguageIdentifier,
    defaults: PolicyLayer,
    construction: PolicyLayer,
    policy: ResolutionPolicy,
    engine: Arc<dyn TemplateEngine>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("locale", &self.locale)
            .field("keys", &self.store.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Binds a resolver to `store` and `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::InvalidLocale`] when `locale`, or the
    /// construction fallback language, is not a valid language identifier,
    /// and [`ResolverError::Policy`] when `construction` does not merge into a
    /// valid policy. The store need not list either locale.
    pub fn new(
        store: Arc<TranslationStore>,
        locale: &str,
        construction: PolicyLayer,
    ) -> Result<Self, ResolverError> {
        let language = parse_language(locale)?;
        let defaults = ResolutionPolicy::default().to_layer();
        let resolved = policy::merge(&defaults, &construction, &PolicyLayer::new())?;
        if let Some(fallback) = resolved.fallback_language.as_deref() {
            parse_language(fallback)?;
        }
        debug!(locale, policy = ?resolved, "resolver constructed");
        Ok(Self {
            store,
            locale: locale.to_owned(),
            language,
            defaults,
            construction,
            policy: resolved,
            engine: Arc::new(IcuEngine::new()),
        })
    }

    /// Replaces the template engine.
    #[must_use]
    pub fn with_engine<E>(mut self, engine: E) -> Self
    where
        E: TemplateEngine + 'static,
    {
        self.engine = Arc::new(engine);
        self
    }

    /// Locale code the resolver renders for.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The policy in effect when a call supplies no overrides.
    #[must_use]
    pub const fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// The shared store.
    #[must_use]
    pub const fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    /// Resolves `key`, applying the strict/lenient boundary.
    ///
    /// In strict mode every failure is returned. In lenient mode failures
    /// other than [`ResolveError::KeyNotFound`] and
    /// [`ResolveError::InvalidPolicy`] become an empty message.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ResolveError`] when the effective policy is
    /// strict or the failure is fatal.
    pub fn resolve(
        &self,
        key: &str,
        context: Option<&Context>,
        options: Option<&CallOptions>,
    ) -> Result<Message, ResolveError> {
        let span = debug_span!("resolve", key, locale = %self.locale);
        let _entered = span.enter();
        let effective = self.effective_policy(options)?;
        self.run(&effective, key, context, options)
            .apply_policy(effective.strict)
    }

    /// Resolves `key` without suppressing failures.
    ///
    /// Lenient policies still enable fallback and missing-message
    /// substitution; only the final mapping of errors to an empty message is
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns every classified [`ResolveError`].
    pub fn try_resolve(
        &self,
        key: &str,
        context: Option<&Context>,
        options: Option<&CallOptions>,
    ) -> Result<Message, ResolveError> {
        let effective = self.effective_policy(options)?;
        self.run(&effective, key, context, options)
    }

    fn effective_policy(
        &self,
        options: Option<&CallOptions>,
    ) -> Result<ResolutionPolicy, ResolveError> {
        let Some(call) = options.map(|options| &options.settings) else {
            return Ok(self.policy.clone());
        };
        if call.is_empty() {
            return Ok(self.policy.clone());
        }
        Ok(policy::merge(&self.defaults, &self.construction, call)?)
    }

    fn run(
        &self,
        policy: &ResolutionPolicy,
        key: &str,
        context: Option<&Context>,
        options: Option<&CallOptions>,
    ) -> Result<Message, ResolveError> {
        let translation = self
            .store
            .translation(key)
            .ok_or_else(|| ResolveError::KeyNotFound {
                key: key.to_owned(),
            })?;
        let template = self.select_template(translation, key, policy)?;
        let parsed = self.engine.parse(template)?;
        validate::check_placeholders(&parsed, context, policy.strict)?;
        let default_formats = FormatOptions::default();
        let formats = options.map_or(&default_formats, |options| &options.formats);
        Ok(self
            .engine
            .render(&parsed, &self.language, context, formats)?)
    }

    fn select_template<'a>(
        &self,
        translation: &'a Translation,
        key: &str,
        policy: &'a ResolutionPolicy,
    ) -> Result<&'a str, ResolveError> {
        if let TemplateLookup::Present(template) = translation.lookup(&self.locale) {
            return Ok(template);
        }
        let missing = || ResolveError::MissingTranslation {
            key: key.to_owned(),
            locale: self.locale.clone(),
        };
        if policy.strict {
            return Err(missing());
        }
        if let Some(fallback) = policy.fallback_language.as_deref()
            && let Some(template) = translation.lookup(fallback).template()
        {
            trace!(fallback, "using fallback language template");
            return Ok(template);
        }
        policy.missing_message.as_deref().ok_or_else(missing)
    }
}

fn parse_language(locale: &str) -> Result<LanguageIdentifier, ResolverError> {
    locale.parse().map_err(|_| ResolverError::InvalidLocale {
        locale: locale.to_owned(),
    })
}

/// Builds a [`Resolver`] and returns it as a plain resolution function.
///
/// # Errors
///
/// See [`Resolver::new`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use locale_resolver::{create_resolver, PolicyLayer, TranslationStore};
///
/// let store = TranslationStore::from_json_str(r#"{"bye": {"en": "Goodbye"}}"#)?;
/// let t = create_resolver(Arc::new(store), "en", PolicyLayer::new())?;
/// assert_eq!(t("bye", None, None)?, "Goodbye");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn create_resolver(
    store: Arc<TranslationStore>,
    locale: &str,
    construction: PolicyLayer,
) -> Result<
    impl Fn(&str, Option<&Context>, Option<&CallOptions>) -> Result<Message, ResolveError>
    + Send
    + Sync
    + use<>,
    ResolverError,
> {
    let resolver = Resolver::new(store, locale, construction)?;
    Ok(into_fn(resolver))
}

fn into_fn(
    resolver: Resolver,
) -> impl Fn(&str, Option<&Context>, Option<&CallOptions>) -> Result<Message, ResolveError>
+ Send
+ Sync {
    move |key: &str, context: Option<&Context>, options: Option<&CallOptions>| {
        resolver.resolve(key, context, options)
    }
}
