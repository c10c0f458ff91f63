//! Resolver settings gathered from files and the environment.
//!
//! [`ResolverSettings`] is extracted with `figment` from, in increasing
//! precedence:
//!
//! 1. serialized defaults (every field unset),
//! 2. an optional TOML file, read through `cap-std`,
//! 3. environment variables prefixed with [`ENV_PREFIX`], for example
//!    `LOCALE_RESOLVER_LOCALE=da` or `LOCALE_RESOLVER_STRICT=false`,
//! 4. caller overrides such as command line flags.
//!
//! ```toml
//! store = "translations.json"
//! locale = "da"
//! strict = false
//! fallback_language = "en"
//! missing_message = "NOT TRANSLATED YET!"
//! ```

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fs::read_utf8;
use crate::policy::PolicyLayer;
use crate::resolver::Resolver;
use crate::store::TranslationStore;
use crate::ResolverError;

/// Prefix for environment variables read by [`ResolverSettings::load`].
pub const ENV_PREFIX: &str = "LOCALE_RESOLVER_";

/// Everything needed to build a [`Resolver`] outside of code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Path of the JSON translation store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<Utf8PathBuf>,
    /// Default locale of the resolver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Construction-time strictness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    /// Construction-time fallback language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<String>,
    /// Construction-time missing-message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_message: Option<String>,
}

impl ResolverSettings {
    /// Loads settings from `config_path` (when given) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Settings`] when the file cannot be read or
    /// parsed, or a value has the wrong type.
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self, ResolverError> {
        Self::load_with_overrides(config_path, &Self::default())
    }

    /// Like [`ResolverSettings::load`], then merges `overrides` on top.
    ///
    /// Unset fields of `overrides` leave the loaded values alone, so command
    /// line flags can be passed through unconditionally.
    ///
    /// # Errors
    ///
    /// See [`ResolverSettings::load`].
    pub fn load_with_overrides(
        config_path: Option<&Utf8Path>,
        overrides: &Self,
    ) -> Result<Self, ResolverError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config_path {
            let text = read_utf8(path).map_err(|err| {
                figment::Error::from(format!("failed to read settings file '{path}': {err}"))
            })?;
            figment = figment.merge(Toml::string(&text));
            debug!(%path, "merged settings file");
        }
        let settings = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()?;
        Ok(settings)
    }

    /// Fields that form the construction policy layer.
    #[must_use]
    pub fn policy_layer(&self) -> PolicyLayer {
        let mut layer = PolicyLayer::new();
        if let Some(strict) = self.strict {
            layer = layer.strict(strict);
        }
        if let Some(fallback) = &self.fallback_language {
            layer = layer.fallback_language(fallback.clone());
        }
        if let Some(message) = &self.missing_message {
            layer = layer.missing_message(message.clone());
        }
        layer
    }

    /// Loads the configured store and builds a resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::MissingSetting`] when `store` or `locale` is
    /// unset, [`ResolverError::Store`] when the store cannot be loaded, and
    /// the errors of [`Resolver::new`].
    pub fn into_resolver(self) -> Result<Resolver, ResolverError> {
        let store_path = self
            .store
            .as_deref()
            .ok_or(ResolverError::MissingSetting("store"))?;
        let locale = self
            .locale
            .as_deref()
            .ok_or(ResolverError::MissingSetting("locale"))?;
        let store = TranslationStore::from_path(store_path)?;
        Resolver::new(Arc::new(store), locale, self.policy_layer())
    }
}
