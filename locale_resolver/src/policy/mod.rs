//! Resolution policy and the layered options merger.
//!
//! A [`ResolutionPolicy`] is never assembled by hand inside the resolver.
//! Instead, the built-in defaults, the options supplied when the resolver was
//! constructed, and any per-call overrides are each captured as a
//! [`PolicyLayer`] holding only the fields its source set explicitly. The
//! layers are overlaid in provenance order and the result is deserialised
//! into a fully-populated policy.
//!
//! # Example
//!
//! ```rust
//! use locale_resolver::policy::{PolicyComposer, PolicyLayer, ResolutionPolicy};
//!
//! let mut composer = PolicyComposer::new();
//! composer.push_defaults(ResolutionPolicy::default().to_layer());
//! composer.push_construction(PolicyLayer::new().strict(false));
//! composer.push_call(PolicyLayer::new().fallback_language("en"));
//!
//! let policy = composer.merge()?;
//! assert!(!policy.strict);
//! assert_eq!(policy.fallback_language.as_deref(), Some("en"));
//! assert_eq!(policy.missing_message.as_deref(), Some("-"));
//! # Ok::<_, locale_resolver::PolicyError>(())
//! ```

mod composer;
mod layer;
mod merge;

use serde::{Deserialize, Serialize};

pub use composer::PolicyComposer;
pub use layer::{PolicyLayer, PolicyProvenance, PolicySource};
pub use merge::{merge, merge_layers, merge_value};

/// Text substituted when lenient resolution finds no template.
pub const DEFAULT_MISSING_MESSAGE: &str = "-";

/// Fully-populated policy consumed by the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionPolicy {
    /// Require a translation and every top-level placeholder value.
    pub strict: bool,
    /// Locale consulted in lenient mode when the requested one has no
    /// template.
    pub fallback_language: Option<String>,
    /// Template used in lenient mode when no locale provides one.
    pub missing_message: Option<String>,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            strict: true,
            fallback_language: None,
            missing_message: Some(DEFAULT_MISSING_MESSAGE.to_owned()),
        }
    }
}

impl ResolutionPolicy {
    /// Returns a layer that sets every field of this policy explicitly.
    ///
    /// Unset optional fields become explicit `null` entries so the layer
    /// fully describes the policy when used as the defaults layer.
    #[must_use]
    pub fn to_layer(&self) -> PolicyLayer {
        let layer = PolicyLayer::new().strict(self.strict);
        let layer = match &self.fallback_language {
            Some(locale) => layer.fallback_language(locale.clone()),
            None => layer.without_fallback_language(),
        };
        match &self.missing_message {
            Some(message) => layer.missing_message(message.clone()),
            None => layer.without_missing_message(),
        }
    }
}
