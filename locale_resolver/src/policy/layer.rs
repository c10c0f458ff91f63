//! Policy layers and their provenance.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

use crate::PolicyError;

pub(super) const STRICT: &str = "strict";
pub(super) const FALLBACK_LANGUAGE: &str = "fallback_language";
pub(super) const MISSING_MESSAGE: &str = "missing_message";

/// Source of a policy layer, in increasing precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum PolicyProvenance {
    /// Built-in defaults.
    Defaults,
    /// Options supplied when the resolver was constructed.
    Construction,
    /// Overrides supplied with a single resolve call.
    Call,
}

impl fmt::Display for PolicyProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Defaults => "defaults",
            Self::Construction => "construction",
            Self::Call => "call",
        })
    }
}

/// Policy fields set explicitly by one source.
///
/// Fields that were never set are absent and leave earlier layers untouched.
/// Clearing an optional field is an explicit `null`, which does override.
///
/// ```rust
/// use locale_resolver::policy::PolicyLayer;
///
/// let layer = PolicyLayer::new().strict(false).without_missing_message();
/// assert!(layer.is_set("strict"));
/// assert!(layer.is_set("missing_message"));
/// assert!(!layer.is_set("fallback_language"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyLayer {
    fields: Map<String, Value>,
}

impl PolicyLayer {
    /// Creates a layer with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layer from a JSON object, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NotAnObject`] when `value` is not an object,
    /// [`PolicyError::UnknownField`] for names the policy does not have, and
    /// [`PolicyError::InvalidField`] when a value has the wrong type.
    pub fn from_json(provenance: PolicyProvenance, value: Value) -> Result<Self, PolicyError> {
        let Value::Object(fields) = value else {
            return Err(PolicyError::NotAnObject { provenance });
        };
        for (field, entry) in &fields {
            check_field(provenance, field, entry)?;
        }
        Ok(Self { fields })
    }

    /// Sets whether resolution is strict.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.fields.insert(STRICT.to_owned(), Value::Bool(strict));
        self
    }

    /// Sets the fallback language consulted in lenient mode.
    #[must_use]
    pub fn fallback_language(mut self, locale: impl Into<String>) -> Self {
        self.fields
            .insert(FALLBACK_LANGUAGE.to_owned(), Value::String(locale.into()));
        self
    }

    /// Explicitly clears the fallback language.
    #[must_use]
    pub fn without_fallback_language(mut self) -> Self {
        self.fields.insert(FALLBACK_LANGUAGE.to_owned(), Value::Null);
        self
    }

    /// Sets the text substituted for missing translations in lenient mode.
    #[must_use]
    pub fn missing_message(mut self, message: impl Into<String>) -> Self {
        self.fields
            .insert(MISSING_MESSAGE.to_owned(), Value::String(message.into()));
        self
    }

    /// Explicitly clears the missing-message substitute.
    #[must_use]
    pub fn without_missing_message(mut self) -> Self {
        self.fields.insert(MISSING_MESSAGE.to_owned(), Value::Null);
        self
    }

    /// Returns `true` when `field` is explicitly present in this layer.
    #[must_use]
    pub fn is_set(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns `true` when the layer sets no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the layer as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Consumes the layer, returning its JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

fn check_field(
    provenance: PolicyProvenance,
    field: &str,
    value: &Value,
) -> Result<(), PolicyError> {
    let (valid, expected) = match field {
        STRICT => (value.is_boolean(), "a boolean"),
        FALLBACK_LANGUAGE | MISSING_MESSAGE => {
            (value.is_string() || value.is_null(), "a string or null")
        }
        _ => {
            return Err(PolicyError::UnknownField {
                provenance,
                field: field.to_owned(),
            });
        }
    };
    if valid {
        Ok(())
    } else {
        Err(PolicyError::InvalidField {
            provenance,
            field: field.to_owned(),
            expected,
        })
    }
}

/// A [`PolicyLayer`] tagged with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicySource<'a> {
    provenance: PolicyProvenance,
    layer: Cow<'a, PolicyLayer>,
}

impl<'a> PolicySource<'a> {
    /// Tags `layer` with `provenance`.
    #[must_use]
    pub const fn new(provenance: PolicyProvenance, layer: Cow<'a, PolicyLayer>) -> Self {
        Self { provenance, layer }
    }

    /// Wraps a defaults layer.
    #[must_use]
    pub const fn defaults(layer: Cow<'a, PolicyLayer>) -> Self {
        Self::new(PolicyProvenance::Defaults, layer)
    }

    /// Wraps a construction layer.
    #[must_use]
    pub const fn construction(layer: Cow<'a, PolicyLayer>) -> Self {
        Self::new(PolicyProvenance::Construction, layer)
    }

    /// Wraps a per-call layer.
    #[must_use]
    pub const fn call(layer: Cow<'a, PolicyLayer>) -> Self {
        Self::new(PolicyProvenance::Call, layer)
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> PolicyProvenance {
        self.provenance
    }

    /// Returns the wrapped layer.
    #[must_use]
    pub fn layer(&self) -> &PolicyLayer {
        &self.layer
    }

    /// Returns the layer's JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.layer.into_owned().into_value()
    }

    /// Converts this source into an owned `'static` variant.
    #[must_use]
    pub fn into_owned(self) -> PolicySource<'static> {
        PolicySource {
            provenance: self.provenance,
            layer: Cow::Owned(self.layer.into_owned()),
        }
    }
}
