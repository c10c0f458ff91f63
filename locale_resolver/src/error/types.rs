//! Error enums for resolution, policy merging, and store construction.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::policy::PolicyProvenance;
use crate::template::{ParseError, RenderError};

/// Classified failure of a single resolution call.
///
/// In strict mode every variant reaches the caller unchanged. In lenient mode
/// all variants except [`ResolveError::KeyNotFound`] and
/// [`ResolveError::InvalidPolicy`] collapse into an empty message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The message key is not part of the store.
    #[error("unknown message key '{key}'")]
    KeyNotFound {
        /// Key requested by the caller.
        key: String,
    },

    /// No template exists for the requested locale.
    #[error("missing translation for locale '{locale}' with key '{key}'")]
    MissingTranslation {
        /// Key requested by the caller.
        key: String,
        /// Locale the resolver is bound to.
        locale: String,
    },

    /// A top-level placeholder has no truthy value in the context.
    #[error("missing interpolation value for placeholder '{name}'")]
    MissingInterpolationValue {
        /// Placeholder name referenced by the template.
        name: String,
    },

    /// The template text could not be parsed.
    #[error("malformed template: {0}")]
    MalformedTemplate(#[from] ParseError),

    /// The context does not fit what the template requires.
    #[error("template could not be rendered: {0}")]
    RenderMismatch(#[from] RenderError),

    /// Per-call settings could not be merged into a policy.
    #[error("call settings produced an invalid policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
}

/// Fieldless classification of [`ResolveError`] for matching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`ResolveError::KeyNotFound`].
    KeyNotFound,
    /// See [`ResolveError::MissingTranslation`].
    MissingTranslation,
    /// See [`ResolveError::MissingInterpolationValue`].
    MissingInterpolationValue,
    /// See [`ResolveError::MalformedTemplate`].
    MalformedTemplate,
    /// See [`ResolveError::RenderMismatch`].
    RenderMismatch,
    /// See [`ResolveError::InvalidPolicy`].
    InvalidPolicy,
}

impl ResolveError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::MissingTranslation { .. } => ErrorKind::MissingTranslation,
            Self::MissingInterpolationValue { .. } => ErrorKind::MissingInterpolationValue,
            Self::MalformedTemplate(_) => ErrorKind::MalformedTemplate,
            Self::RenderMismatch(_) => ErrorKind::RenderMismatch,
            Self::InvalidPolicy(_) => ErrorKind::InvalidPolicy,
        }
    }

    /// Returns `true` for usage errors that lenient mode never suppresses.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::InvalidPolicy(_))
    }
}

/// Failures raised while validating or merging policy layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PolicyError {
    /// A field carried a value of the wrong type.
    #[error("{provenance} layer sets '{field}' to an invalid value: expected {expected}")]
    InvalidField {
        /// Layer that supplied the value.
        provenance: PolicyProvenance,
        /// Field name.
        field: String,
        /// Human-readable description of the accepted values.
        expected: &'static str,
    },

    /// A layer named a field the policy does not have.
    #[error("{provenance} layer sets unknown field '{field}'")]
    UnknownField {
        /// Layer that supplied the field.
        provenance: PolicyProvenance,
        /// Field name.
        field: String,
    },

    /// A layer was not a JSON object.
    #[error("{provenance} layer must be an object")]
    NotAnObject {
        /// Layer that supplied the value.
        provenance: PolicyProvenance,
    },

    /// The merged layers could not be turned into a policy.
    #[error("merged policy is invalid: {message}")]
    Merge {
        /// Deserializer diagnostic.
        message: String,
    },
}

/// Failures raised while building a [`crate::TranslationStore`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The document is not a two-level object of strings.
    #[error("failed to parse translation document: {0}")]
    Json(#[from] serde_json::Error),

    /// A message key was empty.
    #[error("message keys must not be empty")]
    EmptyKey,

    /// A locale code is not a valid language identifier.
    #[error("invalid locale code '{locale}' under key '{key}'")]
    InvalidLocale {
        /// Message key that carried the locale.
        key: String,
        /// Offending locale code.
        locale: String,
    },

    /// The store file could not be read.
    #[error("failed to read translation store '{path}': {source}")]
    File {
        /// Path handed to the loader.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Failures raised while constructing a [`crate::Resolver`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolverError {
    /// The locale code is not a valid language identifier.
    #[error("locale '{locale}' is not a valid language identifier")]
    InvalidLocale {
        /// Rejected locale code.
        locale: String,
    },

    /// The construction layer was rejected.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// The configured store could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Settings could not be gathered from their sources.
    #[error("failed to load resolver settings: {0}")]
    Settings(Box<figment::Error>),

    /// A required setting was not supplied by any source.
    #[error("missing required setting '{0}'")]
    MissingSetting(&'static str),
}
