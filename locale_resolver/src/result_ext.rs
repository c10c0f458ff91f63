//! The strict/lenient boundary as a `Result` extension.
//!
//! Resolution produces a classified `Result<Message, ResolveError>`. Whether
//! an error reaches the caller is decided once, here, rather than at each
//! failure site.
//!
//! # Examples
//!
//! ```
//! use locale_resolver::{Message, ResolveError, ResolveResultExt};
//!
//! let missing: Result<Message, ResolveError> = Err(ResolveError::MissingTranslation {
//!     key: "title".into(),
//!     locale: "da".into(),
//! });
//! assert_eq!(missing.apply_policy(false)?, "");
//!
//! let unknown: Result<Message, ResolveError> = Err(ResolveError::KeyNotFound {
//!     key: "nope".into(),
//! });
//! assert!(unknown.apply_policy(false).is_err());
//! # Ok::<_, ResolveError>(())
//! ```

use tracing::debug;

use crate::ResolveError;
use crate::template::Message;

/// Applies the strict/lenient decision to a resolution result.
pub trait ResolveResultExt {
    /// Passes the result through when `strict`; otherwise maps every
    /// non-fatal error to [`Message::empty`].
    ///
    /// # Errors
    ///
    /// Returns the original error in strict mode, or a fatal error
    /// ([`ResolveError::is_fatal`]) in either mode.
    fn apply_policy(self, strict: bool) -> Result<Message, ResolveError>;
}

impl ResolveResultExt for Result<Message, ResolveError> {
    fn apply_policy(self, strict: bool) -> Self {
        match self {
            Err(err) if !strict && !err.is_fatal() => {
                debug!(kind = ?err.kind(), error = %err, "suppressed resolution failure");
                Ok(Message::empty())
            }
            other => other,
        }
    }
}
