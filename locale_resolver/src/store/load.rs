//! Loading stores from JSON documents and files.

use std::collections::BTreeMap;

use camino::Utf8Path;
use tracing::debug;

use super::TranslationStore;
use crate::StoreError;
use crate::fs::read_utf8;

type RawStore = BTreeMap<String, BTreeMap<String, String>>;

impl TranslationStore {
    /// Parses a `{ "<key>": { "<locale>": "<template>" } }` document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] when the text is not a two-level object of
    /// strings, or a validation error from the builder rules.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locale_resolver::TranslationStore;
    ///
    /// let store = TranslationStore::from_json_str(r#"{"hello": {"en": "Hello!"}}"#)
    ///     .expect("valid store");
    /// assert!(store.contains_key("hello"));
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        let raw: RawStore = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Builds a store from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// See [`TranslationStore::from_json_str`].
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, StoreError> {
        let raw: RawStore = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Reads and parses a store file.
    ///
    /// The parent directory is opened through `cap-std` and the file is read
    /// relative to it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::File`] when the file cannot be read, otherwise
    /// the errors of [`TranslationStore::from_json_str`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, StoreError> {
        let text = read_utf8(path).map_err(|source| StoreError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&text)?;
        debug!(
            %path,
            keys = store.len(),
            locales = store.locales.len(),
            "loaded translation store"
        );
        Ok(store)
    }
}
