//! Immutable `message-key → locale → template` store.
//!
//! A [`TranslationStore`] is validated once when it is built and is shared
//! read-only between resolvers, typically behind an `Arc`. Keys must be
//! non-empty and every locale code must parse as a BCP-47 language
//! identifier.

mod load;

use std::collections::{BTreeMap, BTreeSet};

use unic_langid::LanguageIdentifier;

use crate::StoreError;

/// Templates of one message key, by locale code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Translation {
    templates: BTreeMap<String, String>,
}

/// Outcome of looking up one locale in a [`Translation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateLookup<'a> {
    /// A non-empty template.
    Present(&'a str),
    /// The locale is listed with an empty template.
    Empty,
    /// The locale is not listed.
    Absent,
}

impl<'a> TemplateLookup<'a> {
    /// Returns the template when one is present.
    #[must_use]
    pub const fn template(self) -> Option<&'a str> {
        match self {
            Self::Present(template) => Some(template),
            Self::Empty | Self::Absent => None,
        }
    }
}

impl Translation {
    /// Looks up the template for `locale`.
    #[must_use]
    pub fn lookup(&self, locale: &str) -> TemplateLookup<'_> {
        match self.templates.get(locale) {
            Some(template) if template.is_empty() => TemplateLookup::Empty,
            Some(template) => TemplateLookup::Present(template),
            None => TemplateLookup::Absent,
        }
    }

    /// Locale codes listed for this key, empty templates included.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of listed locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` when no locale is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Validated translation data shared by resolvers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationStore {
    entries: BTreeMap<String, Translation>,
    locales: BTreeSet<String>,
}

impl TranslationStore {
    /// Starts building a store in code.
    #[must_use]
    pub fn builder() -> TranslationStoreBuilder {
        TranslationStoreBuilder::default()
    }

    /// Returns the translation for `key`.
    #[must_use]
    pub fn translation(&self, key: &str) -> Option<&Translation> {
        self.entries.get(key)
    }

    /// Returns `true` when `key` is part of the store.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Message keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every locale code listed under any key, in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    /// Returns `true` when some key lists `locale`.
    #[must_use]
    pub fn knows_locale(&self, locale: &str) -> bool {
        self.locales.contains(locale)
    }

    /// Number of message keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the store has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_raw(raw: BTreeMap<String, BTreeMap<String, String>>) -> Result<Self, StoreError> {
        let mut entries = BTreeMap::new();
        let mut locales = BTreeSet::new();
        for (key, templates) in raw {
            if key.is_empty() {
                return Err(StoreError::EmptyKey);
            }
            for locale in templates.keys() {
                if locale.parse::<LanguageIdentifier>().is_err() {
                    return Err(StoreError::InvalidLocale {
                        key,
                        locale: locale.clone(),
                    });
                }
                locales.insert(locale.clone());
            }
            entries.insert(key, Translation { templates });
        }
        Ok(Self { entries, locales })
    }
}

/// Collects templates before validating them into a [`TranslationStore`].
///
/// ```rust
/// use locale_resolver::TranslationStore;
///
/// let store = TranslationStore::builder()
///     .message("greeting", "en", "Hello {name}!")
///     .message("greeting", "da", "Hej {name}!")
///     .build()
///     .expect("valid store");
/// assert!(store.knows_locale("da"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TranslationStoreBuilder {
    raw: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationStoreBuilder {
    /// Adds a template, replacing any earlier one for the same key and locale.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        locale: impl Into<String>,
        template: impl Into<String>,
    ) -> &mut Self {
        self.raw
            .entry(key.into())
            .or_default()
            .insert(locale.into(), template.into());
        self
    }

    /// Chaining form of [`TranslationStoreBuilder::insert`].
    #[must_use]
    pub fn message(
        mut self,
        key: impl Into<String>,
        locale: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(key, locale, template);
        self
    }

    /// Validates the collected templates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyKey`] or [`StoreError::InvalidLocale`].
    pub fn build(self) -> Result<TranslationStore, StoreError> {
        TranslationStore::from_raw(self.raw)
    }
}

#[cfg(test)]
mod tests;
