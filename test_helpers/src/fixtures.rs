//! Sample translation documents.
//!
//! The sample store translates into `en` and `da` only. Tests bind resolvers
//! to `de` to exercise the missing-translation paths.

use anyhow::Result;

/// Sample store covering plain, placeholder, plural, tag, malformed, and
/// partially translated messages.
pub const SAMPLE_STORE: &str = r#"{
  "greetings": {
    "en": "Hello {name}!",
    "da": "Hej {name}!"
  },
  "welcome": {
    "en": "Welcome!",
    "da": "Velkommen!"
  },
  "books": {
    "en": "I bought {n, plural, one{1 book} other{# books}}",
    "da": "Jeg købte {n, plural, one{1 bog} other{# bøger}}"
  },
  "nested": {
    "en": "{n, plural, one{{who} has one} other{{who} has #}}"
  },
  "guide": {
    "en": "Read <link>the guide</link> first"
  },
  "broken": {
    "en": "Hello {name",
    "da": "Hej {name"
  },
  "pending": {
    "en": "Coming soon",
    "da": ""
  }
}"#;

/// Substitute used by tests that configure a missing-message text.
pub const NOT_TRANSLATED: &str = "NOT TRANSLATED YET!";

/// Parses [`SAMPLE_STORE`] into a JSON value.
///
/// # Errors
///
/// Returns an error if the embedded document is not valid JSON.
pub fn sample_store_json() -> Result<serde_json::Value> {
    Ok(serde_json::from_str(SAMPLE_STORE)?)
}

/// TOML settings file binding the sample store to `locale`.
#[must_use]
pub fn settings_toml(store_path: &str, locale: &str) -> String {
    format!("store = \"{store_path}\"\nlocale = \"{locale}\"\n")
}
