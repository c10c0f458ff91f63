//! Unit tests for the translation store.

use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::fixtures::{SAMPLE_STORE, sample_store_json};

use super::*;

#[fixture]
fn store() -> TranslationStore {
    TranslationStore::from_json_str(SAMPLE_STORE).expect("sample store is valid")
}

#[rstest]
fn collects_known_locales_across_keys(store: TranslationStore) {
    let locales: Vec<&str> = store.locales().collect();
    assert_eq!(locales, vec!["da", "en"]);
    assert!(store.knows_locale("da"));
    assert!(!store.knows_locale("de"));
}

#[rstest]
#[case("greetings", "en", TemplateLookup::Present("Hello {name}!"))]
#[case("greetings", "de", TemplateLookup::Absent)]
#[case("pending", "da", TemplateLookup::Empty)]
fn lookup_distinguishes_present_empty_and_absent(
    store: TranslationStore,
    #[case] key: &str,
    #[case] locale: &str,
    #[case] expected: TemplateLookup<'static>,
) {
    let translation = store.translation(key).expect("key exists");
    assert_eq!(translation.lookup(locale), expected);
}

#[test]
fn template_accessor_hides_empty_entries() {
    assert_eq!(TemplateLookup::Present("x").template(), Some("x"));
    assert_eq!(TemplateLookup::Empty.template(), None);
    assert_eq!(TemplateLookup::Absent.template(), None);
}

#[rstest]
fn unknown_keys_have_no_translation(store: TranslationStore) {
    assert!(store.translation("missing").is_none());
    assert!(!store.contains_key("missing"));
}

#[test]
fn json_value_and_text_loaders_agree() {
    let from_value =
        TranslationStore::from_json_value(sample_store_json().expect("fixture json"))
            .expect("valid store");
    let from_text = TranslationStore::from_json_str(SAMPLE_STORE).expect("valid store");
    assert_eq!(from_value, from_text);
}

#[rstest]
#[case(json!({"": {"en": "x"}}))]
#[case(json!({"k": {"not a locale!": "x"}}))]
#[case(json!({"k": {"en": 5}}))]
#[case(json!(["k"]))]
fn rejects_invalid_documents(#[case] document: serde_json::Value) {
    assert!(TranslationStore::from_json_value(document).is_err());
}

#[test]
fn invalid_locale_names_key_and_code() {
    let err = TranslationStore::builder()
        .message("title", "en_US!!", "Title")
        .build()
        .expect_err("locale must be rejected");
    match err {
        StoreError::InvalidLocale { key, locale } => {
            assert_eq!(key, "title");
            assert_eq!(locale, "en_US!!");
        }
        other => panic!("expected InvalidLocale, got {other:?}"),
    }
}

#[test]
fn builder_replaces_duplicate_entries() {
    let mut builder = TranslationStore::builder();
    builder.insert("k", "en", "first").insert("k", "en", "second");
    let store = builder.build().expect("valid store");
    let translation = store.translation("k").expect("key exists");
    assert_eq!(translation.lookup("en"), TemplateLookup::Present("second"));
    assert_eq!(translation.len(), 1);
}
