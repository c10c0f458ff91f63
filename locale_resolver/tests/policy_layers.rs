//! Precedence of defaults, construction, and call-level policy layers.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;
use test_helpers::fixtures::SAMPLE_STORE;

use locale_resolver::policy::{PolicyComposer, merge};
use locale_resolver::{
    CallOptions, PolicyError, PolicyLayer, PolicyProvenance, ResolutionPolicy, Resolver,
    TranslationStore,
};

fn defaults() -> PolicyLayer {
    ResolutionPolicy::default().to_layer()
}

#[rstest]
#[case::defaults_only(PolicyLayer::new(), PolicyLayer::new(), true, None, Some("-"))]
#[case::construction_wins(
    PolicyLayer::new().strict(false).missing_message("?"),
    PolicyLayer::new(),
    false,
    None,
    Some("?")
)]
#[case::call_wins(
    PolicyLayer::new().strict(false).fallback_language("en"),
    PolicyLayer::new().strict(true).fallback_language("da"),
    true,
    Some("da"),
    Some("-")
)]
#[case::call_clears(
    PolicyLayer::new().fallback_language("en"),
    PolicyLayer::new().without_fallback_language().without_missing_message(),
    true,
    None,
    None
)]
fn later_layers_override_explicit_fields(
    #[case] construction: PolicyLayer,
    #[case] call: PolicyLayer,
    #[case] strict: bool,
    #[case] fallback: Option<&str>,
    #[case] missing: Option<&str>,
) {
    let policy = merge(&defaults(), &construction, &call).expect("layers merge");
    assert_eq!(policy.strict, strict);
    assert_eq!(policy.fallback_language.as_deref(), fallback);
    assert_eq!(policy.missing_message.as_deref(), missing);
}

#[test]
fn composer_accepts_layers_from_json() {
    let mut composer = PolicyComposer::new();
    composer.push_defaults(defaults());
    composer.push_construction(
        PolicyLayer::from_json(
            PolicyProvenance::Construction,
            json!({"strict": false, "missing_message": "n/a"}),
        )
        .expect("valid construction layer"),
    );
    composer.push_call(
        PolicyLayer::from_json(PolicyProvenance::Call, json!({"fallback_language": "en"}))
            .expect("valid call layer"),
    );
    let policy = composer.merge().expect("merges");
    assert_eq!(
        policy,
        ResolutionPolicy {
            strict: false,
            fallback_language: Some("en".into()),
            missing_message: Some("n/a".into()),
        }
    );
}

#[test]
fn layer_errors_report_provenance() {
    let err = PolicyLayer::from_json(PolicyProvenance::Call, json!({"strict": 1}))
        .expect_err("strict must be boolean");
    assert!(matches!(
        err,
        PolicyError::InvalidField {
            provenance: PolicyProvenance::Call,
            ..
        }
    ));
    assert!(err.to_string().starts_with("call layer"));
}

#[test]
fn call_overrides_do_not_leak_into_later_calls() {
    let store = Arc::new(TranslationStore::from_json_str(SAMPLE_STORE).expect("store"));
    let resolver = Resolver::new(store, "de", PolicyLayer::new()).expect("resolver");
    let lenient = CallOptions::with_settings(PolicyLayer::new().strict(false));

    assert_eq!(
        resolver
            .resolve("greetings", None, Some(&lenient))
            .expect("lenient call"),
        "-"
    );
    assert!(resolver.resolve("greetings", None, None).is_err());
    assert!(resolver.policy().strict);
}
