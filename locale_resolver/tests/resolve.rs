//! End-to-end resolution behaviour over the sample store.

use std::sync::Arc;

use rstest::{fixture, rstest};
use test_helpers::fixtures::{NOT_TRANSLATED, SAMPLE_STORE};

use locale_resolver::{
    Context, ErrorKind, Message, PolicyLayer, ResolveError, Resolver, TranslationStore,
};

#[fixture]
fn store() -> Arc<TranslationStore> {
    Arc::new(TranslationStore::from_json_str(SAMPLE_STORE).expect("sample store"))
}

fn resolver(store: Arc<TranslationStore>, locale: &str, layer: PolicyLayer) -> Resolver {
    Resolver::new(store, locale, layer).expect("resolver builds")
}

#[rstest]
#[case("en", "Welcome!")]
#[case("da", "Velkommen!")]
fn placeholder_free_templates_pass_through(
    store: Arc<TranslationStore>,
    #[case] locale: &str,
    #[case] expected: &str,
) {
    let resolver = resolver(store, locale, PolicyLayer::new());
    let message = resolver.resolve("welcome", None, None).expect("resolves");
    assert_eq!(message, Message::Text(expected.to_owned()));
}

#[rstest]
fn interpolates_top_level_placeholders(store: Arc<TranslationStore>) {
    let resolver = resolver(store, "en", PolicyLayer::new());
    let context = Context::new().with("name", "World");
    let message = resolver
        .resolve("greetings", Some(&context), None)
        .expect("resolves");
    assert_eq!(message, "Hello World!");
}

#[rstest]
fn strict_mode_reports_the_missing_placeholder(store: Arc<TranslationStore>) {
    let resolver = resolver(store, "da", PolicyLayer::new());
    let context = Context::new().with("wrong", "x");
    let err = resolver
        .resolve("greetings", Some(&context), None)
        .expect_err("name is missing");
    assert_eq!(
        err,
        ResolveError::MissingInterpolationValue {
            name: "name".into()
        }
    );
}

#[rstest]
fn lenient_mode_falls_back_to_another_language(store: Arc<TranslationStore>) {
    let resolver = resolver(
        store,
        "de",
        PolicyLayer::new().strict(false).fallback_language("en"),
    );
    let context = Context::new().with("name", "English");
    let message = resolver
        .resolve("greetings", Some(&context), None)
        .expect("falls back");
    assert_eq!(message, "Hello English!");
}

#[rstest]
fn lenient_mode_substitutes_the_missing_message(store: Arc<TranslationStore>) {
    let resolver = resolver(
        store,
        "de",
        PolicyLayer::new()
            .strict(false)
            .missing_message(NOT_TRANSLATED),
    );
    let message = resolver.resolve("greetings", None, None).expect("substituted");
    assert_eq!(message, NOT_TRANSLATED);
}

#[rstest]
fn lenient_mode_uses_the_default_missing_message(store: Arc<TranslationStore>) {
    let resolver = resolver(store, "de", PolicyLayer::new().strict(false));
    assert_eq!(resolver.resolve("greetings", None, None).expect("dash"), "-");
}

#[rstest]
#[case::missing_translation("de", "greetings", None)]
#[case::malformed_template("da", "broken", None)]
#[case::render_mismatch("en", "books", Some(Context::new().with("n", "many")))]
fn lenient_failures_collapse_to_empty_text(
    store: Arc<TranslationStore>,
    #[case] locale: &str,
    #[case] key: &str,
    #[case] context: Option<Context>,
) {
    let resolver = resolver(
        store,
        locale,
        PolicyLayer::new().strict(false).without_missing_message(),
    );
    let message = resolver
        .resolve(key, context.as_ref(), None)
        .expect("lenient mode never fails for these");
    assert_eq!(message, Message::empty());
}

#[rstest]
#[case::missing_translation("de", "greetings", None, ErrorKind::MissingTranslation)]
#[case::malformed_template("da", "broken", None, ErrorKind::MalformedTemplate)]
#[case::render_mismatch(
    "en",
    "books",
    Some(Context::new().with("n", "many")),
    ErrorKind::RenderMismatch
)]
fn strict_failures_keep_their_classification(
    store: Arc<TranslationStore>,
    #[case] locale: &str,
    #[case] key: &str,
    #[case] context: Option<Context>,
    #[case] kind: ErrorKind,
) {
    let resolver = resolver(store, locale, PolicyLayer::new());
    let err = resolver
        .resolve(key, context.as_ref(), None)
        .expect_err("strict mode propagates");
    assert_eq!(err.kind(), kind);
}

#[rstest]
#[case(1, "I bought 1 book")]
#[case(2, "I bought 2 books")]
#[case(1500, "I bought 1,500 books")]
fn plural_branches_follow_the_count(
    store: Arc<TranslationStore>,
    #[case] n: i32,
    #[case] expected: &str,
) {
    let resolver = resolver(store, "en", PolicyLayer::new());
    let context = Context::new().with("n", n);
    let message = resolver.resolve("books", Some(&context), None).expect("renders");
    assert_eq!(message, expected);
}

#[rstest]
fn danish_plural_uses_danish_rules(store: Arc<TranslationStore>) {
    let resolver = resolver(store, "da", PolicyLayer::new());
    let context = Context::new().with("n", 2);
    let message = resolver.resolve("books", Some(&context), None).expect("renders");
    assert_eq!(message, "Jeg købte 2 bøger");
}

#[rstest]
fn resolution_is_idempotent(store: Arc<TranslationStore>) {
    let resolver = resolver(store, "en", PolicyLayer::new());
    let context = Context::new().with("name", "World");
    let first = resolver.resolve("greetings", Some(&context), None);
    let second = resolver.resolve("greetings", Some(&context), None);
    assert_eq!(first, second);

    let first_err = resolver.resolve("greetings", None, None);
    let second_err = resolver.resolve("greetings", None, None);
    assert_eq!(first_err, second_err);
}

#[rstest]
fn unknown_keys_fail_in_both_modes(store: Arc<TranslationStore>) {
    for layer in [PolicyLayer::new(), PolicyLayer::new().strict(false)] {
        let resolver = resolver(Arc::clone(&store), "en", layer);
        let err = resolver
            .resolve("does.not.exist", None, None)
            .expect_err("unknown key");
        assert!(err.is_fatal());
    }
}

#[rstest]
fn tags_produce_fragments(store: Arc<TranslationStore>) {
    use locale_resolver::{Fragment, Value};

    let resolver = resolver(store, "en", PolicyLayer::new());
    let context = Context::new().with(
        "link",
        Value::tag(|children| {
            vec![Fragment::Node {
                tag: "a".into(),
                children,
            }]
        }),
    );
    let message = resolver
        .resolve("guide", Some(&context), None)
        .expect("renders");
    assert_eq!(message.to_plain_text(), "Read the guide first");
    assert!(matches!(message, Message::Fragments(ref parts) if parts.len() == 3));
}
