//! Steps that build resolvers and resolve keys.

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use locale_resolver::{Context, PolicyLayer, Resolver, TranslationStore, Value};
use rstest_bdd_macros::{given, then, when};
use test_helpers::fixtures::SAMPLE_STORE;
use test_helpers::text::{parse_assignments, unquote};

use crate::fixtures::ResolutionContext;

fn build(resolution: &ResolutionContext, locale: &str, layer: PolicyLayer) -> Result<()> {
    let store = resolution
        .store
        .with_ref(Arc::clone)
        .ok_or_else(|| anyhow!("store must be loaded first"))?;
    let resolver = Resolver::new(store, unquote(locale), layer)?;
    resolution.resolver.set(resolver);
    Ok(())
}

fn value_of(text: &str) -> Value {
    if let Ok(flag) = text.parse::<bool>() {
        return Value::Bool(flag);
    }
    text.parse::<f64>()
        .map_or_else(|_| Value::from(text), Value::Number)
}

fn resolve(resolution: &ResolutionContext, key: &str, context: Option<&Context>) -> Result<()> {
    let outcome = resolution
        .resolver
        .with_ref(|resolver| resolver.resolve(unquote(key), context, None))
        .ok_or_else(|| anyhow!("resolver must be built first"))?;
    resolution.outcome.set(outcome);
    Ok(())
}

#[given("the sample translation store")]
fn sample_store(resolution: &ResolutionContext) -> Result<()> {
    let store = TranslationStore::from_json_str(SAMPLE_STORE)?;
    resolution.store.set(Arc::new(store));
    Ok(())
}

#[given("a strict resolver for locale {locale}")]
fn strict_resolver(resolution: &ResolutionContext, locale: String) -> Result<()> {
    build(resolution, &locale, PolicyLayer::new())
}

#[given("a lenient resolver for locale {locale} falling back to {fallback}")]
fn lenient_with_fallback(
    resolution: &ResolutionContext,
    locale: String,
    fallback: String,
) -> Result<()> {
    let layer = PolicyLayer::new()
        .strict(false)
        .fallback_language(unquote(&fallback));
    build(resolution, &locale, layer)
}

#[given("a lenient resolver for locale {locale} with missing message {message}")]
fn lenient_with_message(
    resolution: &ResolutionContext,
    locale: String,
    message: String,
) -> Result<()> {
    let layer = PolicyLayer::new()
        .strict(false)
        .missing_message(unquote(&message));
    build(resolution, &locale, layer)
}

#[when("I resolve {key} with {values}")]
fn resolve_with_values(resolution: &ResolutionContext, key: String, values: String) -> Result<()> {
    let context: Context = parse_assignments(&values)
        .into_iter()
        .map(|(name, text)| (name, value_of(&text)))
        .collect();
    resolve(resolution, &key, Some(&context))
}

#[when("I resolve {key} without values")]
fn resolve_without_values(resolution: &ResolutionContext, key: String) -> Result<()> {
    resolve(resolution, &key, None)
}

#[then("the message reads {expected}")]
fn message_is(resolution: &ResolutionContext, expected: String) -> Result<()> {
    let outcome = resolution
        .outcome
        .take()
        .ok_or_else(|| anyhow!("expected a resolution outcome"))?;
    let message = outcome?;
    let want = unquote(&expected);
    ensure!(message == want, "resolved {message:?}; expected {want:?}");
    Ok(())
}

#[then("the message is empty")]
fn message_is_empty(resolution: &ResolutionContext) -> Result<()> {
    let outcome = resolution
        .outcome
        .take()
        .ok_or_else(|| anyhow!("expected a resolution outcome"))?;
    let message = outcome?;
    ensure!(message == "", "resolved {message:?}; expected empty text");
    Ok(())
}

#[then("resolution fails with {kind}")]
fn resolution_fails(resolution: &ResolutionContext, kind: String) -> Result<()> {
    let outcome = resolution
        .outcome
        .take()
        .ok_or_else(|| anyhow!("expected a resolution outcome"))?;
    let Err(err) = outcome else {
        return Err(anyhow!("resolution unexpectedly succeeded"));
    };
    let actual = format!("{:?}", err.kind());
    ensure!(actual == kind.trim(), "failed with {actual}; expected {kind}");
    Ok(())
}
