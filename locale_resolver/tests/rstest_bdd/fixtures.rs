//! Shared fixtures for the behavioural suite.

use std::sync::Arc;

use locale_resolver::{Message, ResolveError, Resolver, TranslationStore};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State shared by the resolution steps.
#[derive(Debug, Default, ScenarioState)]
pub struct ResolutionContext {
    pub store: Slot<Arc<TranslationStore>>,
    pub resolver: Slot<Resolver>,
    pub outcome: Slot<Result<Message, ResolveError>>,
}

/// State shared by the settings steps.
#[derive(Debug, Default, ScenarioState)]
pub struct SettingsContext {
    pub file_locale: Slot<String>,
    pub env: Slot<Vec<(String, String)>>,
    pub outcome: Slot<Result<String, String>>,
}

/// Creates a clean resolution context.
#[fixture]
pub fn resolution() -> ResolutionContext {
    ResolutionContext::default()
}

/// Creates a clean settings context.
#[fixture]
pub fn settings() -> SettingsContext {
    SettingsContext::default()
}
