//! Builder that accumulates policy layers in precedence order.

use std::borrow::Cow;

use super::{PolicyLayer, PolicySource, ResolutionPolicy, merge_layers};
use crate::PolicyError;

/// Accumulates [`PolicySource`] values before merging them.
#[derive(Debug, Default)]
pub struct PolicyComposer {
    sources: Vec<PolicySource<'static>>,
}

impl PolicyComposer {
    /// Creates an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Pushes a defaults layer.
    pub fn push_defaults(&mut self, layer: PolicyLayer) {
        self.push_source(PolicySource::defaults(Cow::Owned(layer)));
    }

    /// Pushes a construction layer.
    pub fn push_construction(&mut self, layer: PolicyLayer) {
        self.push_source(PolicySource::construction(Cow::Owned(layer)));
    }

    /// Pushes a per-call layer.
    pub fn push_call(&mut self, layer: PolicyLayer) {
        self.push_source(PolicySource::call(Cow::Owned(layer)));
    }

    /// Pushes an arbitrary source.
    pub fn push_source(&mut self, source: PolicySource<'static>) {
        self.sources.push(source);
    }

    /// Returns the accumulated sources in push order.
    #[must_use]
    pub fn sources(&self) -> &[PolicySource<'static>] {
        &self.sources
    }

    /// Merges the accumulated sources.
    ///
    /// # Errors
    ///
    /// Propagates [`PolicyError`] from [`merge_layers`].
    pub fn merge(self) -> Result<ResolutionPolicy, PolicyError> {
        merge_layers(self.sources)
    }
}

impl IntoIterator for PolicyComposer {
    type Item = PolicySource<'static>;
    type IntoIter = std::vec::IntoIter<PolicySource<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.into_iter()
    }
}
