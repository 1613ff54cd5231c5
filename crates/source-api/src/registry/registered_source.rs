use std::sync::Arc;

use crate::context::QueryContext;
use crate::descriptors::SourceDescriptor;
use crate::source::SuggestionSource;
use crate::types::{QueryMode, Suggestion};

/// Metadata and implementation pair stored by the registry.
#[derive(Clone)]
pub struct RegisteredSource {
    descriptor: &'static SourceDescriptor,
    source: Arc<dyn SuggestionSource>,
}

impl RegisteredSource {
    #[must_use]
    pub fn new(descriptor: &'static SourceDescriptor, source: Arc<dyn SuggestionSource>) -> Self {
        Self { descriptor, source }
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    #[must_use]
    pub fn scope(&self) -> Option<QueryMode> {
        self.descriptor.scope
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static SourceDescriptor {
        self.descriptor
    }

    /// Run the wrapped source and cut its answer down to `limit`.
    pub async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
        let mut results = self.source.search(context, limit).await;
        results.truncate(limit);
        results
    }
}

impl std::fmt::Debug for RegisteredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RegisteredSource").field(&self.id()).finish()
    }
}
