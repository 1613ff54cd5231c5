use async_trait::async_trait;

use crate::context::QueryContext;
use crate::descriptors::SourceDescriptor;
use crate::types::Suggestion;

/// A data source wrapped behind the uniform search contract.
///
/// Sources recover from their own failures: a browser or network error turns
/// into an empty result rather than an error for the caller, so one failing
/// source never cancels the others.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Static descriptor advertising source metadata.
    fn descriptor(&self) -> &'static SourceDescriptor;

    /// Identifier of this source.
    fn id(&self) -> &'static str {
        self.descriptor().id
    }

    /// Return at most `limit` suggestions for the query in `context`, in
    /// source order.
    async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion>;
}
