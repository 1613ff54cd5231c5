use std::sync::Arc;

use crate::error::SourceRegistryError;
use crate::source::SuggestionSource;
use crate::types::QueryMode;

use super::RegisteredSource;

/// Registry of every source the aggregator may fan out to.
///
/// Registration order is significant: immediate sources are delivered in the
/// order they were registered.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<RegisteredSource>,
}

impl SourceRegistry {
    /// Create a registry without any sources registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source implementation.
    pub fn register<S>(&mut self, source: S) -> Result<(), SourceRegistryError>
    where
        S: SuggestionSource + 'static,
    {
        self.register_shared(Arc::new(source))
    }

    /// Register a source that is already shared elsewhere.
    pub fn register_shared(
        &mut self,
        source: Arc<dyn SuggestionSource>,
    ) -> Result<(), SourceRegistryError> {
        let descriptor = source.descriptor();
        if self.contains_id(descriptor.id) {
            return Err(SourceRegistryError::DuplicateId { id: descriptor.id });
        }
        if let Some(mode) = descriptor.scope {
            if !mode.is_scoped() {
                return Err(SourceRegistryError::UnscopedClaim { id: descriptor.id });
            }
            if self.source_for(mode).is_some() {
                return Err(SourceRegistryError::DuplicateScope { mode });
            }
        }
        self.sources.push(RegisteredSource::new(descriptor, source));
        Ok(())
    }

    /// Lookup the source answering the scoped `mode`.
    pub fn source_for(&self, mode: QueryMode) -> Option<&RegisteredSource> {
        self.sources
            .iter()
            .find(|entry| entry.scope() == Some(mode))
    }

    /// Attempt to resolve a source identifier to a registered source.
    pub fn by_id(&self, id: &str) -> Option<&RegisteredSource> {
        self.sources.iter().find(|entry| entry.id() == id)
    }

    /// Iterate over all registered sources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSource> {
        self.sources.iter()
    }

    /// Remove the source registered under `id`.
    pub fn deregister(&mut self, id: &str) -> Option<RegisteredSource> {
        let index = self.sources.iter().position(|entry| entry.id() == id)?;
        Some(self.sources.remove(index))
    }

    /// Returns `true` if a source has been registered under `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }

    /// Return the number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` when no sources have been registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
