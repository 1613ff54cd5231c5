use thiserror::Error;

use crate::types::QueryMode;

/// Errors that can occur when mutating the [`SourceRegistry`](crate::SourceRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceRegistryError {
    /// A source attempted to register an identifier that already exists in the registry.
    #[error("source id '{id}' is already registered")]
    DuplicateId { id: &'static str },

    /// A source claimed a scoped mode that another source already answers.
    #[error("a source for mode {mode:?} is already registered")]
    DuplicateScope { mode: QueryMode },

    /// A source claimed the unscoped mode, which always fans out.
    #[error("source '{id}' cannot claim the unscoped mode")]
    UnscopedClaim { id: &'static str },
}
