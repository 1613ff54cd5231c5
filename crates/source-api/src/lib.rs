//! Shared interfaces for ktab suggestion sources.
//!
//! Every origin the palette can draw from (open tabs, history, bookmarks, the
//! static action table, remote autocomplete, ...) is exposed through the
//! [`SuggestionSource`] trait and registered in a [`SourceRegistry`]. The types
//! in this crate carry no browser or network dependencies so that adapters and
//! the aggregation pipeline can be tested in isolation.

pub mod context;
pub mod descriptors;
pub mod error;
pub mod icons;
pub mod registry;
pub mod source;
pub mod types;

pub use context::QueryContext;
pub use descriptors::{SourceDescriptor, SourceLatency};
pub use error::SourceRegistryError;
pub use icons::{IconPool, IconResolver, domain_of};
pub use registry::{RegisteredSource, SourceRegistry};
pub use source::SuggestionSource;
pub use types::{QueryMode, SeenSet, Suggestion, SuggestionKind, dedup};
