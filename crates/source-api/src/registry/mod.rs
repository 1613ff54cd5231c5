mod registered_source;
mod store;

pub use registered_source::RegisteredSource;
pub use store::SourceRegistry;
