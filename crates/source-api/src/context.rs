use crate::icons::IconPool;
use crate::types::QueryMode;

/// Inputs shared with every source while servicing one request.
///
/// A context is created per request and carries its identifier so results can
/// be checked for staleness when they arrive. Wrapping the state in a struct
/// keeps the [`SuggestionSource`](crate::SuggestionSource) signature stable as
/// more per-request data is added.
#[derive(Debug)]
pub struct QueryContext {
    id: u64,
    text: String,
    mode: QueryMode,
    icons: IconPool,
}

impl QueryContext {
    /// Create a new context describing the current query.
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>, mode: QueryMode, icons: IconPool) -> Self {
        Self {
            id,
            text: text.into(),
            mode,
            icons,
        }
    }

    /// Identifier of the request this context belongs to.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Query text with any mode prefix already removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lower-cased query text for case-insensitive matching.
    #[must_use]
    pub fn needle(&self) -> String {
        self.text.trim().to_lowercase()
    }

    #[must_use]
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Icon lookups memoized for the lifetime of this request.
    #[must_use]
    pub fn icons(&self) -> &IconPool {
        &self.icons
    }
}
