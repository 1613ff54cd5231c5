use ktab::SearchLimits;
use serde::Deserialize;

/// Per-surface caps; unset keys fall back to the surface defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LimitsSection {
    pub(super) max_results: Option<usize>,
    pub(super) history: Option<usize>,
    pub(super) bookmarks: Option<usize>,
    pub(super) autocomplete: Option<usize>,
    pub(super) actions: Option<bool>,
}

impl LimitsSection {
    pub(super) fn resolve(&self, defaults: SearchLimits) -> SearchLimits {
        SearchLimits {
            max_results: self.max_results.unwrap_or(defaults.max_results),
            history: self.history.unwrap_or(defaults.history),
            bookmarks: self.bookmarks.unwrap_or(defaults.bookmarks),
            autocomplete: self.autocomplete.unwrap_or(defaults.autocomplete),
            actions: self.actions.unwrap_or(defaults.actions),
        }
    }
}
