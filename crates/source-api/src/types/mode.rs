use serde::{Deserialize, Serialize};

/// Input mode of a query: either every source, or a single source selected
/// through an explicit mode token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    #[default]
    All,
    TabOnly,
    HistoryOnly,
    BookmarkOnly,
    ActionOnly,
}

impl QueryMode {
    /// Stable string identifier for the mode, used in messages and configuration.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            QueryMode::All => "all",
            QueryMode::TabOnly => "tab-only",
            QueryMode::HistoryOnly => "history-only",
            QueryMode::BookmarkOnly => "bookmark-only",
            QueryMode::ActionOnly => "action-only",
        }
    }

    /// List of all supported modes in their default order.
    #[must_use]
    pub const fn all() -> [QueryMode; 5] {
        [
            QueryMode::All,
            QueryMode::TabOnly,
            QueryMode::HistoryOnly,
            QueryMode::BookmarkOnly,
            QueryMode::ActionOnly,
        ]
    }

    /// Resolve a mode from its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|mode| mode.id() == id)
    }

    /// Returns `true` when the query is restricted to one source.
    #[must_use]
    pub const fn is_scoped(self) -> bool {
        !matches!(self, QueryMode::All)
    }

    /// Mode selected by an input prefix token such as `/t` or `/history`.
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "/t" | "/tabs" => Some(QueryMode::TabOnly),
            "/h" | "/history" => Some(QueryMode::HistoryOnly),
            "/b" | "/bookmarks" => Some(QueryMode::BookmarkOnly),
            "/a" | "/actions" => Some(QueryMode::ActionOnly),
            _ => None,
        }
    }

    /// Split a leading mode token off `input`.
    ///
    /// The token must be followed by whitespace; anything else is treated as a
    /// plain query so that typing `/t` on its own does not switch modes yet.
    #[must_use]
    pub fn split_prefix(input: &str) -> (QueryMode, &str) {
        let trimmed = input.trim_start();
        if let Some((token, rest)) = trimmed.split_once(char::is_whitespace)
            && let Some(mode) = Self::from_token(token)
        {
            return (mode, rest.trim_start());
        }
        (QueryMode::All, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for mode in QueryMode::all() {
            assert_eq!(QueryMode::from_id(mode.id()), Some(mode));
        }
        assert_eq!(QueryMode::from_id("tabs"), None);
    }

    #[test]
    fn prefix_tokens_select_scoped_modes() {
        assert_eq!(QueryMode::split_prefix("/t git"), (QueryMode::TabOnly, "git"));
        assert_eq!(
            QueryMode::split_prefix("/history   rust book"),
            (QueryMode::HistoryOnly, "rust book")
        );
        assert_eq!(QueryMode::split_prefix("/b "), (QueryMode::BookmarkOnly, ""));
    }

    #[test]
    fn bare_or_unknown_tokens_are_plain_queries() {
        assert_eq!(QueryMode::split_prefix("/t"), (QueryMode::All, "/t"));
        assert_eq!(QueryMode::split_prefix("/x foo"), (QueryMode::All, "/x foo"));
        assert_eq!(QueryMode::split_prefix("git /t"), (QueryMode::All, "git /t"));
    }

    #[test]
    fn deserializes_kebab_case() {
        let mode: QueryMode = serde_json::from_str("\"bookmark-only\"").expect("parse");
        assert_eq!(mode, QueryMode::BookmarkOnly);
        assert!(mode.is_scoped());
        assert!(!QueryMode::All.is_scoped());
    }
}
