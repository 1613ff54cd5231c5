use serde::{Deserialize, Serialize};

/// Origin of a suggestion. Determines the icon, the selection behaviour and the
/// priority bucket a suggestion falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    History,
    Bookmark,
    Tab,
    Search,
    Action,
    Website,
}

impl SuggestionKind {
    /// Stable identifier used on the wire.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            SuggestionKind::History => "history",
            SuggestionKind::Bookmark => "bookmark",
            SuggestionKind::Tab => "tab",
            SuggestionKind::Search => "search",
            SuggestionKind::Action => "action",
            SuggestionKind::Website => "website",
        }
    }
}

/// One candidate result shown in the command palette.
///
/// `content` is the identity of a suggestion: two suggestions with the same
/// content describe the same destination regardless of their kind or label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Canonical destination, either a URL or an action identifier.
    pub content: String,
    /// Human readable label.
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Resolved favicon or static icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Browser tab handle, only present for [`SuggestionKind::Tab`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<i64>,
}

impl Suggestion {
    /// Create a suggestion without an icon.
    ///
    /// Tab suggestions should be built with [`Suggestion::tab`] so they carry
    /// the handle needed to reactivate them.
    #[must_use]
    pub fn new(
        kind: SuggestionKind,
        content: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            description: description.into(),
            kind,
            icon_url: None,
            tab_id: None,
        }
    }

    /// Create a suggestion pointing at an already open tab.
    #[must_use]
    pub fn tab(tab_id: i64, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tab_id: Some(tab_id),
            ..Self::new(SuggestionKind::Tab, url, description)
        }
    }

    /// Attach an icon reference, replacing any previous one.
    #[must_use]
    pub fn with_icon(mut self, icon_url: Option<String>) -> Self {
        self.icon_url = icon_url;
        self
    }

    /// Returns `true` for suggestions describing an open tab.
    #[must_use]
    pub fn is_tab(&self) -> bool {
        self.kind == SuggestionKind::Tab
    }
}
