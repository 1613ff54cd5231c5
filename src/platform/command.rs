use serde::{Deserialize, Serialize};

/// One browser side effect, addressed by the wire name carried in `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrowserCommand {
	SwitchTab {
		#[serde(rename = "tabId")]
		tab_id: i64,
	},
	NewTab {
		url: String,
	},
	ClearHistory,
	ClearCache,
	ClearCookies,
	ClearLocalStorage,
	BookmarkCurrentTab,
	RemoveBookmark,
	PinCurrentTab,
	MuteCurrentTab,
	ReloadCurrentTab,
	FullscreenCurrentTab,
	PrintCurrentTab,
	CloseCurrentTab,
	DuplicateCurrentTab,
	OpenIncognitoWindow,
	ClearOtherTabs,
}

impl BrowserCommand {
	/// Commands that take no arguments and can therefore be bound to an action.
	pub const UNIT: [BrowserCommand; 15] = [
		BrowserCommand::ClearHistory,
		BrowserCommand::ClearCache,
		BrowserCommand::ClearCookies,
		BrowserCommand::ClearLocalStorage,
		BrowserCommand::BookmarkCurrentTab,
		BrowserCommand::RemoveBookmark,
		BrowserCommand::PinCurrentTab,
		BrowserCommand::MuteCurrentTab,
		BrowserCommand::ReloadCurrentTab,
		BrowserCommand::FullscreenCurrentTab,
		BrowserCommand::PrintCurrentTab,
		BrowserCommand::CloseCurrentTab,
		BrowserCommand::DuplicateCurrentTab,
		BrowserCommand::OpenIncognitoWindow,
		BrowserCommand::ClearOtherTabs,
	];

	/// Wire identifier of the command.
	#[must_use]
	pub const fn id(&self) -> &'static str {
		match self {
			BrowserCommand::SwitchTab { .. } => "SWITCH_TAB",
			BrowserCommand::NewTab { .. } => "NEW_TAB",
			BrowserCommand::ClearHistory => "CLEAR_HISTORY",
			BrowserCommand::ClearCache => "CLEAR_CACHE",
			BrowserCommand::ClearCookies => "CLEAR_COOKIES",
			BrowserCommand::ClearLocalStorage => "CLEAR_LOCAL_STORAGE",
			BrowserCommand::BookmarkCurrentTab => "BOOKMARK_CURRENT_TAB",
			BrowserCommand::RemoveBookmark => "REMOVE_BOOKMARK",
			BrowserCommand::PinCurrentTab => "PIN_CURRENT_TAB",
			BrowserCommand::MuteCurrentTab => "MUTE_CURRENT_TAB",
			BrowserCommand::ReloadCurrentTab => "RELOAD_CURRENT_TAB",
			BrowserCommand::FullscreenCurrentTab => "FULLSCREEN_CURRENT_TAB",
			BrowserCommand::PrintCurrentTab => "PRINT_CURRENT_TAB",
			BrowserCommand::CloseCurrentTab => "CLOSE_CURRENT_TAB",
			BrowserCommand::DuplicateCurrentTab => "DUPLICATE_CURRENT_TAB",
			BrowserCommand::OpenIncognitoWindow => "OPEN_INCOGNITO_WINDOW",
			BrowserCommand::ClearOtherTabs => "CLEAR_OTHER_TABS",
		}
	}

	/// Look up an argument-free command by its wire identifier.
	#[must_use]
	pub fn from_id(id: &str) -> Option<Self> {
		Self::UNIT.into_iter().find(|command| command.id() == id)
	}

	/// Returns `true` when `type` names any command this enum understands.
	#[must_use]
	pub fn is_known(kind: &str) -> bool {
		matches!(kind, "SWITCH_TAB" | "NEW_TAB") || Self::from_id(kind).is_some()
	}
}
