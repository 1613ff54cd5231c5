//! The compiled-in table of quick actions.
//!
//! Actions are ordinary [`Suggestion`]s of kind `action`. Browser actions use
//! the command's wire identifier as their `content` and carry the bound
//! [`BrowserCommand`]; quick-launch entries use a URL and open it in a new tab.

use std::sync::Arc;

use ktab_source_api::{Suggestion, SuggestionKind};

use crate::platform::BrowserCommand;

/// One entry of the action table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
	pub suggestion: Suggestion,
	/// Behaviour run on selection. `None` opens `content` as a page.
	pub command: Option<BrowserCommand>,
	/// Keyboard shortcut label for the current platform.
	pub shortcut: Option<&'static str>,
}

impl Action {
	fn command(command: BrowserCommand, description: &str, icon: &str) -> Self {
		Self {
			suggestion: Suggestion::new(SuggestionKind::Action, command.id(), description)
				.with_icon(Some(format!("icon:{icon}"))),
			command: Some(command),
			shortcut: None,
		}
	}

	fn link(url: &str, description: &str, asset: &str) -> Self {
		Self {
			suggestion: Suggestion::new(SuggestionKind::Action, url, description)
				.with_icon(Some(format!("/assets/{asset}"))),
			command: None,
			shortcut: None,
		}
	}

	fn with_shortcut(mut self, mac: &'static str, other: &'static str) -> Self {
		self.shortcut = Some(if cfg!(target_os = "macos") { mac } else { other });
		self
	}

	fn matches(&self, needle: &str) -> bool {
		self.suggestion.description.to_lowercase().contains(needle)
			|| self.suggestion.content.to_lowercase().contains(needle)
	}
}

/// Immutable, cheaply clonable list of actions.
#[derive(Clone, Debug)]
pub struct ActionTable {
	actions: Arc<[Action]>,
}

impl ActionTable {
	#[must_use]
	pub fn new(actions: Vec<Action>) -> Self {
		Self {
			actions: actions.into(),
		}
	}

	/// The default table shipped with ktab.
	#[must_use]
	pub fn builtin() -> Self {
		use BrowserCommand as C;

		Self::new(vec![
			Action::command(C::BookmarkCurrentTab, "Bookmark current tab", "bookmark")
				.with_shortcut("⌘D", "Ctrl+D"),
			Action::command(
				C::RemoveBookmark,
				"Remove bookmark for current tab",
				"remove-bookmark",
			),
			Action::command(C::PinCurrentTab, "Pin/Unpin current tab", "pin"),
			Action::command(C::MuteCurrentTab, "Mute/Unmute current tab", "mute")
				.with_shortcut("⌥⌘M", "Alt+Shift+M"),
			Action::command(C::ReloadCurrentTab, "Reload current tab", "reload")
				.with_shortcut("⌘R", "Ctrl+R"),
			Action::command(
				C::FullscreenCurrentTab,
				"Toggle fullscreen for current tab",
				"fullscreen",
			)
			.with_shortcut("F11", "F11"),
			Action::command(C::PrintCurrentTab, "Print current tab", "print")
				.with_shortcut("⌘P", "Ctrl+P"),
			Action::command(C::CloseCurrentTab, "Close current tab", "close")
				.with_shortcut("⌘W", "Ctrl+W"),
			Action::command(C::DuplicateCurrentTab, "Duplicate current tab", "duplicate"),
			Action::command(
				C::ClearOtherTabs,
				"Close all tabs except the current one",
				"close-others",
			),
			Action::command(C::OpenIncognitoWindow, "Open new incognito window", "incognito")
				.with_shortcut("⌘⇧N", "Ctrl+Shift+N"),
			Action::command(C::ClearCache, "Clear browser cache", "cache"),
			Action::command(C::ClearHistory, "Clear browsing history", "history"),
			Action::command(C::ClearCookies, "Clear cookies", "cookies"),
			Action::command(C::ClearLocalStorage, "Clear local storage", "local-storage"),
			Action::link(
				"https://docs.new",
				"Create a new Google Docs document",
				"docs.png",
			),
			Action::link(
				"https://slides.new",
				"Create a new Google Slides presentation",
				"slides.png",
			),
			Action::link(
				"https://sheets.new",
				"Create a new Google Sheets spreadsheet",
				"sheets.png",
			),
			Action::link("https://meet.new", "Start a new Google Meet", "meet.png"),
			Action::link(
				"https://www.notion.so/new",
				"Create a new Notion page",
				"notion.png",
			),
			Action::link(
				"https://github.com/new",
				"Create a new GitHub repository",
				"github.svg",
			),
			Action::link("https://text2audio.cc", "Text to Speech", "text2audio.ico"),
			Action::link(
				"https://trello.com/create-board",
				"Create new Trello board",
				"trello.png",
			),
			Action::link(
				"https://figma.new",
				"Create a new Figma design file",
				"figma.png",
			),
			Action::link(
				"https://codepen.io/pen/",
				"Create a new CodePen",
				"codepen.ico",
			),
		])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Action> {
		self.actions.iter()
	}

	/// Every action as a suggestion, in table order.
	#[must_use]
	pub fn suggestions(&self) -> Vec<Suggestion> {
		self.iter().map(|action| action.suggestion.clone()).collect()
	}

	/// Case-insensitive substring filter on description and content.
	#[must_use]
	pub fn filter(&self, needle: &str, limit: usize) -> Vec<Suggestion> {
		let needle = needle.trim().to_lowercase();
		self.iter()
			.filter(|action| action.matches(&needle))
			.take(limit)
			.map(|action| action.suggestion.clone())
			.collect()
	}

	/// The command bound to the action whose content is `content`.
	#[must_use]
	pub fn command_for(&self, content: &str) -> Option<&BrowserCommand> {
		self.iter()
			.find(|action| action.suggestion.content == content)
			.and_then(|action| action.command.as_ref())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.actions.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

impl Default for ActionTable {
	fn default() -> Self {
		Self::builtin()
	}
}

#[cfg(test)]
mod tests {
	use ktab_source_api::dedup;

	use super::*;

	#[test]
	fn builtin_table_has_unique_contents() {
		let table = ActionTable::builtin();
		assert_eq!(table.len(), 25);
		assert_eq!(dedup(table.suggestions()).len(), table.len());
		assert!(table.iter().all(|action| action.suggestion.kind == SuggestionKind::Action));
	}

	#[test]
	fn every_unit_command_is_bound_once() {
		let table = ActionTable::builtin();
		for command in BrowserCommand::UNIT {
			assert_eq!(table.command_for(command.id()), Some(&command));
		}
		assert_eq!(table.command_for("https://docs.new"), None);
	}

	#[test]
	fn filter_matches_description_and_content() {
		let table = ActionTable::builtin();

		let tabs = table.filter("Current TAB", 50);
		assert!(tabs.iter().any(|s| s.content == "BOOKMARK_CURRENT_TAB"));
		assert!(tabs.iter().all(|s| {
			s.description.to_lowercase().contains("current tab")
				|| s.content.to_lowercase().contains("current tab")
		}));

		let by_url = table.filter("figma.new", 50);
		assert_eq!(by_url.len(), 1);
		assert_eq!(by_url[0].description, "Create a new Figma design file");

		assert_eq!(table.filter("", 3).len(), 3);
	}
}
