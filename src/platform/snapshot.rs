use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BookmarkEntry, Browser, BrowserCommand, BrowserTab, HistoryEntry, PlatformError};

/// Serialized browser state: open tabs, history (most recent first) and
/// bookmarks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSnapshot {
	pub tabs: Vec<BrowserTab>,
	pub history: Vec<HistoryEntry>,
	pub bookmarks: Vec<BookmarkEntry>,
}

#[derive(Debug)]
struct SnapshotState {
	snapshot: BrowserSnapshot,
	executed: Vec<BrowserCommand>,
	incognito_windows: usize,
	next_tab_id: i64,
}

/// In-memory [`Browser`] backed by a [`BrowserSnapshot`].
///
/// Commands mutate the snapshot the way a browser would (switching, pinning,
/// closing tabs, editing bookmarks) and every applied command is recorded.
#[derive(Debug)]
pub struct SnapshotBrowser {
	state: Mutex<SnapshotState>,
}

impl SnapshotBrowser {
	#[must_use]
	pub fn new(snapshot: BrowserSnapshot) -> Self {
		let next_tab_id = snapshot.tabs.iter().map(|tab| tab.id).max().unwrap_or(0) + 1;
		Self {
			state: Mutex::new(SnapshotState {
				snapshot,
				executed: Vec::new(),
				incognito_windows: 0,
				next_tab_id,
			}),
		}
	}

	/// Load a snapshot from a JSON file.
	pub fn load(path: &Path) -> Result<Self> {
		let contents = fs::read_to_string(path)
			.with_context(|| format!("failed to read browser snapshot {}", path.display()))?;
		let snapshot: BrowserSnapshot = serde_json::from_str(&contents)
			.with_context(|| format!("failed to parse browser snapshot {}", path.display()))?;
		debug!(
			tabs = snapshot.tabs.len(),
			history = snapshot.history.len(),
			bookmarks = snapshot.bookmarks.len(),
			"loaded browser snapshot"
		);
		Ok(Self::new(snapshot))
	}

	/// Copy of the current state.
	#[must_use]
	pub fn snapshot(&self) -> BrowserSnapshot {
		self.state().snapshot.clone()
	}

	/// Commands applied so far, in order.
	#[must_use]
	pub fn executed(&self) -> Vec<BrowserCommand> {
		self.state().executed.clone()
	}

	#[must_use]
	pub fn incognito_windows(&self) -> usize {
		self.state().incognito_windows
	}

	fn state(&self) -> MutexGuard<'_, SnapshotState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Default for SnapshotBrowser {
	fn default() -> Self {
		Self::new(BrowserSnapshot::default())
	}
}

fn matches_text(needle: &str, title: &str, url: &str) -> bool {
	needle.is_empty()
		|| title.to_lowercase().contains(needle)
		|| url.to_lowercase().contains(needle)
}

impl SnapshotState {
	fn active_index(&self) -> Result<usize, PlatformError> {
		self.snapshot
			.tabs
			.iter()
			.position(|tab| tab.active)
			.ok_or(PlatformError::NoActiveTab)
	}

	fn activate(&mut self, index: usize) {
		for (position, tab) in self.snapshot.tabs.iter_mut().enumerate() {
			tab.active = position == index;
		}
	}

	fn open(&mut self, mut tab: BrowserTab) {
		tab.id = self.next_tab_id;
		self.next_tab_id += 1;
		self.snapshot.tabs.push(tab);
		self.activate(self.snapshot.tabs.len() - 1);
	}

	fn apply(&mut self, command: &BrowserCommand) -> Result<(), PlatformError> {
		match command {
			BrowserCommand::SwitchTab { tab_id } => {
				let index = self
					.snapshot
					.tabs
					.iter()
					.position(|tab| tab.id == *tab_id)
					.ok_or(PlatformError::TabNotFound { tab_id: *tab_id })?;
				self.activate(index);
			}
			BrowserCommand::NewTab { url } => self.open(BrowserTab {
				id: 0,
				title: String::new(),
				url: url.clone(),
				fav_icon_url: None,
				active: true,
				pinned: false,
				muted: false,
			}),
			BrowserCommand::ClearHistory => self.snapshot.history.clear(),
			BrowserCommand::ClearCache
			| BrowserCommand::ClearCookies
			| BrowserCommand::ClearLocalStorage => {}
			BrowserCommand::BookmarkCurrentTab => {
				let tab = &self.snapshot.tabs[self.active_index()?];
				let url = tab.url.clone();
				let title = tab.title.clone();
				let bookmarked = self
					.snapshot
					.bookmarks
					.iter()
					.any(|bookmark| bookmark.url.as_deref() == Some(url.as_str()));
				if !bookmarked {
					self.snapshot.bookmarks.push(BookmarkEntry {
						url: Some(url),
						title,
					});
				}
			}
			BrowserCommand::RemoveBookmark => {
				let url = self.snapshot.tabs[self.active_index()?].url.clone();
				let before = self.snapshot.bookmarks.len();
				self.snapshot
					.bookmarks
					.retain(|bookmark| bookmark.url.as_deref() != Some(url.as_str()));
				if self.snapshot.bookmarks.len() == before {
					return Err(PlatformError::BookmarkNotFound { url });
				}
			}
			BrowserCommand::PinCurrentTab => {
				let index = self.active_index()?;
				let tab = &mut self.snapshot.tabs[index];
				tab.pinned = !tab.pinned;
			}
			BrowserCommand::MuteCurrentTab => {
				let index = self.active_index()?;
				let tab = &mut self.snapshot.tabs[index];
				tab.muted = !tab.muted;
			}
			BrowserCommand::ReloadCurrentTab
			| BrowserCommand::FullscreenCurrentTab
			| BrowserCommand::PrintCurrentTab => {
				self.active_index()?;
			}
			BrowserCommand::CloseCurrentTab => {
				let index = self.active_index()?;
				self.snapshot.tabs.remove(index);
				if let Some(last) = self.snapshot.tabs.len().checked_sub(1) {
					self.activate(last);
				}
			}
			BrowserCommand::DuplicateCurrentTab => {
				let copy = self.snapshot.tabs[self.active_index()?].clone();
				self.open(copy);
			}
			BrowserCommand::OpenIncognitoWindow => self.incognito_windows += 1,
			BrowserCommand::ClearOtherTabs => {
				self.active_index()?;
				self.snapshot.tabs.retain(|tab| tab.active);
			}
		}
		self.executed.push(command.clone());
		Ok(())
	}
}

#[async_trait]
impl Browser for SnapshotBrowser {
	async fn tabs(&self) -> Result<Vec<BrowserTab>, PlatformError> {
		Ok(self.state().snapshot.tabs.clone())
	}

	async fn search_history(
		&self,
		text: &str,
		max_results: usize,
	) -> Result<Vec<HistoryEntry>, PlatformError> {
		let needle = text.trim().to_lowercase();
		Ok(self
			.state()
			.snapshot
			.history
			.iter()
			.filter(|entry| matches_text(&needle, &entry.title, &entry.url))
			.take(max_results)
			.cloned()
			.collect())
	}

	async fn search_bookmarks(&self, text: &str) -> Result<Vec<BookmarkEntry>, PlatformError> {
		let needle = text.trim().to_lowercase();
		Ok(self
			.state()
			.snapshot
			.bookmarks
			.iter()
			.filter(|entry| matches_text(&needle, &entry.title, entry.url.as_deref().unwrap_or("")))
			.cloned()
			.collect())
	}

	async fn execute(&self, command: &BrowserCommand) -> Result<(), PlatformError> {
		self.state().apply(command)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use tempfile::NamedTempFile;

	use super::*;

	fn tab(id: i64, title: &str, url: &str, active: bool) -> BrowserTab {
		BrowserTab {
			id,
			title: title.into(),
			url: url.into(),
			fav_icon_url: None,
			active,
			pinned: false,
			muted: false,
		}
	}

	fn browser() -> SnapshotBrowser {
		SnapshotBrowser::new(BrowserSnapshot {
			tabs: vec![
				tab(1, "GitHub", "https://github.com", true),
				tab(2, "Docs", "https://docs.rs", false),
			],
			history: vec![
				HistoryEntry {
					url: "https://github.com/rust-lang/rust".into(),
					title: "rust-lang/rust".into(),
				},
				HistoryEntry {
					url: "https://news.ycombinator.com".into(),
					title: "Hacker News".into(),
				},
			],
			bookmarks: vec![
				BookmarkEntry {
					url: None,
					title: "Rust folder".into(),
				},
				BookmarkEntry {
					url: Some("https://rust-lang.org".into()),
					title: "Rust".into(),
				},
			],
		})
	}

	#[tokio::test]
	async fn searches_match_title_or_url_case_insensitively() {
		let browser = browser();
		let history = browser.search_history("RUST", 10).await.expect("history");
		assert_eq!(history.len(), 1);

		let limited = browser.search_history("", 1).await.expect("history");
		assert_eq!(limited.len(), 1);

		let bookmarks = browser.search_bookmarks("rust").await.expect("bookmarks");
		assert_eq!(bookmarks.len(), 2);
	}

	#[tokio::test]
	async fn commands_mutate_tabs() {
		let browser = browser();
		browser
			.execute(&BrowserCommand::SwitchTab { tab_id: 2 })
			.await
			.expect("switch");
		browser.execute(&BrowserCommand::PinCurrentTab).await.expect("pin");
		browser
			.execute(&BrowserCommand::NewTab {
				url: "https://docs.new".into(),
			})
			.await
			.expect("new tab");

		let snapshot = browser.snapshot();
		assert_eq!(snapshot.tabs.len(), 3);
		assert!(snapshot.tabs[1].pinned);
		assert_eq!(snapshot.tabs[2].id, 3);
		assert!(snapshot.tabs[2].active);
		assert!(!snapshot.tabs[1].active);

		browser.execute(&BrowserCommand::ClearOtherTabs).await.expect("close others");
		assert_eq!(browser.snapshot().tabs.len(), 1);
		assert_eq!(browser.executed().len(), 4);
	}

	#[tokio::test]
	async fn failures_are_reported_and_not_recorded() {
		let browser = browser();
		let missing = browser
			.execute(&BrowserCommand::SwitchTab { tab_id: 42 })
			.await;
		assert_eq!(missing, Err(PlatformError::TabNotFound { tab_id: 42 }));

		let unbookmarked = browser.execute(&BrowserCommand::RemoveBookmark).await;
		assert!(matches!(unbookmarked, Err(PlatformError::BookmarkNotFound { .. })));

		browser
			.execute(&BrowserCommand::BookmarkCurrentTab)
			.await
			.expect("bookmark");
		browser
			.execute(&BrowserCommand::RemoveBookmark)
			.await
			.expect("remove");
		assert_eq!(browser.executed().len(), 2);

		let empty = SnapshotBrowser::default();
		assert_eq!(
			empty.execute(&BrowserCommand::ReloadCurrentTab).await,
			Err(PlatformError::NoActiveTab)
		);
	}

	#[test]
	fn load_reads_json_snapshot() {
		let mut file = NamedTempFile::new().expect("temp file");
		write!(
			file,
			r#"{{"tabs":[{{"id":7,"title":"Rust","url":"https://rust-lang.org","favIconUrl":"https://rust-lang.org/favicon.ico"}}]}}"#
		)
		.expect("write");

		let browser = SnapshotBrowser::load(file.path()).expect("load");
		let snapshot = browser.snapshot();
		assert_eq!(snapshot.tabs[0].id, 7);
		assert_eq!(
			snapshot.tabs[0].fav_icon_url.as_deref(),
			Some("https://rust-lang.org/favicon.ico")
		);
		assert!(snapshot.history.is_empty());
	}
}
