//! Capability interface onto the browser that hosts the palette.
//!
//! The aggregator never talks to a browser directly. Sources list tabs and
//! search history or bookmarks through [`Browser`], and selections are turned
//! into [`BrowserCommand`] values executed through the same trait. Extensions
//! plug in their own implementation; [`SnapshotBrowser`] serves a JSON
//! snapshot for terminals and tests.

mod command;
mod error;
mod snapshot;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use command::BrowserCommand;
pub use error::PlatformError;
pub use snapshot::{BrowserSnapshot, SnapshotBrowser};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserTab {
	pub id: i64,
	#[serde(default)]
	pub title: String,
	pub url: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fav_icon_url: Option<String>,
	#[serde(default)]
	pub active: bool,
	#[serde(default)]
	pub pinned: bool,
	#[serde(default)]
	pub muted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
	pub url: String,
	#[serde(default)]
	pub title: String,
}

/// Bookmark tree node. Folders carry no URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkEntry {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default)]
	pub title: String,
}

/// Asynchronous browser APIs consumed by the sources and the command handler.
#[async_trait]
pub trait Browser: Send + Sync {
	/// Every open tab across all windows.
	async fn tabs(&self) -> Result<Vec<BrowserTab>, PlatformError>;

	/// History entries matching `text`, most recent first, at most `max_results`.
	async fn search_history(
		&self,
		text: &str,
		max_results: usize,
	) -> Result<Vec<HistoryEntry>, PlatformError>;

	/// Bookmarks whose title or URL matches `text`.
	async fn search_bookmarks(&self, text: &str) -> Result<Vec<BookmarkEntry>, PlatformError>;

	/// Perform one side effect.
	async fn execute(&self, command: &BrowserCommand) -> Result<(), PlatformError>;
}
