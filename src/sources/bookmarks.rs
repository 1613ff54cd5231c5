use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use ktab_source_api::{
	QueryContext, QueryMode, SourceDescriptor, SourceLatency, Suggestion, SuggestionKind,
	SuggestionSource,
};
use tracing::warn;

use crate::platform::Browser;

pub const ID: &str = "bookmarks";

static DESCRIPTOR: SourceDescriptor = SourceDescriptor {
	id: ID,
	label: "Bookmarks",
	scope: Some(QueryMode::BookmarkOnly),
	latency: SourceLatency::Deferred,
};

/// Bookmark search. Folders are skipped.
pub struct BookmarkSource {
	browser: Arc<dyn Browser>,
}

impl BookmarkSource {
	#[must_use]
	pub fn new(browser: Arc<dyn Browser>) -> Self {
		Self { browser }
	}
}

#[async_trait]
impl SuggestionSource for BookmarkSource {
	fn descriptor(&self) -> &'static SourceDescriptor {
		&DESCRIPTOR
	}

	async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
		if limit == 0 {
			return Vec::new();
		}
		let entries = match self.browser.search_bookmarks(context.text()).await {
			Ok(entries) => entries,
			Err(err) => {
				warn!(request = context.id(), "bookmark search failed: {err}");
				return Vec::new();
			}
		};

		let bookmarks: Vec<(String, String)> = entries
			.into_iter()
			.filter_map(|entry| entry.url.map(|url| (url, entry.title)))
			.take(limit)
			.collect();
		let icons = join_all(bookmarks.iter().map(|(url, _)| context.icons().icon_for(url))).await;

		bookmarks
			.into_iter()
			.zip(icons)
			.map(|((url, title), icon)| {
				Suggestion::new(SuggestionKind::Bookmark, url, format!("Bookmark: {title}"))
					.with_icon(icon)
			})
			.collect()
	}
}
