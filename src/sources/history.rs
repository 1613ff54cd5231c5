use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use ktab_source_api::{
	QueryContext, QueryMode, SourceDescriptor, SourceLatency, Suggestion, SuggestionKind,
	SuggestionSource,
};
use tracing::warn;

use crate::platform::Browser;

pub const ID: &str = "history";

static DESCRIPTOR: SourceDescriptor = SourceDescriptor {
	id: ID,
	label: "History",
	scope: Some(QueryMode::HistoryOnly),
	latency: SourceLatency::Deferred,
};

/// Browsing history text search, with a favicon resolved per entry.
pub struct HistorySource {
	browser: Arc<dyn Browser>,
}

impl HistorySource {
	#[must_use]
	pub fn new(browser: Arc<dyn Browser>) -> Self {
		Self { browser }
	}
}

#[async_trait]
impl SuggestionSource for HistorySource {
	fn descriptor(&self) -> &'static SourceDescriptor {
		&DESCRIPTOR
	}

	async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
		if limit == 0 {
			return Vec::new();
		}
		let entries = match self.browser.search_history(context.text(), limit).await {
			Ok(entries) => entries,
			Err(err) => {
				warn!(request = context.id(), "history search failed: {err}");
				return Vec::new();
			}
		};

		let entries: Vec<_> = entries
			.into_iter()
			.filter(|entry| !entry.url.is_empty())
			.take(limit)
			.collect();
		let icons = join_all(entries.iter().map(|entry| context.icons().icon_for(&entry.url))).await;

		entries
			.into_iter()
			.zip(icons)
			.map(|(entry, icon)| {
				Suggestion::new(
					SuggestionKind::History,
					entry.url,
					format!("History: {}", entry.title),
				)
				.with_icon(icon)
			})
			.collect()
	}
}
