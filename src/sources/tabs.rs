use std::sync::Arc;

use async_trait::async_trait;
use ktab_source_api::{
	QueryContext, QueryMode, SourceDescriptor, SourceLatency, Suggestion, SuggestionSource,
};
use tracing::warn;

use crate::platform::Browser;

pub const ID: &str = "tabs";

static DESCRIPTOR: SourceDescriptor = SourceDescriptor {
	id: ID,
	label: "Open tabs",
	scope: Some(QueryMode::TabOnly),
	latency: SourceLatency::Leading,
};

/// Open tabs whose title contains the query.
pub struct TabSource {
	browser: Arc<dyn Browser>,
}

impl TabSource {
	#[must_use]
	pub fn new(browser: Arc<dyn Browser>) -> Self {
		Self { browser }
	}
}

#[async_trait]
impl SuggestionSource for TabSource {
	fn descriptor(&self) -> &'static SourceDescriptor {
		&DESCRIPTOR
	}

	async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
		let tabs = match self.browser.tabs().await {
			Ok(tabs) => tabs,
			Err(err) => {
				warn!(request = context.id(), "failed to list tabs: {err}");
				return Vec::new();
			}
		};

		let needle = context.needle();
		tabs.into_iter()
			.filter(|tab| !tab.title.is_empty() && tab.title.to_lowercase().contains(&needle))
			.take(limit)
			.map(|tab| {
				Suggestion::tab(tab.id, tab.url, format!("Tab: {}", tab.title))
					.with_icon(tab.fav_icon_url)
			})
			.collect()
	}
}
