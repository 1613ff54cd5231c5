use async_trait::async_trait;
use ktab_source_api::{
	QueryContext, SourceDescriptor, SourceLatency, Suggestion, SuggestionKind, SuggestionSource,
};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::http::RemoteError;

pub const ID: &str = "autocomplete";

static DESCRIPTOR: SourceDescriptor = SourceDescriptor {
	id: ID,
	label: "Web search",
	scope: None,
	latency: SourceLatency::Deferred,
};

/// Remote search autocomplete. Every failure yields an empty list.
#[derive(Debug, Clone)]
pub struct AutocompleteSource {
	client: Client,
	endpoint: Url,
	search_url: Url,
}

impl AutocompleteSource {
	#[must_use]
	pub fn new(client: Client, endpoint: Url, search_url: Url) -> Self {
		Self {
			client,
			endpoint,
			search_url,
		}
	}

	/// Fetch raw completions for `text`.
	pub async fn fetch(&self, text: &str) -> Result<Vec<String>, RemoteError> {
		let url = self.endpoint.to_string();
		let response = self
			.client
			.get(self.endpoint.clone())
			.query(&[("client", "chrome"), ("q", text)])
			.send()
			.await
			.map_err(|source| RemoteError::Transport {
				url: url.clone(),
				source,
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(RemoteError::Status { url, status });
		}

		let payload: Value = response.json().await.map_err(|err| RemoteError::Payload {
			url: url.clone(),
			reason: err.to_string(),
		})?;
		parse_completions(&payload).ok_or_else(|| RemoteError::Payload {
			url,
			reason: "expected [query, [completions...]]".to_string(),
		})
	}

	/// Search page URL for one completion.
	#[must_use]
	pub fn search_link(&self, phrase: &str) -> String {
		let mut url = self.search_url.clone();
		url.query_pairs_mut().clear().append_pair("q", phrase);
		url.into()
	}
}

/// Extract the completion list from `[query, [completions...], ...]`.
fn parse_completions(payload: &Value) -> Option<Vec<String>> {
	let completions = payload.as_array()?.get(1)?.as_array()?;
	completions
		.iter()
		.map(|item| item.as_str().map(str::to_owned))
		.collect()
}

#[async_trait]
impl SuggestionSource for AutocompleteSource {
	fn descriptor(&self) -> &'static SourceDescriptor {
		&DESCRIPTOR
	}

	async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
		let text = context.text().trim();
		if limit == 0 || text.is_empty() {
			return Vec::new();
		}

		match self.fetch(text).await {
			Ok(completions) => completions
				.into_iter()
				.take(limit)
				.map(|phrase| {
					Suggestion::new(
						SuggestionKind::Search,
						self.search_link(&phrase),
						format!("Search Google for: {phrase}"),
					)
				})
				.collect(),
			Err(err) => {
				debug!(request = context.id(), "autocomplete unavailable: {err}");
				Vec::new()
			}
		}
	}
}
