use std::sync::LazyLock;

use async_trait::async_trait;
use ktab_source_api::{
	QueryContext, SourceDescriptor, SourceLatency, Suggestion, SuggestionKind, SuggestionSource,
};
use regex::Regex;

pub const ID: &str = "website";

static DESCRIPTOR: SourceDescriptor = SourceDescriptor {
	id: ID,
	label: "Website",
	scope: None,
	latency: SourceLatency::Immediate,
};

static HOST_PATH: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([\w-]+\.)+[\w-]{2,}(/.*)?$").expect("website pattern must compile")
});

/// Recognise input that looks like a host name, optionally with a path, and
/// turn it into a suggestion that opens it directly.
#[must_use]
pub fn classify(input: &str) -> Option<Suggestion> {
	let trimmed = input.trim();
	let (scheme, rest) = match trimmed.split_once("://") {
		Some((scheme, rest))
			if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric()) =>
		{
			(Some(scheme), rest)
		}
		_ => (None, trimmed),
	};
	if !HOST_PATH.is_match(rest) {
		return None;
	}
	let content = match scheme {
		Some(scheme) => format!("{}://{rest}", scheme.to_ascii_lowercase()),
		None => format!("https://{rest}"),
	};
	Some(Suggestion::new(
		SuggestionKind::Website,
		content,
		format!("Open {rest}"),
	))
}

/// Pure heuristic source; never touches the browser or the network.
#[derive(Debug, Default)]
pub struct WebsiteSource;

#[async_trait]
impl SuggestionSource for WebsiteSource {
	fn descriptor(&self) -> &'static SourceDescriptor {
		&DESCRIPTOR
	}

	async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
		classify(context.text())
			.into_iter()
			.take(limit)
			.collect()
	}
}
