use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ktab_source_api::{IconResolver, QueryMode, SuggestionKind};
use ktab_stream::suggestions::{BatchOrigin, BatchStream, RequestTracker, SuggestionEnvelope};
use serde_json::json;
use tokio::sync::mpsc;
use url::Url;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::platform::{
	BookmarkEntry, Browser, BrowserSnapshot, BrowserTab, HistoryEntry, SnapshotBrowser,
};
use crate::sources::{AutocompleteSource, build_http_client, builtin_registry};

fn tab(id: i64, title: &str, url: &str) -> BrowserTab {
	BrowserTab {
		id,
		title: title.into(),
		url: url.into(),
		fav_icon_url: Some(format!("tab-icon-{id}")),
		active: id == 1,
		pinned: false,
		muted: false,
	}
}

fn snapshot() -> BrowserSnapshot {
	let mut history = vec![HistoryEntry {
		url: "https://github.com".into(),
		title: "GitHub".into(),
	}];
	history.extend((0..12).map(|chapter| HistoryEntry {
		url: format!("https://git-scm.com/book/ch{chapter}"),
		title: format!("Git book chapter {chapter}"),
	}));

	BrowserSnapshot {
		tabs: vec![
			tab(1, "GitHub", "https://github.com"),
			tab(
				2,
				"The Rust Programming Language",
				"https://doc.rust-lang.org/book/",
			),
			tab(3, "example.com - Example Domain", "https://example.com/"),
		],
		history,
		bookmarks: vec![
			BookmarkEntry {
				url: None,
				title: "Git".into(),
			},
			BookmarkEntry {
				url: Some("https://education.github.com/git-cheat-sheet-education.pdf".into()),
				title: "Git cheat sheet".into(),
			},
		],
	}
}

fn build(
	snapshot: BrowserSnapshot,
	actions: ActionTable,
	autocomplete: Option<AutocompleteSource>,
	options: AggregatorOptions,
) -> Aggregator {
	let browser: Arc<dyn Browser> = Arc::new(SnapshotBrowser::new(snapshot));
	let registry = builtin_registry(browser, actions.clone(), autocomplete).expect("registry");
	Aggregator::new(registry, actions, options)
}

fn offline() -> Aggregator {
	build(
		snapshot(),
		ActionTable::builtin(),
		None,
		AggregatorOptions::default(),
	)
}

fn autocomplete(server: &MockServer, timeout: Duration) -> AutocompleteSource {
	AutocompleteSource::new(
		build_http_client(timeout).expect("client"),
		Url::parse(&format!("{}/complete/search", server.uri())).expect("endpoint"),
		Url::parse("https://www.google.com/search").expect("search url"),
	)
}

async fn streamed(
	aggregator: &Aggregator,
	request: &SuggestionRequest,
) -> Vec<SuggestionEnvelope> {
	let tracker = RequestTracker::new();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let stream = BatchStream::new(tx, tracker.begin());
	aggregator.stream(request, &stream, &tracker).await;

	let mut envelopes = Vec::new();
	while let Ok(envelope) = rx.try_recv() {
		envelopes.push(envelope);
	}
	envelopes
}

#[tokio::test]
async fn open_tab_leads_and_autocomplete_follows() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(query_param("q", "git"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!(["git", ["git commands", "github desktop"]])),
		)
		.mount(&server)
		.await;

	let snapshot = BrowserSnapshot {
		tabs: vec![tab(1, "GitHub", "https://github.com")],
		..BrowserSnapshot::default()
	};
	let aggregator = build(
		snapshot,
		ActionTable::new(Vec::new()),
		Some(autocomplete(&server, Duration::from_secs(2))),
		AggregatorOptions::default(),
	);

	let results = aggregator.collect(1, &SuggestionRequest::new("git")).await;
	let kinds: Vec<_> = results.iter().map(|s| s.kind).collect();
	assert_eq!(
		kinds,
		[
			SuggestionKind::Tab,
			SuggestionKind::Search,
			SuggestionKind::Search
		]
	);
	assert_eq!(results[0].content, "https://github.com");
	assert_eq!(results[0].tab_id, Some(1));
	assert_eq!(results[1].description, "Search Google for: git commands");
}

#[tokio::test]
async fn duplicate_urls_keep_the_tab() {
	let results = offline().collect(1, &SuggestionRequest::new("git")).await;

	let github: Vec<_> = results
		.iter()
		.filter(|s| s.content == "https://github.com")
		.collect();
	assert_eq!(github.len(), 1);
	assert_eq!(github[0].kind, SuggestionKind::Tab);
	assert_eq!(results[0].kind, SuggestionKind::Tab);

	let history = results.iter().filter(|s| s.kind == SuggestionKind::History).count();
	assert_eq!(history, 4);
	assert!(results.iter().any(|s| s.kind == SuggestionKind::Bookmark));
	assert!(results.iter().any(|s| s.content == "https://github.com/new"));
}

#[tokio::test]
async fn website_heuristic_is_pinned_first() {
	let results = offline()
		.collect(1, &SuggestionRequest::new("example.com"))
		.await;

	assert_eq!(results[0].kind, SuggestionKind::Website);
	assert_eq!(results[0].content, "https://example.com");
	assert_eq!(results[1].kind, SuggestionKind::Tab);
	assert_eq!(results[1].tab_id, Some(3));
}

#[tokio::test]
async fn empty_input_is_the_action_table_without_network() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!(["", []])))
		.expect(0)
		.mount(&server)
		.await;

	let aggregator = build(
		snapshot(),
		ActionTable::builtin(),
		Some(autocomplete(&server, Duration::from_secs(2))),
		AggregatorOptions::default(),
	);
	let table = ActionTable::builtin().suggestions();

	assert_eq!(aggregator.collect(1, &SuggestionRequest::new("")).await, table);
	assert_eq!(aggregator.collect(2, &SuggestionRequest::new("   ")).await, table);

	let envelopes = streamed(&aggregator, &SuggestionRequest::new("")).await;
	assert_eq!(envelopes.len(), 1);
	assert_eq!(envelopes[0].kind, BatchOrigin::ActionTable);
	assert!(envelopes[0].complete);
	assert_eq!(envelopes[0].payload, table);

	let omnibox = SuggestionRequest::new("").with_surface(Surface::Omnibox);
	assert!(aggregator.collect(3, &omnibox).await.is_empty());
}

#[tokio::test]
async fn slow_autocomplete_does_not_hold_back_other_sources() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(json!(["git", ["git commands"]]))
				.set_delay(Duration::from_secs(3)),
		)
		.mount(&server)
		.await;

	let options = AggregatorOptions {
		oneshot_timeout: Duration::from_millis(300),
		..AggregatorOptions::default()
	};
	let aggregator = build(
		snapshot(),
		ActionTable::builtin(),
		Some(autocomplete(&server, Duration::from_secs(10))),
		options,
	);

	let results = tokio::time::timeout(
		Duration::from_secs(2),
		aggregator.collect(1, &SuggestionRequest::new("git")),
	)
	.await
	.expect("one-shot answer must not hang");

	assert_eq!(results[0].content, "https://github.com");
	assert!(results.iter().all(|s| s.kind != SuggestionKind::Search));
}

#[tokio::test]
async fn streaming_respects_cap_and_emits_tabs_then_actions_first() {
	let options = AggregatorOptions {
		palette: SearchLimits {
			max_results: 4,
			..SearchLimits::palette()
		},
		..AggregatorOptions::default()
	};
	let aggregator = build(snapshot(), ActionTable::builtin(), None, options);

	let envelopes = streamed(&aggregator, &SuggestionRequest::new("git")).await;
	let (last, batches) = envelopes.split_last().expect("terminal envelope");

	assert_eq!(batches[0].kind, BatchOrigin::Source(crate::sources::tabs::ID));
	assert_eq!(batches[1].kind, BatchOrigin::Source(crate::sources::actions::ID));
	assert!(batches.iter().all(|batch| !batch.complete && !batch.payload.is_empty()));
	assert_eq!(last.kind, BatchOrigin::Terminal);
	assert!(last.complete);
	assert!(last.payload.is_empty());

	let delivered: Vec<_> = batches.iter().flat_map(|batch| batch.payload.iter()).collect();
	assert_eq!(delivered.len(), 4);
	let unique: HashSet<_> = delivered.iter().map(|s| s.content.as_str()).collect();
	assert_eq!(unique.len(), delivered.len());
}

#[tokio::test]
async fn matching_tab_survives_a_flood_of_actions_when_streaming() {
	let snapshot = BrowserSnapshot {
		tabs: vec![tab(7, "Codeberg", "https://codeberg.org")],
		..BrowserSnapshot::default()
	};
	let aggregator = build(
		snapshot,
		ActionTable::builtin(),
		None,
		AggregatorOptions::default(),
	);
	let request = SuggestionRequest::new("c");
	assert!(ActionTable::builtin().filter("c", usize::MAX).len() >= 20);

	let envelopes = streamed(&aggregator, &request).await;
	let (last, batches) = envelopes.split_last().expect("terminal envelope");
	assert!(last.complete);
	assert_eq!(batches[0].kind, BatchOrigin::Source(crate::sources::tabs::ID));

	let delivered: Vec<_> = batches
		.iter()
		.flat_map(|batch| batch.payload.iter().cloned())
		.collect();
	assert_eq!(delivered.len(), 20);
	assert_eq!(delivered[0].tab_id, Some(7));

	let oneshot = aggregator.collect(2, &request).await;
	assert_eq!(delivered, oneshot);
}

#[tokio::test]
async fn stale_requests_deliver_nothing() {
	let aggregator = offline();
	let tracker = RequestTracker::new();
	let (tx, mut rx) = mpsc::unbounded_channel();

	let first = tracker.begin();
	let _second = tracker.begin();
	let stream = BatchStream::new(tx, first);
	aggregator
		.stream(&SuggestionRequest::new("git"), &stream, &tracker)
		.await;

	assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn prefix_scopes_to_a_single_source_with_the_scoped_cap() {
	let aggregator = offline();

	let history = aggregator.collect(1, &SuggestionRequest::new("/h git")).await;
	assert_eq!(history.len(), 13);
	assert!(history.iter().all(|s| s.kind == SuggestionKind::History));

	let tabs = aggregator.collect(2, &SuggestionRequest::new("/tabs rust")).await;
	assert_eq!(tabs.len(), 1);
	assert_eq!(tabs[0].tab_id, Some(2));

	let explicit = SuggestionRequest::new("/h git").with_mode(Some(QueryMode::All));
	assert!(aggregator.collect(3, &explicit).await.is_empty());

	let actions = SuggestionRequest::new("").with_mode(Some(QueryMode::ActionOnly));
	assert_eq!(aggregator.collect(4, &actions).await.len(), 25);
}

#[tokio::test]
async fn omnibox_uses_its_own_limits() {
	let request = SuggestionRequest::new("git").with_surface(Surface::Omnibox);
	let results = offline().collect(1, &request).await;

	assert!(results.len() <= 6);
	assert!(
		results
			.iter()
			.all(|s| !matches!(s.kind, SuggestionKind::Bookmark | SuggestionKind::Action))
	);
	let history = results.iter().filter(|s| s.kind == SuggestionKind::History).count();
	assert!(history <= 3);
}

struct DomainIcons;

#[async_trait]
impl IconResolver for DomainIcons {
	async fn resolve(&self, domain: &str) -> String {
		format!("icon://{domain}")
	}
}

#[tokio::test]
async fn history_and_bookmarks_receive_favicons() {
	let aggregator = offline().with_icon_resolver(Arc::new(DomainIcons));
	let results = aggregator.collect(1, &SuggestionRequest::new("git")).await;

	let chapter = results
		.iter()
		.find(|s| s.content.starts_with("https://git-scm.com"))
		.expect("history result");
	assert_eq!(chapter.icon_url.as_deref(), Some("icon://git-scm.com"));

	let bookmark = results
		.iter()
		.find(|s| s.kind == SuggestionKind::Bookmark)
		.expect("bookmark result");
	assert_eq!(bookmark.icon_url.as_deref(), Some("icon://education.github.com"));

	let tab = &results[0];
	assert_eq!(tab.icon_url.as_deref(), Some("tab-icon-1"));
}
