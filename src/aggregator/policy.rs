use ktab_source_api::{Suggestion, SuggestionKind, dedup};

fn rank(kind: SuggestionKind) -> u8 {
	match kind {
		SuggestionKind::Website => 0,
		SuggestionKind::Tab => 1,
		_ => 2,
	}
}

/// Stable reorder by rank. Tabs outrank everything except the website
/// heuristic, whose suggestion for host-like input always stays first; the
/// rest follow. Each group keeps its relative order.
#[must_use]
pub fn prioritize(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
	suggestions.sort_by_key(|suggestion| rank(suggestion.kind));
	suggestions
}

/// Dedup, prioritize and truncate a buffered result list.
#[must_use]
pub fn finalize(suggestions: Vec<Suggestion>, max_results: usize) -> Vec<Suggestion> {
	let mut suggestions = prioritize(dedup(suggestions));
	suggestions.truncate(max_results);
	suggestions
}
