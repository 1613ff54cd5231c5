//! Accumulated palette contents for the request currently on screen.

use ktab_source_api::{SeenSet, Suggestion};
use ktab_stream::suggestions::SuggestionView;

use crate::aggregator::policy::prioritize;

/// Suggestions received so far for the displayed request.
///
/// Batches are appended in arrival order; [`PaletteView::render`] applies the
/// priority policy so tabs surface as soon as they arrive.
#[derive(Debug, Default)]
pub struct PaletteView {
	request_id: Option<u64>,
	items: Vec<Suggestion>,
	seen: SeenSet,
	complete: bool,
}

impl PaletteView {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Current list in display order.
	#[must_use]
	pub fn render(&self) -> Vec<Suggestion> {
		prioritize(self.items.clone())
	}

	#[must_use]
	pub fn is_complete(&self) -> bool {
		self.complete
	}
}

impl SuggestionView for PaletteView {
	fn request_id(&self) -> Option<u64> {
		self.request_id
	}

	fn begin(&mut self, id: u64) {
		self.request_id = Some(id);
		self.items.clear();
		self.seen.clear();
		self.complete = false;
	}

	fn extend(&mut self, suggestions: Vec<Suggestion>) {
		let fresh = self.seen.retain_new(suggestions);
		self.items.extend(fresh);
	}

	fn record_completion(&mut self, complete: bool) {
		self.complete = complete;
	}
}

#[cfg(test)]
mod tests {
	use ktab_source_api::SuggestionKind;
	use ktab_stream::suggestions::{BatchOrigin, SuggestionEnvelope, apply_envelope};

	use super::*;

	fn envelope(id: u64, payload: Vec<Suggestion>, complete: bool) -> SuggestionEnvelope {
		SuggestionEnvelope {
			id,
			kind: BatchOrigin::Source("test"),
			payload,
			complete,
		}
	}

	#[test]
	fn late_tabs_render_ahead_of_earlier_batches() {
		let mut view = PaletteView::new();
		apply_envelope(
			&mut view,
			envelope(
				1,
				vec![Suggestion::new(
					SuggestionKind::History,
					"https://github.com/rust-lang",
					"History: rust-lang",
				)],
				false,
			),
		);
		apply_envelope(
			&mut view,
			envelope(
				1,
				vec![Suggestion::tab(4, "https://github.com", "Tab: GitHub")],
				true,
			),
		);

		let rendered = view.render();
		assert_eq!(rendered[0].kind, SuggestionKind::Tab);
		assert_eq!(rendered.len(), 2);
		assert!(view.is_complete());
	}

	#[test]
	fn duplicates_across_batches_are_dropped() {
		let mut view = PaletteView::new();
		let item = Suggestion::new(SuggestionKind::Search, "https://a.dev", "A");
		apply_envelope(&mut view, envelope(1, vec![item.clone()], false));
		apply_envelope(&mut view, envelope(1, vec![item], false));
		assert_eq!(view.render().len(), 1);
	}

	#[test]
	fn newer_request_replaces_contents() {
		let mut view = PaletteView::new();
		let item = |content: &str| Suggestion::new(SuggestionKind::Search, content, content);
		apply_envelope(&mut view, envelope(1, vec![item("a")], true));
		apply_envelope(&mut view, envelope(2, vec![item("b")], false));
		assert!(!apply_envelope(&mut view, envelope(1, vec![item("c")], true)));

		assert_eq!(view.render(), vec![item("b")]);
		assert!(!view.is_complete());
	}
}
