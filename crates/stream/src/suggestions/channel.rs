use ktab_source_api::Suggestion;
use tokio::sync::mpsc::UnboundedSender;

use crate::{DataStream, StreamEnvelope};

/// Describes where a batch of suggestions came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOrigin {
	/// Results produced by the source with the given identifier.
	Source(&'static str),
	/// The static action table shown for an empty input.
	ActionTable,
	/// Terminal marker sent once every source has settled.
	Terminal,
}

/// Suggestion batch envelope emitted back to the consumer.
pub type SuggestionEnvelope = StreamEnvelope<BatchOrigin, Vec<Suggestion>>;

/// Consumer responsible for accumulating streamed suggestion batches.
pub trait SuggestionView {
	/// Identifier of the request currently displayed, if any.
	fn request_id(&self) -> Option<u64>;

	/// Drop everything shown so far and start accumulating for `id`.
	fn begin(&mut self, id: u64);

	/// Append a batch, ignoring suggestions whose content is already shown.
	fn extend(&mut self, suggestions: Vec<Suggestion>);

	/// Observe the completion state of the stream.
	///
	/// The `complete` flag is `true` exactly once per request and signals that
	/// no further batches will arrive for it. Partial batches set it to
	/// `false`.
	fn record_completion(&mut self, complete: bool);
}

/// Apply `envelope` to `view`.
///
/// Envelopes for an older request than the one displayed are discarded and
/// `false` is returned. An envelope for a newer request resets the view first.
pub fn apply_envelope(view: &mut dyn SuggestionView, envelope: SuggestionEnvelope) -> bool {
	match view.request_id() {
		Some(current) if envelope.id < current => return false,
		Some(current) if envelope.id == current => {}
		_ => view.begin(envelope.id),
	}
	view.extend(envelope.payload);
	view.record_completion(envelope.complete);
	true
}

/// Handle used by the aggregator to stream batches for one request.
#[derive(Clone)]
pub struct BatchStream {
	inner: DataStream<BatchOrigin, Vec<Suggestion>>,
}

impl BatchStream {
	/// Create a new stream handle for request `id`.
	#[must_use]
	pub fn new(tx: UnboundedSender<SuggestionEnvelope>, id: u64) -> Self {
		Self {
			inner: DataStream::new(tx, id, BatchOrigin::Terminal),
		}
	}

	/// Identifier for the request being serviced.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.inner.id()
	}

	/// Send a partial batch produced by `source`.
	pub fn send(&self, source: &'static str, suggestions: Vec<Suggestion>) -> bool {
		self.inner
			.send_as(BatchOrigin::Source(source), suggestions, false)
	}

	/// Send the complete action table as the sole, final batch.
	pub fn send_action_table(&self, suggestions: Vec<Suggestion>) -> bool {
		self.inner
			.send_as(BatchOrigin::ActionTable, suggestions, true)
	}

	/// Signal that no more batches will follow.
	pub fn finish(&self) -> bool {
		self.inner.send(Vec::new(), true)
	}

	/// Returns `true` once the consumer has gone away.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.inner.is_closed()
	}
}

#[cfg(test)]
mod tests {
	use ktab_source_api::{SeenSet, SuggestionKind};
	use tokio::sync::mpsc;

	use super::*;

	#[derive(Default)]
	struct RecordingView {
		id: Option<u64>,
		items: Vec<Suggestion>,
		seen: SeenSet,
		complete: bool,
	}

	impl SuggestionView for RecordingView {
		fn request_id(&self) -> Option<u64> {
			self.id
		}

		fn begin(&mut self, id: u64) {
			self.id = Some(id);
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

	fn item(content: &str) -> Suggestion {
		Suggestion::new(SuggestionKind::History, content, content)
	}

	#[test]
	fn batches_are_tagged_with_origin_and_request() {
		let (tx, mut rx) = mpsc::unbounded_channel();
		let stream = BatchStream::new(tx, 9);

		assert!(stream.send("tabs", vec![item("a")]));
		assert!(stream.finish());

		let first = rx.try_recv().expect("partial batch");
		assert_eq!(first.id, 9);
		assert_eq!(first.kind, BatchOrigin::Source("tabs"));
		assert!(!first.complete);

		let last = rx.try_recv().expect("terminal batch");
		assert_eq!(last.kind, BatchOrigin::Terminal);
		assert!(last.complete);
		assert!(last.payload.is_empty());
	}

	#[test]
	fn send_reports_closed_consumer() {
		let (tx, rx) = mpsc::unbounded_channel();
		let stream = BatchStream::new(tx, 1);
		drop(rx);
		assert!(stream.is_closed());
		assert!(!stream.send("tabs", vec![item("a")]));
	}

	#[test]
	fn view_discards_older_requests_and_resets_on_newer() {
		let mut view = RecordingView::default();
		let envelope = |id, content: &str, complete| SuggestionEnvelope {
			id,
			kind: BatchOrigin::Source("history"),
			payload: vec![item(content)],
			complete,
		};

		assert!(apply_envelope(&mut view, envelope(2, "b", false)));
		assert!(!apply_envelope(&mut view, envelope(1, "a", true)));
		assert!(apply_envelope(&mut view, envelope(2, "b", false)));
		assert_eq!(view.items.len(), 1);
		assert!(!view.complete);

		assert!(apply_envelope(&mut view, envelope(3, "c", true)));
		assert_eq!(view.request_id(), Some(3));
		assert_eq!(view.items, vec![item("c")]);
		assert!(view.complete);
	}
}
