//! Debounced palette session driven by keystrokes.
//!
//! Every keystroke restarts the debounce timer; once the input has been stable
//! for the configured interval a new request id is taken from the
//! [`RequestTracker`] and the aggregator streams into the session on a spawned
//! task. Batches tagged with an older id are dropped on arrival. Clearing the
//! input shows the action table at once and supersedes anything in flight.
//!
//! On close, input still waiting out the debounce is queried immediately and
//! the session runs until its queries have settled.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use ktab_source_api::Suggestion;
use ktab_stream::suggestions::{
	BatchOrigin, BatchStream, RequestTracker, SuggestionEnvelope, SuggestionView, apply_envelope,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace, warn};

use crate::aggregator::{Aggregator, SuggestionRequest, Surface};
use crate::palette::PaletteView;

/// Input driving a [`PaletteSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
	/// The palette input now reads this text.
	Input(String),
	/// The palette was dismissed.
	Close,
}

/// Full palette contents after an accepted batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUpdate {
	pub request_id: u64,
	pub suggestions: Vec<Suggestion>,
	pub complete: bool,
}

pub struct PaletteSession {
	aggregator: Arc<Aggregator>,
	debounce: Duration,
	surface: Surface,
	tracker: RequestTracker,
}

async fn wait_until(deadline: Option<Instant>) {
	match deadline {
		Some(deadline) => sleep_until(deadline).await,
		None => future::pending().await,
	}
}

impl PaletteSession {
	#[must_use]
	pub fn new(aggregator: Arc<Aggregator>, debounce: Duration) -> Self {
		Self {
			aggregator,
			debounce,
			surface: Surface::Palette,
			tracker: RequestTracker::new(),
		}
	}

	/// Process `events` until [`SessionEvent::Close`] or until either channel
	/// closes, then finish the queries still in flight.
	pub async fn run(
		self,
		mut events: UnboundedReceiver<SessionEvent>,
		updates: UnboundedSender<SessionUpdate>,
	) {
		let (batch_tx, mut batch_rx) = mpsc::unbounded_channel::<SuggestionEnvelope>();
		let mut queries = JoinSet::new();
		let mut view = PaletteView::new();
		let mut pending: Option<(Instant, String)> = None;
		let mut closing = false;

		loop {
			if closing && queries.is_empty() {
				while let Ok(envelope) = batch_rx.try_recv() {
					if !self.deliver(&mut view, envelope, &updates) {
						break;
					}
				}
				break;
			}

			let deadline = pending.as_ref().map(|(deadline, _)| *deadline);
			tokio::select! {
				event = events.recv(), if !closing => match event {
					Some(SessionEvent::Input(text)) if text.trim().is_empty() => {
						pending = None;
						let envelope = SuggestionEnvelope {
							id: self.tracker.begin(),
							kind: BatchOrigin::ActionTable,
							payload: self.aggregator.idle_suggestions(self.surface),
							complete: true,
						};
						if !self.accept(&mut view, envelope, &updates) {
							break;
						}
					}
					Some(SessionEvent::Input(text)) => {
						pending = Some((Instant::now() + self.debounce, text));
					}
					Some(SessionEvent::Close) | None => {
						if let Some((_, text)) = pending.take() {
							self.spawn_query(text, &batch_tx, &mut queries);
						}
						closing = true;
					}
				},
				() = wait_until(deadline) => {
					if let Some((_, text)) = pending.take() {
						self.spawn_query(text, &batch_tx, &mut queries);
					}
				}
				Some(envelope) = batch_rx.recv() => {
					if !self.deliver(&mut view, envelope, &updates) {
						break;
					}
				}
				Some(joined) = queries.join_next(), if !queries.is_empty() => {
					if let Err(err) = joined {
						warn!("palette query failed: {err}");
					}
				}
			}
		}
		debug!("palette session closed");
	}

	fn spawn_query(
		&self,
		text: String,
		batch_tx: &UnboundedSender<SuggestionEnvelope>,
		queries: &mut JoinSet<()>,
	) {
		let id = self.tracker.begin();
		debug!(request = id, "input settled");
		let request = SuggestionRequest::new(text).with_surface(self.surface);
		let stream = BatchStream::new(batch_tx.clone(), id);
		let tracker = self.tracker.clone();
		let aggregator = Arc::clone(&self.aggregator);
		queries.spawn(async move {
			aggregator.stream(&request, &stream, &tracker).await;
		});
	}

	/// Drop `envelope` if its request was superseded, otherwise accept it.
	fn deliver(
		&self,
		view: &mut PaletteView,
		envelope: SuggestionEnvelope,
		updates: &UnboundedSender<SessionUpdate>,
	) -> bool {
		if self.tracker.is_stale(envelope.id) {
			trace!(request = envelope.id, "discarding stale batch");
			return true;
		}
		self.accept(view, envelope, updates)
	}

	/// Apply `envelope` and publish the resulting list. Returns `false` once
	/// nobody listens for updates anymore.
	fn accept(
		&self,
		view: &mut PaletteView,
		envelope: SuggestionEnvelope,
		updates: &UnboundedSender<SessionUpdate>,
	) -> bool {
		let id = envelope.id;
		if !apply_envelope(view, envelope) {
			return true;
		}
		updates
			.send(SessionUpdate {
				request_id: id,
				suggestions: view.render(),
				complete: view.is_complete(),
			})
			.is_ok()
	}
}
