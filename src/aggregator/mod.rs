//! Fan-out over the registered sources, merging their answers into one
//! suggestion list.
//!
//! A request is planned first: an explicit mode or a prefix token scopes the
//! query to a single source, an empty unscoped input short-circuits to the
//! action table, and everything else queries every source whose cap on the
//! requested surface is non-zero. Sources that are not deferred (the website
//! heuristic, open tabs, the action table) are settled first in registration
//! order, which matches the priority ranking; the deferred ones are then
//! polled concurrently and handed over in arrival order.
//!
//! Results leave the aggregator in one of two shapes:
//!
//! * [`Aggregator::stream`] sends one batch per settled source through a
//!   [`BatchStream`], deduplicated against earlier batches and truncated to
//!   the remaining [`DeliveryBudget`], then a terminal envelope. Batches of a
//!   request the [`RequestTracker`] no longer considers current are dropped.
//! * [`Aggregator::collect`] buffers every batch until all sources settle or
//!   the one-shot deadline elapses, then applies [`policy::finalize`].

mod options;
pub mod policy;

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use ktab_source_api::{
	IconPool, IconResolver, QueryContext, QueryMode, SeenSet, SourceRegistry, Suggestion,
};
use ktab_stream::suggestions::{BatchStream, DeliveryBudget, RequestTracker};
use tokio::time::timeout;
use tracing::{debug, trace, warn};

pub use options::{AggregatorOptions, SearchLimits, Surface};

use crate::actions::ActionTable;

/// One query as received from the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionRequest {
	pub input: String,
	/// Explicit mode. Takes precedence over a prefix token in `input`.
	pub mode: Option<QueryMode>,
	pub surface: Surface,
}

impl SuggestionRequest {
	#[must_use]
	pub fn new(input: impl Into<String>) -> Self {
		Self {
			input: input.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_mode(mut self, mode: Option<QueryMode>) -> Self {
		self.mode = mode;
		self
	}

	#[must_use]
	pub fn with_surface(mut self, surface: Surface) -> Self {
		self.surface = surface;
		self
	}
}

struct QueryPlan<'r> {
	mode: QueryMode,
	text: &'r str,
	cap: usize,
	idle: bool,
}

/// Receives per-source batches while a request is driven.
trait BatchSink: Send {
	fn accept(&mut self, slot: usize, source: &'static str, batch: Vec<Suggestion>);

	/// Whether further batches can no longer change the answer.
	fn is_done(&self) -> bool {
		false
	}
}

struct StreamSink<'a> {
	stream: &'a BatchStream,
	tracker: &'a RequestTracker,
	seen: SeenSet,
	budget: DeliveryBudget,
}

impl BatchSink for StreamSink<'_> {
	fn accept(&mut self, _slot: usize, source: &'static str, batch: Vec<Suggestion>) {
		if self.tracker.is_stale(self.stream.id()) {
			trace!(request = self.stream.id(), source, "dropping stale batch");
			return;
		}
		let fresh = self.budget.take(self.seen.retain_new(batch));
		if !fresh.is_empty() {
			self.stream.send(source, fresh);
		}
	}

	fn is_done(&self) -> bool {
		self.budget.is_exhausted() || self.stream.is_closed()
	}
}

#[derive(Default)]
struct CollectSink {
	slots: BTreeMap<usize, Vec<Suggestion>>,
}

impl BatchSink for CollectSink {
	fn accept(&mut self, slot: usize, _source: &'static str, batch: Vec<Suggestion>) {
		self.slots.entry(slot).or_default().extend(batch);
	}
}

impl CollectSink {
	/// Buffered results in registration order.
	fn into_suggestions(self) -> Vec<Suggestion> {
		self.slots.into_values().flatten().collect()
	}
}

/// Merges suggestions from every registered source.
pub struct Aggregator {
	registry: SourceRegistry,
	actions: ActionTable,
	options: AggregatorOptions,
	icons: Option<Arc<dyn IconResolver>>,
}

impl Aggregator {
	#[must_use]
	pub fn new(registry: SourceRegistry, actions: ActionTable, options: AggregatorOptions) -> Self {
		Self {
			registry,
			actions,
			options,
			icons: None,
		}
	}

	/// Resolve favicons for history and bookmark results through `resolver`.
	#[must_use]
	pub fn with_icon_resolver(mut self, resolver: Arc<dyn IconResolver>) -> Self {
		self.icons = Some(resolver);
		self
	}

	#[must_use]
	pub fn actions(&self) -> &ActionTable {
		&self.actions
	}

	#[must_use]
	pub fn registry(&self) -> &SourceRegistry {
		&self.registry
	}

	/// Suggestions shown while the input is empty.
	#[must_use]
	pub fn idle_suggestions(&self, surface: Surface) -> Vec<Suggestion> {
		if self.options.limits(surface).actions {
			self.actions.suggestions()
		} else {
			Vec::new()
		}
	}

	/// Stream batches for `request` through `stream`, finishing with a
	/// terminal envelope unless the request went stale meanwhile.
	pub async fn stream(
		&self,
		request: &SuggestionRequest,
		stream: &BatchStream,
		tracker: &RequestTracker,
	) {
		let id = stream.id();
		let plan = self.plan(request);
		if plan.idle {
			if tracker.is_current(id) {
				stream.send_action_table(self.idle_suggestions(request.surface));
			}
			return;
		}

		let mut sink = StreamSink {
			stream,
			tracker,
			seen: SeenSet::new(),
			budget: DeliveryBudget::new(plan.cap),
		};
		self.drive(id, &plan, request.surface, &mut sink).await;

		if tracker.is_current(id) {
			stream.finish();
			debug!(
				request = id,
				delivered = sink.budget.delivered(),
				"streamed suggestions"
			);
		} else {
			debug!(request = id, "request superseded before completion");
		}
	}

	/// Buffer every batch and answer with one finalized list.
	///
	/// Sources that have not settled when the one-shot deadline elapses are
	/// left out of the answer.
	pub async fn collect(&self, id: u64, request: &SuggestionRequest) -> Vec<Suggestion> {
		let plan = self.plan(request);
		if plan.idle {
			return self.idle_suggestions(request.surface);
		}

		let mut sink = CollectSink::default();
		let driven = timeout(
			self.options.oneshot_timeout,
			self.drive(id, &plan, request.surface, &mut sink),
		)
		.await;
		if driven.is_err() {
			warn!(
				request = id,
				timeout_ms = self.options.oneshot_timeout.as_millis() as u64,
				"one-shot deadline elapsed, answering with settled sources"
			);
		}

		let suggestions = policy::finalize(sink.into_suggestions(), plan.cap);
		debug!(request = id, count = suggestions.len(), "collected suggestions");
		suggestions
	}

	fn plan<'r>(&self, request: &'r SuggestionRequest) -> QueryPlan<'r> {
		let (mode, text) = match request.mode {
			Some(mode) => (mode, request.input.as_str()),
			None => QueryMode::split_prefix(&request.input),
		};
		let cap = if mode.is_scoped() {
			self.options.scoped_max_results
		} else {
			self.options.limits(request.surface).max_results
		};
		QueryPlan {
			mode,
			text,
			cap,
			idle: !mode.is_scoped() && text.trim().is_empty(),
		}
	}

	fn icon_pool(&self) -> IconPool {
		match &self.icons {
			Some(resolver) => IconPool::new(Arc::clone(resolver)),
			None => IconPool::disabled(),
		}
	}

	async fn drive(
		&self,
		id: u64,
		plan: &QueryPlan<'_>,
		surface: Surface,
		sink: &mut dyn BatchSink,
	) {
		let context = QueryContext::new(id, plan.text, plan.mode, self.icon_pool());
		debug!(request = id, mode = plan.mode.id(), surface = surface.id(), "query started");

		if plan.mode.is_scoped() {
			let scoped = self
				.registry
				.iter()
				.enumerate()
				.find(|(_, entry)| entry.scope() == Some(plan.mode));
			match scoped {
				Some((slot, entry)) => {
					let batch = entry.search(&context, plan.cap).await;
					sink.accept(slot, entry.id(), batch);
				}
				None => warn!(mode = plan.mode.id(), "no source registered for mode"),
			}
			return;
		}

		let limits = self.options.limits(surface);
		let participants: Vec<_> = self
			.registry
			.iter()
			.enumerate()
			.map(|(slot, entry)| (slot, entry, limits.cap_for(entry.id())))
			.filter(|(_, _, cap)| *cap > 0)
			.collect();

		for (slot, entry, cap) in &participants {
			if !entry.descriptor().is_deferred() {
				let batch = entry.search(&context, *cap).await;
				sink.accept(*slot, entry.id(), batch);
			}
		}
		if sink.is_done() {
			debug!(request = id, "nothing left to deliver, skipping deferred sources");
			return;
		}

		let context = &context;
		let mut pending: FuturesUnordered<_> = participants
			.iter()
			.filter(|(_, entry, _)| entry.descriptor().is_deferred())
			.map(|&(slot, entry, cap)| async move {
				(slot, entry.id(), entry.search(context, cap).await)
			})
			.collect();

		while let Some((slot, source, batch)) = pending.next().await {
			trace!(request = id, source, count = batch.len(), "source settled");
			sink.accept(slot, source, batch);
			if sink.is_done() {
				break;
			}
		}
	}
}

#[cfg(test)]
mod tests;
