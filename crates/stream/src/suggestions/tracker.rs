use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out monotonically increasing request identifiers and answers whether
/// a given identifier is still the current one.
///
/// Cancellation is cooperative: nothing in flight is aborted when a newer
/// request begins, its results are simply recognised as stale on arrival.
/// Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
	latest: Arc<AtomicU64>,
}

impl RequestTracker {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a new request, superseding every earlier one.
	pub fn begin(&self) -> u64 {
		self.latest.fetch_add(1, Ordering::AcqRel) + 1
	}

	/// Identifier of the newest request, `0` before the first one.
	#[must_use]
	pub fn current(&self) -> u64 {
		self.latest.load(Ordering::Acquire)
	}

	#[must_use]
	pub fn is_current(&self, id: u64) -> bool {
		self.current() == id
	}

	#[must_use]
	pub fn is_stale(&self, id: u64) -> bool {
		!self.is_current(id)
	}
}
