use ktab_source_api::Suggestion;

/// Running count of suggestions delivered for one request.
///
/// Every batch passes through [`DeliveryBudget::take`], which truncates it to
/// the remaining allowance, so the total delivered never exceeds the cap no
/// matter how many sources resolve independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryBudget {
	cap: usize,
	delivered: usize,
}

impl DeliveryBudget {
	#[must_use]
	pub fn new(cap: usize) -> Self {
		Self { cap, delivered: 0 }
	}

	#[must_use]
	pub fn remaining(&self) -> usize {
		self.cap - self.delivered
	}

	#[must_use]
	pub fn delivered(&self) -> usize {
		self.delivered
	}

	/// Once exhausted, later batches are truncated to nothing.
	#[must_use]
	pub fn is_exhausted(&self) -> bool {
		self.remaining() == 0
	}

	/// Truncate `batch` to the remaining allowance and count it as delivered.
	pub fn take(&mut self, mut batch: Vec<Suggestion>) -> Vec<Suggestion> {
		batch.truncate(self.remaining());
		self.delivered += batch.len();
		batch
	}
}
