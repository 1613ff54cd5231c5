//! Streaming primitives for delivering results from background tasks, plus the
//! suggestion-specific delivery channel used by the ktab aggregator.
//!
//! The base types wrap an unbounded [`mpsc`] channel so producers running on
//! the event loop can push payloads to a consumer without waiting on it. Each
//! payload travels in a [`StreamEnvelope`] tagged with the identifier of the
//! request that produced it, which lets consumers discard anything belonging
//! to a superseded request.
//!
//! `ktab_stream::suggestions` builds on top with batch envelopes, the
//! [`RequestTracker`](suggestions::RequestTracker) used for staleness checks and
//! the [`DeliveryBudget`](suggestions::DeliveryBudget) that caps how many
//! suggestions a request may deliver in total.
//!
//! Base usage:
//! ```
//! use tokio::sync::mpsc;
//!
//! use ktab_stream::{DataStream, StreamEnvelope};
//!
//! let (tx, mut rx) = mpsc::unbounded_channel::<StreamEnvelope<&'static str, String>>();
//! let stream = DataStream::new(tx, 1, "greeting");
//! assert!(stream.send("hello".to_string(), true));
//! let envelope = rx.try_recv().unwrap();
//! assert_eq!(envelope.id, 1);
//! assert_eq!(envelope.payload, "hello");
//! assert!(envelope.complete);
//! ```
//!
//! [`mpsc`]: tokio::sync::mpsc

use tokio::sync::mpsc::UnboundedSender;

/// Message emitted by a background task and delivered to a consumer.
#[derive(Debug, Clone)]
pub struct StreamEnvelope<M, P> {
	/// Identifier correlating the message with a request.
	pub id: u64,
	/// Stream-specific metadata describing the payload.
	pub kind: M,
	/// Payload delivered to the consumer.
	pub payload: P,
	/// Whether the producer finished streaming for this identifier.
	pub complete: bool,
}

/// Handle for producing stream messages backed by an [`UnboundedSender`].
pub struct DataStream<M, P> {
	tx: UnboundedSender<StreamEnvelope<M, P>>,
	id: u64,
	kind: M,
}

impl<M: Clone, P> DataStream<M, P> {
	/// Create a new handle backed by the provided sender.
	#[must_use]
	pub fn new(tx: UnboundedSender<StreamEnvelope<M, P>>, id: u64, kind: M) -> Self {
		Self { tx, id, kind }
	}

	/// Identifier associated with this stream.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Emit a payload to the consumer.
	///
	/// Returns `false` once the consumer has gone away.
	pub fn send(&self, payload: P, complete: bool) -> bool {
		self.send_as(self.kind.clone(), payload, complete)
	}

	/// Emit a payload tagged with different metadata.
	pub fn send_as(&self, kind: M, payload: P, complete: bool) -> bool {
		self.tx
			.send(StreamEnvelope {
				id: self.id,
				kind,
				payload,
				complete,
			})
			.is_ok()
	}

	/// Returns `true` once the receiving side has been dropped.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

impl<M: Clone, P> Clone for DataStream<M, P> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
			id: self.id,
			kind: self.kind.clone(),
		}
	}
}

/// Suggestion batches, staleness tracking and delivery caps.
pub mod suggestions;
