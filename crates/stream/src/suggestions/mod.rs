//! Delivery channel between the aggregator and the palette.

mod budget;
mod channel;
mod tracker;

pub use budget::DeliveryBudget;
pub use channel::{BatchOrigin, BatchStream, SuggestionEnvelope, SuggestionView, apply_envelope};
pub use tracker::RequestTracker;
