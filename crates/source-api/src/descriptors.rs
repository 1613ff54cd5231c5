use crate::types::QueryMode;

/// How a source produces its results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLatency {
    /// Answers from memory without suspending.
    Immediate,
    /// Waits on the browser platform, yet outranks the immediate sources; it
    /// is settled before any of them is delivered.
    Leading,
    /// Waits on the browser platform or the network. Polled concurrently after
    /// the leading and immediate sources.
    Deferred,
}

/// Static metadata advertised by a source.
#[derive(Debug)]
pub struct SourceDescriptor {
    /// Unique identifier, also used to look up per-source limits.
    pub id: &'static str,
    /// Short label for logs and listings.
    pub label: &'static str,
    /// Scoped mode this source answers on its own, if any.
    pub scope: Option<QueryMode>,
    pub latency: SourceLatency,
}

impl SourceDescriptor {
    /// Returns `true` when the source is polled alongside the other
    /// deferred sources rather than settled up front.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self.latency, SourceLatency::Deferred)
    }
}
