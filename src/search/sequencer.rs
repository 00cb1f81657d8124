use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Quiet period after the last keystroke before a search is sent.
pub const DEBOUNCE: Duration = Duration::from_millis(400);

/// Identifies one dispatched search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Orders client-side search requests so only the latest one is rendered.
///
/// Every keystroke takes a ticket. A debounced request fires only if its
/// ticket is still current when the timer expires, and its response is
/// applied only if no newer ticket was taken in the meantime. Clones share
/// the same counter.
#[derive(Debug, Clone, Default)]
pub struct SearchSequencer {
    latest: Arc<AtomicU64>,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket, superseding all previously issued ones.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
