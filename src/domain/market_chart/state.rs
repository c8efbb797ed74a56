//! Chart request state — app-owned, SDK-provided update logic.
//!
//! Chart fetches are slow (two sequential requests for a comparison) and the
//! user can change the selection while one is in flight. A result is only
//! applied when it belongs to the most recent request.

/// Handle for one started request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    key: String,
    generation: u64,
}

impl RequestTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the latest chart request and its result.
///
/// The app owns instances of this type.
#[derive(Debug, Clone)]
pub struct ChartRequestTracker<T> {
    generation: u64,
    pending: Option<RequestTicket>,
    latest: Option<(String, T)>,
}

impl<T> Default for ChartRequestTracker<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
            latest: None,
        }
    }
}

impl<T> ChartRequestTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `key`, superseding any request still in flight.
    pub fn begin(&mut self, key: impl Into<String>) -> RequestTicket {
        self.generation += 1;
        let ticket = RequestTicket {
            key: key.into(),
            generation: self.generation,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }

    /// Apply a finished result. Returns `false` and drops `value` when the
    /// ticket has been superseded.
    pub fn complete(&mut self, ticket: &RequestTicket, value: T) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                key = ticket.key.as_str(),
                generation = ticket.generation,
                current = self.generation,
                "Dropping stale chart result"
            );
            return false;
        }
        self.pending = None;
        self.latest = Some((ticket.key.clone(), value));
        true
    }

    /// Forget the in-flight request without applying anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref().map(|(_, v)| v)
    }

    pub fn latest_key(&self) -> Option<&str> {
        self.latest.as_ref().map(|(k, _)| k.as_str())
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_current_request() {
        let mut tracker = ChartRequestTracker::new();
        let t = tracker.begin("btc|eth");
        assert!(tracker.is_loading());
        assert!(tracker.complete(&t, 42));
        assert!(!tracker.is_loading());
        assert_eq!(tracker.latest(), Some(&42));
        assert_eq!(tracker.latest_key(), Some("btc|eth"));
    }

    #[test]
    fn test_superseded_result_is_dropped() {
        let mut tracker = ChartRequestTracker::new();
        let first = tracker.begin("btc|eth");
        let second = tracker.begin("btc|sol");
        assert!(second.generation() > first.generation());
        assert!(!tracker.is_current(&first));

        assert!(!tracker.complete(&first, 1));
        assert_eq!(tracker.latest(), None);
        assert!(tracker.is_loading());

        assert!(tracker.complete(&second, 2));
        assert_eq!(tracker.latest(), Some(&2));
    }

    #[test]
    fn test_same_key_restart_supersedes() {
        let mut tracker = ChartRequestTracker::new();
        let a = tracker.begin("btc|eth");
        let b = tracker.begin("btc|eth");
        assert!(!tracker.complete(&a, "old"));
        assert!(tracker.complete(&b, "new"));
        assert_eq!(tracker.latest(), Some(&"new"));
    }

    #[test]
    fn test_cancel_and_clear() {
        let mut tracker: ChartRequestTracker<u8> = ChartRequestTracker::new();
        let t = tracker.begin("k");
        tracker.cancel();
        assert!(!tracker.complete(&t, 1));

        let t = tracker.begin("k");
        tracker.complete(&t, 2);
        tracker.clear();
        assert_eq!(tracker.latest(), None);
        assert_eq!(tracker.latest_key(), None);
    }
}
