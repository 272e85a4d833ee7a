//! Debounced, de-duplicated search input.

use std::time::Duration;
use tokio::time::Instant;

/// Timer-gated latest-value queue for search input.
///
/// Every keystroke replaces the pending query and restarts the quiet period.
/// A query fires once the quiet period has elapsed, unless it equals the
/// last query that fired. Time is passed in by the caller.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
    last_fired: Option<String>,
}

impl SearchDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            last_fired: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record new input at `now`, replacing anything still pending.
    pub fn push(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now + self.quiet_period));
    }

    /// When the pending query becomes due, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending query if its quiet period has elapsed.
    ///
    /// Returns `None` when nothing is due, or when the due query repeats
    /// the last one fired.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {}
            _ => return None,
        }

        let (query, _) = self.pending.take()?;
        if self.last_fired.as_deref() == Some(query.as_str()) {
            return None;
        }

        self.last_fired = Some(query.clone());
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(QUIET);

        debouncer.push("jo", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + QUIET),
            Some("jo".to_string())
        );
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn test_keystroke_restarts_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(QUIET);

        debouncer.push("j", start);
        debouncer.push("jo", start + Duration::from_millis(200));
        debouncer.push("joh", start + Duration::from_millis(400));

        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(700)),
            Some("joh".to_string())
        );
    }

    #[test]
    fn test_repeated_query_is_dropped() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(QUIET);

        debouncer.push("john", start);
        assert!(debouncer.poll(start + QUIET).is_some());

        // "john" -> "joh" -> "john" inside one quiet period settles on "john" again
        debouncer.push("joh", start + Duration::from_secs(1));
        debouncer.push("john", start + Duration::from_millis(1100));
        assert_eq!(debouncer.poll(start + Duration::from_secs(2)), None);

        debouncer.push("", start + Duration::from_secs(3));
        assert_eq!(
            debouncer.poll(start + Duration::from_secs(4)),
            Some(String::new())
        );
    }
}
