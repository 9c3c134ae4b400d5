//! Trailing-edge debounce for keystroke-driven input.
//!
//! Time is passed in explicitly so the event loop drives it from its tick and
//! tests can step a fake clock.

use std::time::{Duration, Instant};

/// Quiet period before a typed filter is applied to the grid.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(250);

/// Holds the latest value until no new value has arrived for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Returns the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(v, _)| v)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(FILTER_DEBOUNCE);
        d.push("r", t0);
        assert_eq!(d.poll(t0 + 100 * MS), None);
        assert_eq!(d.poll(t0 + 250 * MS), Some("r"));
        assert_eq!(d.poll(t0 + 500 * MS), None);
    }

    #[test]
    fn burst_yields_only_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(FILTER_DEBOUNCE);
        d.push("R", t0);
        d.push("RT", t0 + 100 * MS);
        d.push("RTX", t0 + 200 * MS);
        // 250ms after the first key, but only 50ms after the last.
        assert_eq!(d.poll(t0 + 250 * MS), None);
        assert_eq!(d.poll(t0 + 450 * MS), Some("RTX"));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(FILTER_DEBOUNCE);
        d.push(2, t0);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + 1000 * MS), None);
    }
}
