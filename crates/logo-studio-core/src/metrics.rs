//! Global atomic counters for submission observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. when a session ends).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters: no allocations, no locking.
pub struct Metrics {
    submissions_started: AtomicU64,
    submissions_succeeded: AtomicU64,
    submissions_failed: AtomicU64,
    submissions_ignored: AtomicU64,
    gate_demotions: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            submissions_started: AtomicU64::new(0),
            submissions_succeeded: AtomicU64::new(0),
            submissions_failed: AtomicU64::new(0),
            submissions_ignored: AtomicU64::new(0),
            gate_demotions: AtomicU64::new(0),
        }
    }

    pub fn inc_started(&self) {
        self.submissions_started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "submissions_started", "counter incremented");
    }

    pub fn inc_succeeded(&self) {
        self.submissions_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "submissions_succeeded", "counter incremented");
    }

    pub fn inc_failed(&self) {
        self.submissions_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "submissions_failed", "counter incremented");
    }

    pub fn inc_ignored(&self) {
        self.submissions_ignored.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "submissions_ignored", "counter incremented");
    }

    pub fn inc_gate_demotions(&self) {
        self.gate_demotions.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "gate_demotions", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            submissions_started = self.submissions_started(),
            submissions_succeeded = self.submissions_succeeded(),
            submissions_failed = self.submissions_failed(),
            submissions_ignored = self.submissions_ignored(),
            gate_demotions = self.gate_demotions(),
        );
    }

    pub fn submissions_started(&self) -> u64 {
        self.submissions_started.load(Ordering::Relaxed)
    }

    pub fn submissions_succeeded(&self) -> u64 {
        self.submissions_succeeded.load(Ordering::Relaxed)
    }

    pub fn submissions_failed(&self) -> u64 {
        self.submissions_failed.load(Ordering::Relaxed)
    }

    pub fn submissions_ignored(&self) -> u64 {
        self.submissions_ignored.load(Ordering::Relaxed)
    }

    pub fn gate_demotions(&self) -> u64 {
        self.gate_demotions.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.submissions_started.store(0, Ordering::Relaxed);
        self.submissions_succeeded.store(0, Ordering::Relaxed);
        self.submissions_failed.store(0, Ordering::Relaxed);
        self.submissions_ignored.store(0, Ordering::Relaxed);
        self.gate_demotions.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        assert_eq!(m.submissions_started(), 0);
        m.inc_started();
        m.inc_started();
        assert_eq!(m.submissions_started(), 2);

        m.inc_succeeded();
        m.inc_failed();
        m.inc_failed();
        assert_eq!(m.submissions_succeeded(), 1);
        assert_eq!(m.submissions_failed(), 2);

        m.inc_ignored();
        m.inc_gate_demotions();
        assert_eq!(m.submissions_ignored(), 1);
        assert_eq!(m.gate_demotions(), 1);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_started();
        m.inc_succeeded();
        m.inc_failed();
        m.inc_ignored();
        m.inc_gate_demotions();
        m.reset();
        assert_eq!(m.submissions_started(), 0);
        assert_eq!(m.submissions_succeeded(), 0);
        assert_eq!(m.submissions_failed(), 0);
        assert_eq!(m.submissions_ignored(), 0);
        assert_eq!(m.gate_demotions(), 0);
    }
}
