//! Metrics collection for Drive API lookups.
//!
//! Thread-safe aggregate counters of request counts, outcomes and timing,
//! shared between the [`DriveClient`](super::DriveClient) and whoever wants
//! to report on it. Nothing here grows with the number of requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Which Drive endpoint a request hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `files.list` with a search predicate
    Search,
    /// `files.get` for a single id
    Get,
}

/// Collector for Drive lookup metrics
#[derive(Debug, Default)]
pub struct LookupMetrics {
    search_count: AtomicUsize,
    get_count: AtomicUsize,
    /// Requests answered with 401
    unauthorized_count: AtomicUsize,
    /// Requests that never got a response
    transport_failure_count: AtomicUsize,
    /// Total time spent in requests (nanoseconds)
    total_request_time_ns: AtomicU64,
}

impl LookupMetrics {
    /// Create a new metrics collector wrapped in Arc for sharing
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a completed (or failed) request.
    /// `status` is `None` when the request never got a response.
    pub fn record_request(&self, kind: RequestKind, status: Option<u16>, duration: Duration) {
        match kind {
            RequestKind::Search => self.search_count.fetch_add(1, Ordering::Relaxed),
            RequestKind::Get => self.get_count.fetch_add(1, Ordering::Relaxed),
        };
        match status {
            Some(401) => {
                self.unauthorized_count.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.transport_failure_count.fetch_add(1, Ordering::Relaxed);
            }
            Some(_) => {}
        }
        self.total_request_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn request_count(&self) -> usize {
        self.search_count() + self.get_count()
    }

    pub fn search_count(&self) -> usize {
        self.search_count.load(Ordering::Relaxed)
    }

    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::Relaxed)
    }

    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized_count.load(Ordering::Relaxed)
    }

    pub fn transport_failure_count(&self) -> usize {
        self.transport_failure_count.load(Ordering::Relaxed)
    }

    pub fn total_request_time(&self) -> Duration {
        Duration::from_nanos(self.total_request_time_ns.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tracking() {
        let metrics = LookupMetrics::new();

        metrics.record_request(RequestKind::Search, Some(200), Duration::from_millis(50));
        metrics.record_request(RequestKind::Get, Some(404), Duration::from_millis(20));
        metrics.record_request(RequestKind::Get, Some(401), Duration::from_millis(30));

        assert_eq!(metrics.request_count(), 3);
        assert_eq!(metrics.search_count(), 1);
        assert_eq!(metrics.get_count(), 2);
        assert_eq!(metrics.unauthorized_count(), 1);
        assert_eq!(metrics.transport_failure_count(), 0);
        assert_eq!(metrics.total_request_time(), Duration::from_millis(100));
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let metrics = LookupMetrics::new();
        metrics.record_request(RequestKind::Search, None, Duration::from_secs(30));

        assert_eq!(metrics.request_count(), 1);
        assert_eq!(metrics.unauthorized_count(), 0);
        assert_eq!(metrics.transport_failure_count(), 1);
    }

    #[test]
    fn test_long_session_only_aggregates() {
        let metrics = LookupMetrics::new();
        for _ in 0..10_000 {
            metrics.record_request(RequestKind::Get, Some(200), Duration::from_micros(1));
        }

        assert_eq!(metrics.get_count(), 10_000);
        assert_eq!(metrics.total_request_time(), Duration::from_millis(10));
    }
}
