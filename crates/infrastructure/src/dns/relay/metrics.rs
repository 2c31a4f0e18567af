use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Relay counters, shared between the dispatcher and the stats reporter.
#[derive(Default)]
pub struct RelayMetrics {
    // Per-datagram counters.
    pub queries: AtomicU64,
    pub cache_hits: AtomicU64,
    pub cache_outdated: AtomicU64,
    pub remote_sent: AtomicU64,
    pub remote_received: AtomicU64,

    pub insertions: AtomicU64,
    pub evictions: AtomicU64,
    pub malformed: AtomicU64,
    pub unexpected_source: AtomicU64,
    pub unknown_session: AtomicU64,
}

/// Point-in-time copy of `RelayMetrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayMetricsSnapshot {
    pub queries: u64,
    pub cache_hits: u64,
    pub cache_outdated: u64,
    pub remote_sent: u64,
    pub remote_received: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub malformed: u64,
    pub unexpected_source: u64,
    pub unknown_session: u64,
}

impl RelayMetrics {
    #[inline]
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Share of queries answered locally, as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(AtomicOrdering::Relaxed) as f64;
        let total = self.queries.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> RelayMetricsSnapshot {
        let load = |c: &AtomicU64| c.load(AtomicOrdering::Relaxed);
        RelayMetricsSnapshot {
            queries: load(&self.queries),
            cache_hits: load(&self.cache_hits),
            cache_outdated: load(&self.cache_outdated),
            remote_sent: load(&self.remote_sent),
            remote_received: load(&self.remote_received),
            insertions: load(&self.insertions),
            evictions: load(&self.evictions),
            malformed: load(&self.malformed),
            unexpected_source: load(&self.unexpected_source),
            unknown_session: load(&self.unknown_session),
        }
    }
}

impl RelayMetricsSnapshot {
    /// Counter increase since `earlier`.
    pub fn since(&self, earlier: &Self) -> Self {
        Self {
            queries: self.queries.saturating_sub(earlier.queries),
            cache_hits: self.cache_hits.saturating_sub(earlier.cache_hits),
            cache_outdated: self.cache_outdated.saturating_sub(earlier.cache_outdated),
            remote_sent: self.remote_sent.saturating_sub(earlier.remote_sent),
            remote_received: self.remote_received.saturating_sub(earlier.remote_received),
            insertions: self.insertions.saturating_sub(earlier.insertions),
            evictions: self.evictions.saturating_sub(earlier.evictions),
            malformed: self.malformed.saturating_sub(earlier.malformed),
            unexpected_source: self.unexpected_source.saturating_sub(earlier.unexpected_source),
            unknown_session: self.unknown_session.saturating_sub(earlier.unknown_session),
        }
    }
}
