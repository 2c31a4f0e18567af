use dnsrelay_infrastructure::dns::RelayMetrics;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Logs relay counters every `interval_secs` seconds. Zero disables it.
pub fn start_stats_reporter(metrics: Arc<RelayMetrics>, interval_secs: u64) {
    if interval_secs == 0 {
        return;
    }

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let snapshot = metrics.snapshot();
            info!(
                queries = snapshot.queries,
                cache_hits = snapshot.cache_hits,
                hit_rate = %format!("{:.2}%", metrics.hit_rate()),
                cache_outdated = snapshot.cache_outdated,
                remote_sent = snapshot.remote_sent,
                remote_received = snapshot.remote_received,
                evictions = snapshot.evictions,
                dropped = snapshot.malformed + snapshot.unexpected_source + snapshot.unknown_session,
                "Relay statistics"
            );
        }
    });
}
