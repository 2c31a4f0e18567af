pub mod dispatcher;
pub mod metrics;

pub use dispatcher::RelayDispatcher;
pub use metrics::{RelayMetrics, RelayMetricsSnapshot};
