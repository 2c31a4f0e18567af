mod dns;
mod stats;

pub use dns::{build_dispatcher, run_relay};
pub use stats::start_stats_reporter;
