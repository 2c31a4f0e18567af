use dnsrelay_domain::Config;
use dnsrelay_infrastructure::dns::AnswerTable;
use tracing::{error, info};

/// Builds the answer table and fills it from the static override file.
///
/// An unreadable file is logged and the relay starts with no overrides.
pub fn load_answer_table(config: &Config) -> AnswerTable {
    let mut table = AnswerTable::new(config.cache.capacity);
    let path = &config.cache.static_file;

    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let report = table.load_static_hosts(&contents);
            info!(
                file = %path,
                addresses = report.addresses,
                blocked = report.blocked,
                skipped = report.skipped,
                "Static records loaded"
            );
        }
        Err(e) => {
            error!(file = %path, error = %e, "Cannot open static file");
        }
    }

    table
}
