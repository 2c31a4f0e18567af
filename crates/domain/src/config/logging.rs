use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Seconds between statistics lines; 0 turns them off.
    #[serde(default = "default_stat_interval")]
    pub stat_interval: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            stat_interval: default_stat_interval(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stat_interval() -> u64 {
    10
}
