use serde::{Deserialize, Serialize};

pub const MAX_CACHE_CAPACITY: usize = 1_000_000_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Upper bound on learned (non-static) entries.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Path of the `<ipv4> <name>` static override file.
    #[serde(default = "default_static_file")]
    pub static_file: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            static_file: default_static_file(),
        }
    }
}

fn default_capacity() -> usize {
    1000
}

fn default_static_file() -> String {
    "dnsrelay.txt".to_string()
}
