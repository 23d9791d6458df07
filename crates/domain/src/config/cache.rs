use serde::{Deserialize, Serialize};

/// Verdict cache sizing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Entry lifetime; `None` keeps verdicts until evicted by capacity
    #[serde(default = "default_verdict_ttl_secs")]
    pub verdict_ttl_secs: Option<u64>,

    #[serde(default = "default_verdict_max_entries")]
    pub verdict_max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            verdict_ttl_secs: default_verdict_ttl_secs(),
            verdict_max_entries: default_verdict_max_entries(),
        }
    }
}

fn default_verdict_ttl_secs() -> Option<u64> {
    Some(3600)
}

fn default_verdict_max_entries() -> usize {
    100_000
}
