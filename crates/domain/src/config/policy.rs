use serde::{Deserialize, Serialize};

/// Domain lists seeding the local policy caches (local-resolver mode).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PolicyConfig {
    /// Customlist entries that sink
    #[serde(default)]
    pub customlist_blocked: Vec<String>,

    /// Customlist entries explicitly allowed
    #[serde(default)]
    pub customlist_allowed: Vec<String>,

    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Indicator-of-compromise domains
    #[serde(default)]
    pub ioclist: Vec<String>,
}
