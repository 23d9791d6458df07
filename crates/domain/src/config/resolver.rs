use serde::{Deserialize, Serialize};

/// Upstream resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// System resolver file providing nameservers and the exchange timeout
    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Delay between starting successive upstream attempts (default: 200ms)
    #[serde(default = "default_stagger_interval_ms")]
    pub stagger_interval_ms: u64,

    /// Per-exchange timeout; falls back to resolv.conf `options timeout:N`
    #[serde(default)]
    pub exchange_timeout_secs: Option<u64>,

    /// Ignore the system resolvers and use `backend_resolvers` verbatim
    #[serde(default)]
    pub use_backend_exclusively: bool,

    /// Explicit upstreams, e.g. "8.8.8.8:53" or "[2001:4860:4860::8888]:53"
    #[serde(default)]
    pub backend_resolvers: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resolv_conf: default_resolv_conf(),
            stagger_interval_ms: default_stagger_interval_ms(),
            exchange_timeout_secs: None,
            use_backend_exclusively: false,
            backend_resolvers: Vec::new(),
        }
    }
}

pub const DEFAULT_EXCHANGE_TIMEOUT_SECS: u64 = 5;

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_stagger_interval_ms() -> u64 {
    200
}
