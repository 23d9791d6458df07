use serde::{Deserialize, Serialize};

/// Remote verdict service ("oracle") settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Base endpoint; client, query value and qname are appended as path segments
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_access_token_header")]
    pub access_token_header: String,

    #[serde(default)]
    pub access_token: String,

    /// Sent in `client_id_header` only when positive
    #[serde(default)]
    pub client_id: i64,

    #[serde(default = "default_client_id_header")]
    pub client_id_header: String,

    /// Latency budget; slower calls trip the breaker (default: 500ms)
    #[serde(default = "default_fit_response_time_ms")]
    pub fit_response_time_ms: u64,

    /// Breaker cooldown before a probe is attempted (default: 10000ms)
    #[serde(default = "default_sleep_when_disabled_ms")]
    pub sleep_when_disabled_ms: u64,

    /// Hard HTTP timeout for a single request (default: 2000ms)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Skip all sinkhole processing
    #[serde(default)]
    pub disabled: bool,

    /// Also check answer-record values (cache warming only)
    #[serde(default)]
    pub ip_addresses_enabled: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            access_token_header: default_access_token_header(),
            access_token: String::new(),
            client_id: 0,
            client_id_header: default_client_id_header(),
            fit_response_time_ms: default_fit_response_time_ms(),
            sleep_when_disabled_ms: default_sleep_when_disabled_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            disabled: false,
            ip_addresses_enabled: false,
        }
    }
}

fn default_access_token_header() -> String {
    "X-sinkit-token".to_string()
}

fn default_client_id_header() -> String {
    "X-client-id".to_string()
}

fn default_fit_response_time_ms() -> u64 {
    500
}

fn default_sleep_when_disabled_ms() -> u64 {
    10_000
}

fn default_request_timeout_ms() -> u64 {
    2_000
}
