use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Which source of truth decides whether a name is sinkholed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolverMode {
    #[default]
    Oracle,
    LocalResolver,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkholeConfig {
    /// Address handed out instead of the real answer
    #[serde(default = "default_sinkhole_address")]
    pub address: String,

    #[serde(default = "default_sinkhole_ttl")]
    pub ttl: u32,

    #[serde(default)]
    pub mode: ResolverMode,
}

impl SinkholeConfig {
    pub fn parsed_address(&self) -> Option<IpAddr> {
        self.address.parse().ok()
    }
}

impl Default for SinkholeConfig {
    fn default() -> Self {
        Self {
            address: default_sinkhole_address(),
            ttl: default_sinkhole_ttl(),
            mode: ResolverMode::default(),
        }
    }
}

fn default_sinkhole_address() -> String {
    "127.0.0.1".to_string()
}

fn default_sinkhole_ttl() -> u32 {
    5
}
