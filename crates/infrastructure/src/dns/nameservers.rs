use sinkhole_dns_domain::config::{ResolverConfig, DEFAULT_EXCHANGE_TIMEOUT_SECS};
use sinkhole_dns_domain::DomainError;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// The parts of a resolv.conf this proxy uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemResolverConfig {
    pub nameservers: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl SystemResolverConfig {
    pub fn from_file(path: &str) -> Result<Self, DomainError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DomainError::IoError(format!("Failed to read {}: {}", path, e)))?;
        Ok(Self::parse(&contents))
    }

    /// Reads `nameserver` lines and `options timeout:N`. Comments and
    /// unknown directives are ignored.
    pub fn parse(contents: &str) -> Self {
        let mut config = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let mut words = line.split_whitespace();
            match words.next() {
                Some("nameserver") => {
                    if let Some(server) = words.next() {
                        config.nameservers.push(server.to_string());
                    }
                }
                Some("options") => {
                    for option in words {
                        if let Some(value) = option.strip_prefix("timeout:") {
                            config.timeout_secs = value.parse().ok();
                        }
                    }
                }
                _ => {}
            }
        }

        config
    }
}

/// `host` becomes `host:53`; dnsmasq-style `host#port` becomes `host:port`.
/// IPv6 hosts are bracketed so the result parses as a socket address.
pub fn normalize_nameserver(server: &str) -> String {
    let (host, port) = match server.find('#') {
        Some(i) if i > 0 => (&server[..i], &server[i + 1..]),
        _ => (server, ""),
    };

    let host = match host.parse::<IpAddr>() {
        Ok(IpAddr::V6(_)) => format!("[{}]", host),
        _ => host.to_string(),
    };

    if port.is_empty() {
        format!("{}:{}", host, DEFAULT_DNS_PORT)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Ordered upstream list: the exclusive backend list verbatim when enabled,
/// otherwise the system nameservers normalized.
pub fn resolve_nameservers(
    config: &ResolverConfig,
    system: Option<&SystemResolverConfig>,
) -> Vec<String> {
    if config.use_backend_exclusively {
        debug!(servers = ?config.backend_resolvers, "Using backend resolvers exclusively");
        return config.backend_resolvers.clone();
    }

    system
        .map(|s| s.nameservers.iter().map(|ns| normalize_nameserver(ns)).collect())
        .unwrap_or_default()
}

/// Configured timeout, else resolv.conf `timeout:N`, else the default.
pub fn exchange_timeout(config: &ResolverConfig, system: Option<&SystemResolverConfig>) -> Duration {
    let secs = config
        .exchange_timeout_secs
        .or_else(|| system.and_then(|s| s.timeout_secs))
        .unwrap_or(DEFAULT_EXCHANGE_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
