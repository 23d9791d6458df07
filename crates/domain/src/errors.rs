use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid query name: {0}")]
    InvalidQueryName(String),

    #[error("Invalid client address: {0}")]
    InvalidClientAddress(String),

    #[error("Invalid answer value: {0}")]
    InvalidAnswerValue(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport error talking to {server}: {reason}")]
    UpstreamTransport { server: String, reason: String },

    #[error("Transport timeout connecting to {server}")]
    UpstreamTimeout { server: String },

    #[error("{qname} resolution failed on {} ({transport})", .nameservers.join("; "))]
    ResolutionExhausted {
        qname: String,
        transport: String,
        nameservers: Vec<String>,
    },

    #[error("Oracle request to {url} failed: {reason}")]
    OracleTransport { url: String, reason: String },

    #[error("{at}: Non HTTP 200 ({status}) for {url}")]
    OracleStatus {
        url: String,
        status: u16,
        at: DateTime<Utc>,
    },

    #[error("Oracle response could not be decoded: {0}")]
    OracleDecode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Validation errors are recovered locally: the item is skipped, nothing is sinkholed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidQueryName(_) | Self::InvalidClientAddress(_) | Self::InvalidAnswerValue(_)
        )
    }

    /// Errors that count against oracle health (decode failures included).
    pub fn is_oracle_failure(&self) -> bool {
        matches!(
            self,
            Self::OracleTransport { .. } | Self::OracleStatus { .. } | Self::OracleDecode(_)
        )
    }
}
