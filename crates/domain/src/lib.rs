//! Sinkhole DNS Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod errors;
pub mod fingerprint;
pub mod resolved_message;
pub mod validators;
pub mod verdict;

pub use config::{CliOverrides, Config, ConfigError, ResolverMode};
pub use dns_protocol::DnsTransport;
pub use dns_query::{DnsRequest, Query};
pub use errors::DomainError;
pub use fingerprint::{NameFingerprint, RequestFingerprint};
pub use resolved_message::{AddressRecord, ResolvedMessage, ResourceRecord, ROOT_SERVERS_SUFFIX};
pub use verdict::Verdict;
