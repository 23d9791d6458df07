//! Configuration module for Sinkhole DNS
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener port and binding
//! - `resolver`: Upstream nameservers, staggering and timeouts
//! - `oracle`: Verdict service endpoint and breaker tuning
//! - `sinkhole`: Redirect target and resolver mode
//! - `cache`, `policy`, `background`, `logging`
//! - `errors`: Configuration errors

pub mod background;
pub mod cache;
pub mod errors;
pub mod logging;
pub mod oracle;
pub mod policy;
pub mod resolver;
pub mod root;
pub mod server;
pub mod sinkhole;

pub use background::BackgroundConfig;
pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use oracle::OracleConfig;
pub use policy::PolicyConfig;
pub use resolver::{ResolverConfig, DEFAULT_EXCHANGE_TIMEOUT_SECS};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use sinkhole::{ResolverMode, SinkholeConfig};
