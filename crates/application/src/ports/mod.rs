pub mod caches;
pub mod oracle_client;
pub mod upstream_exchanger;

pub use caches::{PolicyCache, PolicyCaches, VerdictCache};
pub use oracle_client::OracleClient;
pub use upstream_exchanger::UpstreamExchanger;
