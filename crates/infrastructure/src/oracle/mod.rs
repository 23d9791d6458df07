pub mod http_client;
pub mod response;

pub use http_client::HttpOracleClient;
pub use response::parse_verdict;
