#![allow(dead_code)]
#![allow(unused_imports)]

pub mod dns_server_mock;
pub mod oracle_mock;

pub use dns_server_mock::{build_query, MockDnsServer, MockDnsServerOptions};
pub use oracle_mock::{MockOracleServer, RecordedRequest};
