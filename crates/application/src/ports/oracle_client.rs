use async_trait::async_trait;
use sinkhole_dns_domain::{DomainError, Verdict};

/// Remote verdict service. One call is one HTTP round trip; timing and
/// health are the caller's concern.
#[async_trait]
pub trait OracleClient: Send + Sync {
    async fn fetch_verdict(
        &self,
        client_address: &str,
        query_value: &str,
        trimmed_qname: &str,
    ) -> Result<Verdict, DomainError>;
}
