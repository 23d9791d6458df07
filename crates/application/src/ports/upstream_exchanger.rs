use async_trait::async_trait;
use sinkhole_dns_domain::{DnsRequest, DnsTransport, DomainError, ResolvedMessage};
use std::time::Duration;

/// A single request/response exchange with one upstream nameserver.
#[async_trait]
pub trait UpstreamExchanger: Send + Sync {
    async fn exchange(
        &self,
        transport: DnsTransport,
        request: &DnsRequest,
        nameserver: &str,
        timeout: Duration,
    ) -> Result<ResolvedMessage, DomainError>;
}
