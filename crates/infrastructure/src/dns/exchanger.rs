use super::transport;
use super::wire::{decode_response, message_id};
use async_trait::async_trait;
use sinkhole_dns_application::ports::UpstreamExchanger;
use sinkhole_dns_domain::{DnsRequest, DnsTransport, DomainError, ResolvedMessage};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Forwards the client's wire query to one nameserver and decodes the reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkExchanger;

impl NetworkExchanger {
    pub fn new() -> Self {
        Self
    }
}

async fn resolve_server(nameserver: &str) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = nameserver.parse::<SocketAddr>() {
        return Ok(addr);
    }

    tokio::net::lookup_host(nameserver)
        .await
        .map_err(|e| DomainError::UpstreamTransport {
            server: nameserver.to_string(),
            reason: format!("resolve: {}", e),
        })?
        .next()
        .ok_or_else(|| DomainError::UpstreamTransport {
            server: nameserver.to_string(),
            reason: "no address".to_string(),
        })
}

#[async_trait]
impl UpstreamExchanger for NetworkExchanger {
    async fn exchange(
        &self,
        transport: DnsTransport,
        request: &DnsRequest,
        nameserver: &str,
        timeout: Duration,
    ) -> Result<ResolvedMessage, DomainError> {
        let server = resolve_server(nameserver).await?;
        let response = transport::send(transport, server, &request.wire, timeout).await?;

        let expected_id = message_id(&request.wire);
        if message_id(&response) != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response id mismatch from {} (expected {:?})",
                server, expected_id
            )));
        }

        let message = decode_response(request.query.clone(), response)?;
        debug!(
            server = %server,
            transport = %transport,
            rcode = message.rcode,
            answers = message.answers.len(),
            "Upstream exchange complete"
        );
        Ok(message)
    }
}
