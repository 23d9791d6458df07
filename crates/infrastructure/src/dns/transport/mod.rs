pub mod tcp;
pub mod udp;

use sinkhole_dns_domain::{DnsTransport, DomainError};
use std::net::SocketAddr;
use std::time::Duration;

/// Sends one raw DNS message to `server` over the client's transport.
pub async fn send(
    transport: DnsTransport,
    server: SocketAddr,
    message_bytes: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, DomainError> {
    match transport {
        DnsTransport::Udp => udp::UdpTransport::new(server).send(message_bytes, timeout).await,
        DnsTransport::Tcp => tcp::TcpTransport::new(server).send(message_bytes, timeout).await,
    }
}

pub(crate) fn transport_error(server: SocketAddr, action: &str, e: std::io::Error) -> DomainError {
    DomainError::UpstreamTransport {
        server: server.to_string(),
        reason: format!("{}: {}", action, e),
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::UpstreamTimeout {
        server: server.to_string(),
    }
}
