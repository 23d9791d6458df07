use super::transport::tcp::{read_framed, write_framed};
use super::wire::{encode_response, error_response, parse_message, request_from_message};
use hickory_proto::op::ResponseCode;
use sinkhole_dns_application::services::NameserverRacer;
use sinkhole_dns_domain::{DnsTransport, DomainError};
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tracing::{debug, error, warn};

/// Largest query accepted over UDP.
const MAX_UDP_QUERY_SIZE: usize = 4096;
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns one client query into one reply.
pub struct DnsRequestHandler {
    racer: Arc<NameserverRacer>,
}

impl DnsRequestHandler {
    pub fn new(racer: Arc<NameserverRacer>) -> Self {
        Self { racer }
    }

    /// `None` when the bytes are not a DNS message at all; such packets
    /// are dropped without a reply.
    pub async fn handle(&self, transport: DnsTransport, wire: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let message = match parse_message(wire) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client_ip, error = %e, "Dropping undecodable packet");
                return None;
            }
        };

        let request = match request_from_message(&message, wire, client_ip) {
            Ok(request) => request,
            Err(e) => {
                debug!(client = %client_ip, error = %e, "Rejecting malformed query");
                return encode_or_log(error_response(&message, ResponseCode::FormErr));
            }
        };

        match self.racer.lookup(transport, &request).await {
            Ok(resolved) => encode_or_log(encode_response(&resolved, message.id())),
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Lookup failed");
                encode_or_log(error_response(&message, ResponseCode::ServFail))
            }
        }
    }
}

fn encode_or_log(result: Result<Vec<u8>, DomainError>) -> Option<Vec<u8>> {
    result
        .map_err(|e| error!(error = %e, "Failed to encode reply"))
        .ok()
}

/// UDP receive loop; each datagram is handled on its own task.
pub async fn serve_udp(socket: Arc<UdpSocket>, handler: Arc<DnsRequestHandler>) {
    let mut buf = vec![0u8; MAX_UDP_QUERY_SIZE];

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP receive error");
                continue;
            }
        };

        let packet = buf[..len].to_vec();
        let socket = Arc::clone(&socket);
        let handler = Arc::clone(&handler);

        tokio::spawn(async move {
            if let Some(reply) = handler.handle(DnsTransport::Udp, &packet, peer.ip()).await {
                if let Err(e) = socket.send_to(&reply, peer).await {
                    debug!(client = %peer, error = %e, "Failed to send UDP reply");
                }
            }
        });
    }
}

/// TCP accept loop; each connection may carry several queries.
pub async fn serve_tcp(listener: TcpListener, handler: Arc<DnsRequestHandler>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tokio::spawn(handle_connection(stream, peer, Arc::clone(&handler)));
            }
            Err(e) => {
                warn!(error = %e, "TCP accept error");
            }
        }
    }
}

async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, handler: Arc<DnsRequestHandler>) {
    loop {
        let query = match tokio::time::timeout(TCP_IDLE_TIMEOUT, read_framed(&mut stream)).await {
            Ok(Ok(query)) => query,
            Ok(Err(e)) if e.kind() == ErrorKind::UnexpectedEof => return,
            Ok(Err(e)) => {
                debug!(client = %peer, error = %e, "TCP read error");
                return;
            }
            Err(_) => return,
        };

        let Some(reply) = handler.handle(DnsTransport::Tcp, &query, peer.ip()).await else {
            return;
        };

        if let Err(e) = write_framed(&mut stream, &reply).await {
            debug!(client = %peer, error = %e, "Failed to send TCP reply");
            return;
        }
    }
}
