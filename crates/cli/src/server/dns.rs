use sinkhole_dns_infrastructure::dns::{serve_tcp, serve_udp, DnsRequestHandler};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<DnsRequestHandler>,
) -> anyhow::Result<()> {
    info!(bind_address = %socket_addr, "Starting DNS server");

    let udp_socket = Arc::new(UdpSocket::bind(socket_addr).await?);
    info!(protocol = "UDP", "DNS server listening");

    let tcp_listener = TcpListener::bind(socket_addr).await?;
    info!(protocol = "TCP", "DNS server listening");

    info!("DNS server ready to accept queries");

    tokio::join!(
        serve_udp(udp_socket, Arc::clone(&handler)),
        serve_tcp(tcp_listener, handler),
    );

    Ok(())
}
