use super::{timeout_error, transport_error};
use sinkhole_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP: 2-byte big-endian length prefix, one connection per exchange.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr;

        let mut stream = tokio::time::timeout(timeout, TcpStream::connect(server))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| transport_error(server, "connect", e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| transport_error(server, "set TCP_NODELAY", e))?;

        tokio::time::timeout(timeout, write_framed(&mut stream, message_bytes))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| transport_error(server, "send", e))?;

        debug!(server = %server, bytes_sent = message_bytes.len(), "TCP query sent");

        let response = tokio::time::timeout(timeout, read_framed(&mut stream))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| transport_error(server, "receive", e))?;

        debug!(server = %server, bytes_received = response.len(), "TCP response received");

        Ok(response)
    }
}

/// Writes one length-prefixed DNS message.
pub async fn write_framed<W>(stream: &mut W, message: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let len = u16::try_from(message.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "DNS message exceeds 65535 bytes")
    })?;

    let mut framed = Vec::with_capacity(2 + message.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    stream.write_all(&framed).await?;
    stream.flush().await
}

/// Reads one length-prefixed DNS message, without the prefix.
pub async fn read_framed<R>(stream: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; len];
    stream.read_exact(&mut message).await?;
    Ok(message)
}
