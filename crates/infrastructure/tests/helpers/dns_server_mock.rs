use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct MockDnsServerOptions {
    pub rcode: ResponseCode,
    pub answer: Option<Ipv4Addr>,
    pub delay: Duration,
    /// Reply with a different transaction id
    pub wrong_id: bool,
}

impl Default for MockDnsServerOptions {
    fn default() -> Self {
        Self {
            rcode: ResponseCode::NoError,
            answer: Some(Ipv4Addr::new(93, 184, 216, 34)),
            delay: Duration::ZERO,
            wrong_id: false,
        }
    }
}

/// Upstream stand-in listening on UDP and TCP on the same loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(options: MockDnsServerOptions) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(options.delay).await;
                            if let Some(response) = build_response(&buf[..len], &options) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let options = options.clone();
                            tokio::spawn(async move {
                                use tokio::io::{AsyncReadExt, AsyncWriteExt};
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                tokio::time::sleep(options.delay).await;
                                if let Some(response) = build_response(&query, &options) {
                                    let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                    framed.extend_from_slice(&response);
                                    let _ = stream.write_all(&framed).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_response(query: &[u8], options: &MockDnsServerOptions) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;

    let id = if options.wrong_id {
        request.id().wrapping_add(1)
    } else {
        request.id()
    };

    let mut response = Message::new();
    response.set_id(id).set_message_type(MessageType::Response).set_op_code(OpCode::Query);
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(true);
    response.set_response_code(options.rcode);
    for question in request.queries() {
        response.add_query(question.clone());
    }

    if let (Some(address), Some(question)) = (options.answer, request.queries().first()) {
        if options.rcode == ResponseCode::NoError {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A(address)),
            ));
        }
    }

    response.to_vec().ok()
}

/// A recursive A query for `name` with the given id.
pub fn build_query(name: &str, id: u16) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(RecordType::A);

    let mut message = Message::new();
    message.set_id(id).set_message_type(MessageType::Query).set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    message.to_vec().unwrap()
}
