use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub client: String,
    pub query: String,
    pub qname: String,
    pub headers: HeaderMap,
}

#[derive(Clone)]
struct MockState {
    status: Arc<RwLock<StatusCode>>,
    body: Arc<RwLock<String>>,
    delay: Arc<RwLock<Duration>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

/// axum server answering `GET /{client}/{query}/{qname}` with a fixed reply.
pub struct MockOracleServer {
    addr: SocketAddr,
    state: MockState,
}

impl MockOracleServer {
    pub async fn start() -> Self {
        let state = MockState {
            status: Arc::new(RwLock::new(StatusCode::OK)),
            body: Arc::new(RwLock::new("null".to_string())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            requests: Arc::new(RwLock::new(Vec::new())),
        };

        let app = Router::new()
            .route("/dns/{client}/{query}/{qname}", get(verdict_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/dns", self.addr)
    }

    pub async fn respond_with(&self, status: StatusCode, body: &str) {
        *self.state.status.write().await = status;
        *self.state.body.write().await = body.to_string();
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.state.delay.write().await = delay;
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.read().await.clone()
    }
}

async fn verdict_handler(
    State(state): State<MockState>,
    Path((client, query, qname)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    state.requests.write().await.push(RecordedRequest {
        client,
        query,
        qname,
        headers,
    });

    let delay = *state.delay.read().await;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let status = *state.status.read().await;
    let body = state.body.read().await.clone();
    (status, body)
}
