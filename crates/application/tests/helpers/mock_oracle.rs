use async_trait::async_trait;
use sinkhole_dns_application::ports::OracleClient;
use sinkhole_dns_domain::{DomainError, Verdict};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock OracleClient
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub client_address: String,
    pub query_value: String,
    pub trimmed_qname: String,
}

#[derive(Clone)]
pub struct MockOracleClient {
    verdicts: Arc<RwLock<HashMap<String, Verdict>>>,
    default_verdict: Arc<RwLock<Verdict>>,
    delay: Arc<RwLock<Duration>>,
    should_fail: Arc<RwLock<bool>>,
    requests: Arc<RwLock<Vec<OracleRequest>>>,
    calls: Arc<AtomicUsize>,
}

impl MockOracleClient {
    pub fn new() -> Self {
        Self {
            verdicts: Arc::new(RwLock::new(HashMap::new())),
            default_verdict: Arc::new(RwLock::new(Verdict::Allow)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            should_fail: Arc::new(RwLock::new(false)),
            requests: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Verdict returned when `query_value` is asked about.
    pub async fn set_verdict(&self, query_value: &str, verdict: Verdict) {
        self.verdicts
            .write()
            .await
            .insert(query_value.to_string(), verdict);
    }

    pub async fn set_default_verdict(&self, verdict: Verdict) {
        *self.default_verdict.write().await = verdict;
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<OracleRequest> {
        self.requests.read().await.clone()
    }
}

impl Default for MockOracleClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OracleClient for MockOracleClient {
    async fn fetch_verdict(
        &self,
        client_address: &str,
        query_value: &str,
        trimmed_qname: &str,
    ) -> Result<Verdict, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(OracleRequest {
            client_address: client_address.to_string(),
            query_value: query_value.to_string(),
            trimmed_qname: trimmed_qname.to_string(),
        });

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.read().await {
            return Err(DomainError::OracleTransport {
                url: "http://mock-oracle".to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let verdicts = self.verdicts.read().await;
        Ok(match verdicts.get(query_value) {
            Some(verdict) => *verdict,
            None => *self.default_verdict.read().await,
        })
    }
}
