use async_trait::async_trait;
use bytes::Bytes;
use sinkhole_dns_application::ports::UpstreamExchanger;
use sinkhole_dns_domain::{
    DnsRequest, DnsTransport, DomainError, ResolvedMessage, ResourceRecord,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock UpstreamExchanger
// ============================================================================

#[derive(Debug, Clone)]
pub enum MockReply {
    /// NOERROR with one A record carrying this address
    Answer(&'static str),
    /// Completed exchange with a failure rcode
    Rcode(u16),
    /// Transport error
    Error,
}

#[derive(Clone)]
pub struct MockExchanger {
    behaviours: Arc<RwLock<HashMap<String, (Duration, MockReply)>>>,
    calls: Arc<RwLock<Vec<(DnsTransport, String)>>>,
    completed: Arc<AtomicUsize>,
}

impl MockExchanger {
    pub fn new() -> Self {
        Self {
            behaviours: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn set_behaviour(&self, nameserver: &str, delay: Duration, reply: MockReply) {
        self.behaviours
            .write()
            .await
            .insert(nameserver.to_string(), (delay, reply));
    }

    /// Nameservers contacted, in start order.
    pub async fn called(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .map(|(_, ns)| ns.clone())
            .collect()
    }

    pub async fn transports(&self) -> Vec<DnsTransport> {
        self.calls.read().await.iter().map(|(t, _)| *t).collect()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl Default for MockExchanger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamExchanger for MockExchanger {
    async fn exchange(
        &self,
        transport: DnsTransport,
        request: &DnsRequest,
        nameserver: &str,
        _timeout: Duration,
    ) -> Result<ResolvedMessage, DomainError> {
        self.calls
            .write()
            .await
            .push((transport, nameserver.to_string()));

        let behaviour = self.behaviours.read().await.get(nameserver).cloned();
        let (delay, reply) = behaviour.unwrap_or((Duration::ZERO, MockReply::Error));

        tokio::time::sleep(delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);

        let question = request.query.clone();
        match reply {
            MockReply::Answer(address) => {
                let record = ResourceRecord::new(format!(
                    "{}\t300\tIN\tA\t{}",
                    question.qname, address
                ));
                Ok(ResolvedMessage::new(
                    question,
                    0,
                    vec![record],
                    Bytes::from(nameserver.to_string()),
                ))
            }
            MockReply::Rcode(rcode) => {
                Ok(ResolvedMessage::new(question, rcode, vec![], Bytes::new()))
            }
            MockReply::Error => Err(DomainError::UpstreamTransport {
                server: nameserver.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}
