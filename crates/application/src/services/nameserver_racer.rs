use super::decision_engine::SinkholeDecisionEngine;
use crate::ports::UpstreamExchanger;
use futures::future::join_all;
use sinkhole_dns_domain::{DnsRequest, DnsTransport, DomainError, ResolvedMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy)]
pub struct RacerSettings {
    /// Wait between starting successive upstream attempts.
    pub stagger_interval: Duration,
    /// Bound on one upstream exchange.
    pub exchange_timeout: Duration,
}

/// Races the configured nameservers for one query.
///
/// Attempts start top to bottom, one per stagger tick, and stop starting as
/// soon as any attempt publishes a usable reply. Attempts already running
/// are left to finish on their own timeout; their replies are dropped.
pub struct NameserverRacer {
    exchanger: Arc<dyn UpstreamExchanger>,
    nameservers: Arc<[String]>,
    decision: Arc<SinkholeDecisionEngine>,
    settings: RacerSettings,
}

impl NameserverRacer {
    pub fn new(
        exchanger: Arc<dyn UpstreamExchanger>,
        nameservers: Vec<String>,
        decision: Arc<SinkholeDecisionEngine>,
        settings: RacerSettings,
    ) -> Self {
        Self {
            exchanger,
            nameservers: nameservers.into(),
            decision,
            settings,
        }
    }

    #[instrument(skip(self, request), fields(qname = %request.query.qname, transport = %transport))]
    pub async fn lookup(
        &self,
        transport: DnsTransport,
        request: &DnsRequest,
    ) -> Result<ResolvedMessage, DomainError> {
        let Some(mut message) = self.race(transport, request).await else {
            return Err(DomainError::ResolutionExhausted {
                qname: request.query.qname.to_string(),
                transport: transport.to_string(),
                nameservers: self.nameservers.to_vec(),
            });
        };

        let query = &request.query;
        let decision = self
            .decision
            .decide(&mut message, &query.qname, &query.client_address)
            .await;
        debug!(?decision, "Sinkhole decision");

        Ok(message)
    }

    async fn race(&self, transport: DnsTransport, request: &DnsRequest) -> Option<ResolvedMessage> {
        // Capacity 1: the first usable reply wins, later offers are dropped.
        let (tx, mut rx) = mpsc::channel::<ResolvedMessage>(1);
        let stagger = self.settings.stagger_interval;
        let mut ticker = interval_at(Instant::now() + stagger, stagger);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut attempts = Vec::with_capacity(self.nameservers.len());

        for nameserver in self.nameservers.iter() {
            attempts.push(tokio::spawn(attempt(
                Arc::clone(&self.exchanger),
                transport,
                request.clone(),
                nameserver.clone(),
                self.settings.exchange_timeout,
                tx.clone(),
            )));

            tokio::select! {
                Some(message) = rx.recv() => return Some(message),
                _ = ticker.tick() => {}
            }
        }

        drop(tx);
        join_all(attempts).await;
        rx.try_recv().ok()
    }
}

async fn attempt(
    exchanger: Arc<dyn UpstreamExchanger>,
    transport: DnsTransport,
    request: DnsRequest,
    nameserver: String,
    timeout: Duration,
    slot: mpsc::Sender<ResolvedMessage>,
) {
    let started = Instant::now();
    let exchange = exchanger.exchange(transport, &request, &nameserver, timeout);

    match tokio::time::timeout(timeout, exchange).await {
        Err(_) => {
            debug!(server = %nameserver, "Upstream exchange timed out");
        }
        Ok(Err(e)) => {
            debug!(server = %nameserver, error = %e, "Upstream exchange failed");
        }
        Ok(Ok(message)) if !message.is_success() => {
            debug!(
                server = %nameserver,
                rcode = message.rcode,
                "Upstream answered with failure code, keep racing"
            );
        }
        Ok(Ok(message)) => {
            let rtt_ms = started.elapsed().as_millis() as u64;
            match slot.try_send(message) {
                Ok(()) => debug!(server = %nameserver, rtt_ms, "Upstream answered first"),
                Err(_) => debug!(server = %nameserver, rtt_ms, "Late upstream answer discarded"),
            }
        }
    }
}
