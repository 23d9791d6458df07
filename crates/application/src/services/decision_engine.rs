use super::background_pool::BackgroundTaskPool;
use super::circuit_breaker::CircuitBreakerClient;
use super::sinkhole_rewriter::SinkholeRewriter;
use crate::ports::PolicyCaches;
use sinkhole_dns_domain::dns_query::trim_root_dot;
use sinkhole_dns_domain::validators::{validate_answer_value, validate_dns_request};
use sinkhole_dns_domain::{Config, NameFingerprint, ResolvedMessage, ResolverMode, ROOT_SERVERS_SUFFIX};
use std::sync::Arc;
use tracing::{debug, warn};

/// What `decide` did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Sinkhole processing is switched off.
    Skipped,
    /// The qname or client address failed validation.
    Invalid,
    Whitelisted,
    AllowedByCustomlist,
    SinkholedByCustomlist,
    SinkholedByIoclist,
    SinkholedByOracle,
    /// Nothing matched; the upstream answer is returned as is.
    Passed,
}

impl Decision {
    pub fn is_sinkholed(&self) -> bool {
        matches!(
            self,
            Self::SinkholedByCustomlist | Self::SinkholedByIoclist | Self::SinkholedByOracle
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecisionSettings {
    pub mode: ResolverMode,
    pub oracle_disabled: bool,
    pub ip_checking: bool,
}

impl DecisionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.sinkhole.mode,
            oracle_disabled: config.oracle.disabled,
            ip_checking: config.oracle.ip_addresses_enabled,
        }
    }
}

pub struct SinkholeDecisionEngine {
    breaker: Arc<CircuitBreakerClient>,
    policies: PolicyCaches,
    rewriter: SinkholeRewriter,
    background: BackgroundTaskPool,
    settings: DecisionSettings,
}

impl SinkholeDecisionEngine {
    pub fn new(
        breaker: Arc<CircuitBreakerClient>,
        policies: PolicyCaches,
        rewriter: SinkholeRewriter,
        background: BackgroundTaskPool,
        settings: DecisionSettings,
    ) -> Self {
        Self {
            breaker,
            policies,
            rewriter,
            background,
            settings,
        }
    }

    /// Classifies the resolved name and rewrites `message` in place when it
    /// must be sinkholed.
    pub async fn decide(
        &self,
        message: &mut ResolvedMessage,
        qname: &str,
        client_address: &str,
    ) -> Decision {
        if self.settings.oracle_disabled {
            return Decision::Skipped;
        }

        let trimmed_qname = trim_root_dot(qname);
        if let Err(e) = validate_dns_request(client_address, trimmed_qname) {
            warn!(error = %e, client = %client_address, "Skipping sinkhole check for invalid request");
            return Decision::Invalid;
        }

        match self.settings.mode {
            ResolverMode::LocalResolver => {
                self.decide_locally(message, qname, trimmed_qname, client_address)
            }
            ResolverMode::Oracle => {
                self.decide_with_oracle(message, qname, trimmed_qname, client_address)
                    .await
            }
        }
    }

    fn decide_locally(
        &self,
        message: &mut ResolvedMessage,
        qname: &str,
        trimmed_qname: &str,
        client_address: &str,
    ) -> Decision {
        let key = NameFingerprint::compute(trimmed_qname);

        if let Some(blocked) = self.policies.customlist.get(&key) {
            let decision = if blocked {
                debug!(qname = %qname, "Blocked by customlist");
                self.rewriter.rewrite(message, qname);
                Decision::SinkholedByCustomlist
            } else {
                debug!(qname = %qname, "Allowed by customlist");
                Decision::AllowedByCustomlist
            };
            self.spawn_probe(trimmed_qname, client_address);
            return decision;
        }

        if self.policies.whitelist.get(&key).is_some() {
            debug!(qname = %qname, "Whitelisted");
            return Decision::Whitelisted;
        }

        let decision = if self.policies.ioclist.get(&key) == Some(true) {
            debug!(qname = %qname, "Blocked by ioclist");
            self.rewriter.rewrite(message, qname);
            Decision::SinkholedByIoclist
        } else {
            Decision::Passed
        };

        self.spawn_probe(trimmed_qname, client_address);
        decision
    }

    async fn decide_with_oracle(
        &self,
        message: &mut ResolvedMessage,
        qname: &str,
        trimmed_qname: &str,
        client_address: &str,
    ) -> Decision {
        if self.breaker.state().is_open() {
            debug!("Oracle is disabled, scheduling probe");
            self.spawn_probe(trimmed_qname, client_address);
        }

        if self.settings.ip_checking {
            self.warm_answer_verdicts(message, trimmed_qname, client_address);
        }

        // Open breaker: `call` still honours cache hits, misses allow.
        let verdict = self
            .breaker
            .call(trimmed_qname, client_address, trimmed_qname)
            .await;

        if verdict.is_sink() {
            debug!(qname = %qname, client = %client_address, "Sinkholed by oracle verdict");
            self.rewriter.rewrite(message, qname);
            Decision::SinkholedByOracle
        } else {
            Decision::Passed
        }
    }

    /// Submits answer values to the oracle so their verdicts are cached.
    /// Never sinkholes; CNAME targets and addresses slip through here.
    fn warm_answer_verdicts(&self, message: &ResolvedMessage, trimmed_qname: &str, client_address: &str) {
        for value in candidate_answer_values(message) {
            let breaker = Arc::clone(&self.breaker);
            let value = trim_root_dot(value).to_string();
            let client = client_address.to_string();
            let qname = trimmed_qname.to_string();

            self.background.try_spawn("warm_answer_verdict", async move {
                breaker.call(&value, &client, &qname).await;
            });
        }
    }

    fn spawn_probe(&self, trimmed_qname: &str, client_address: &str) {
        let breaker = Arc::clone(&self.breaker);
        let qname = trimmed_qname.to_string();
        let client = client_address.to_string();

        self.background.try_spawn("oracle_probe", async move {
            breaker.probe(&qname, &client).await;
        });
    }
}

/// Values of A, AAAA and CNAME answers eligible for verdict warming:
/// root-server names and malformed values are left out.
pub fn candidate_answer_values(message: &ResolvedMessage) -> Vec<&str> {
    message
        .answers
        .iter()
        .filter_map(|record| record.typed_value())
        .filter(|value| !value.ends_with(ROOT_SERVERS_SUFFIX))
        .filter(|value| match validate_answer_value(value) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Answer value not submitted");
                false
            }
        })
        .collect()
}
