use super::breaker_state::{now_millis, BreakerState, ProbeClaim};
use crate::ports::{OracleClient, VerdictCache};
use sinkhole_dns_domain::validators::MAX_NAME_LEN;
use sinkhole_dns_domain::{Config, DomainError, RequestFingerprint, ResolverMode, Verdict};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct BreakerSettings {
    pub mode: ResolverMode,
    /// Oracle calls slower than this trip the breaker.
    pub fit_response_time: Duration,
    /// Minimum time between disablement and the next probe.
    pub cooldown: Duration,
}

impl BreakerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.sinkhole.mode,
            fit_response_time: Duration::from_millis(config.oracle.fit_response_time_ms),
            cooldown: Duration::from_millis(config.oracle.sleep_when_disabled_ms),
        }
    }
}

/// What a probe did; callers normally ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Armed,
    CoolingDown,
    StillOpen,
    Closed,
}

/// Oracle access gated by a two-state circuit breaker, with verdicts
/// memoized in the verdict cache.
///
/// Every failure path answers [`Verdict::Allow`]: an unhealthy oracle lets
/// traffic through rather than blocking resolution.
pub struct CircuitBreakerClient {
    oracle: Arc<dyn OracleClient>,
    cache: Arc<dyn VerdictCache>,
    state: Arc<BreakerState>,
    settings: BreakerSettings,
}

impl CircuitBreakerClient {
    pub fn new(
        oracle: Arc<dyn OracleClient>,
        cache: Arc<dyn VerdictCache>,
        state: Arc<BreakerState>,
        settings: BreakerSettings,
    ) -> Self {
        Self {
            oracle,
            cache,
            state,
            settings,
        }
    }

    pub fn state(&self) -> &Arc<BreakerState> {
        &self.state
    }

    /// Verdict for `query_value` (a hostname or an answer value) asked by
    /// `client_address` while resolving `trimmed_qname`.
    pub async fn call(&self, query_value: &str, client_address: &str, trimmed_qname: &str) -> Verdict {
        if query_value.len() > MAX_NAME_LEN {
            warn!(
                length = query_value.len(),
                client = %client_address,
                "Query value too long, not asking the oracle"
            );
            return Verdict::Allow;
        }

        let key = RequestFingerprint::compute(
            query_value,
            trimmed_qname,
            client_address,
            self.settings.mode,
        );

        if let Some(verdict) = self.cache.get(&key) {
            debug!(query = %query_value, fingerprint = %key, ?verdict, "Verdict cache hit");
            return verdict;
        }

        if self.state.is_open() {
            debug!(query = %query_value, "Oracle disabled, cache miss treated as allow");
            return Verdict::Allow;
        }

        let (result, elapsed) = self.timed_fetch(client_address, query_value, trimmed_qname).await;

        match result {
            Err(e) => {
                self.state.trip(now_millis());
                error!(error = %e, elapsed_ms = elapsed.as_millis() as u64, "Oracle was DISABLED");
                Verdict::Allow
            }
            Ok(_) if elapsed > self.settings.fit_response_time => {
                self.state.trip(now_millis());
                error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    fit_response_time_ms = self.settings.fit_response_time.as_millis() as u64,
                    "Oracle was DISABLED, response too slow"
                );
                Verdict::Allow
            }
            Ok(verdict) => {
                self.cache.set(key, verdict);
                debug!(query = %query_value, ?verdict, elapsed_ms = elapsed.as_millis() as u64, "Oracle verdict");
                verdict
            }
        }
    }

    /// Health probe. Issues one real request shaped like a hostname lookup
    /// once the cooldown has elapsed; its verdict is discarded.
    pub async fn probe(&self, trimmed_qname: &str, client_address: &str) -> ProbeOutcome {
        let cooldown_ms = self.settings.cooldown.as_millis() as i64;

        match self.state.claim_probe(now_millis(), cooldown_ms) {
            ProbeClaim::Armed => {
                debug!("Probe timestamp armed, waiting for cooldown");
                return ProbeOutcome::Armed;
            }
            ProbeClaim::CoolingDown => {
                debug!(cooldown_ms, "Not enough time passed since last probe");
                return ProbeOutcome::CoolingDown;
            }
            ProbeClaim::Claimed => {}
        }

        let (result, elapsed) = self.timed_fetch(client_address, trimmed_qname, trimmed_qname).await;
        let elapsed_ms = elapsed.as_millis() as u64;

        match result {
            Err(e) => {
                self.state.refresh(now_millis());
                warn!(error = %e, elapsed_ms, "Oracle remains DISABLED");
                ProbeOutcome::StillOpen
            }
            Ok(_) if elapsed > self.settings.fit_response_time => {
                self.state.refresh(now_millis());
                warn!(
                    elapsed_ms,
                    fit_response_time_ms = self.settings.fit_response_time.as_millis() as u64,
                    "Oracle remains DISABLED, probe too slow"
                );
                ProbeOutcome::StillOpen
            }
            Ok(_) => {
                if self.state.close() {
                    info!(elapsed_ms, "Oracle ENABLED again");
                }
                ProbeOutcome::Closed
            }
        }
    }

    async fn timed_fetch(
        &self,
        client_address: &str,
        query_value: &str,
        trimmed_qname: &str,
    ) -> (Result<Verdict, DomainError>, Duration) {
        let started = Instant::now();
        let result = self
            .oracle
            .fetch_verdict(client_address, query_value, trimmed_qname)
            .await;
        (result, started.elapsed())
    }
}
