use super::mock_caches::{MockPolicyCache, MockVerdictCache};
use super::mock_oracle::MockOracleClient;
use bytes::Bytes;
use sinkhole_dns_application::ports::PolicyCaches;
use sinkhole_dns_application::services::{
    BackgroundTaskPool, BreakerSettings, BreakerState, CircuitBreakerClient, DecisionSettings,
    SinkholeDecisionEngine, SinkholeRewriter,
};
use sinkhole_dns_domain::{Query, ResolvedMessage, ResolverMode, ResourceRecord};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

pub const SINKHOLE_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 1, 1, 1));
pub const SINKHOLE_TTL: u32 = 5;
pub const FIT_RESPONSE_TIME: Duration = Duration::from_millis(500);
pub const COOLDOWN: Duration = Duration::from_millis(10_000);

pub fn breaker_settings(mode: ResolverMode) -> BreakerSettings {
    BreakerSettings {
        mode,
        fit_response_time: FIT_RESPONSE_TIME,
        cooldown: COOLDOWN,
    }
}

/// Everything a decision test needs, wired around mocks.
pub struct Harness {
    pub oracle: MockOracleClient,
    pub cache: Arc<MockVerdictCache>,
    pub state: Arc<BreakerState>,
    pub breaker: Arc<CircuitBreakerClient>,
    pub customlist: Arc<MockPolicyCache>,
    pub whitelist: Arc<MockPolicyCache>,
    pub ioclist: Arc<MockPolicyCache>,
    pub background: BackgroundTaskPool,
    pub engine: Arc<SinkholeDecisionEngine>,
}

pub struct HarnessOptions {
    pub mode: ResolverMode,
    pub oracle_disabled: bool,
    pub ip_checking: bool,
    pub pool_capacity: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            mode: ResolverMode::Oracle,
            oracle_disabled: false,
            ip_checking: false,
            pool_capacity: 16,
        }
    }
}

impl Harness {
    pub fn new(options: HarnessOptions) -> Self {
        let oracle = MockOracleClient::new();
        let cache = Arc::new(MockVerdictCache::new());
        let state = Arc::new(BreakerState::new());
        let breaker = Arc::new(CircuitBreakerClient::new(
            Arc::new(oracle.clone()),
            cache.clone(),
            state.clone(),
            breaker_settings(options.mode),
        ));

        let customlist = Arc::new(MockPolicyCache::new());
        let whitelist = Arc::new(MockPolicyCache::new());
        let ioclist = Arc::new(MockPolicyCache::new());
        let policies = PolicyCaches {
            customlist: customlist.clone(),
            whitelist: whitelist.clone(),
            ioclist: ioclist.clone(),
        };

        let background = BackgroundTaskPool::new(options.pool_capacity);
        let engine = Arc::new(SinkholeDecisionEngine::new(
            breaker.clone(),
            policies,
            SinkholeRewriter::new(SINKHOLE_TTL, SINKHOLE_ADDRESS),
            background.clone(),
            DecisionSettings {
                mode: options.mode,
                oracle_disabled: options.oracle_disabled,
                ip_checking: options.ip_checking,
            },
        ));

        Self {
            oracle,
            cache,
            state,
            breaker,
            customlist,
            whitelist,
            ioclist,
            background,
            engine,
        }
    }

    pub fn oracle_mode() -> Self {
        Self::new(HarnessOptions::default())
    }

    pub fn local_resolver_mode() -> Self {
        Self::new(HarnessOptions {
            mode: ResolverMode::LocalResolver,
            ..Default::default()
        })
    }

    /// Waits until every background task has finished.
    pub async fn drain_background(&self) {
        for _ in 0..200 {
            if self.background.in_flight() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

/// A NOERROR reply for `qname` with the given presentation-form answers.
pub fn resolved(qname: &str, client: &str, answers: &[&str]) -> ResolvedMessage {
    ResolvedMessage::new(
        Query::new(qname, client),
        0,
        answers.iter().map(|a| ResourceRecord::new(*a)).collect(),
        Bytes::new(),
    )
}

pub fn sinkhole_record(qname: &str) -> ResourceRecord {
    ResourceRecord::synthetic(qname, SINKHOLE_TTL, SINKHOLE_ADDRESS)
}
