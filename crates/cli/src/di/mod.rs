use anyhow::Context;
use sinkhole_dns_application::services::{
    BackgroundTaskPool, BreakerSettings, BreakerState, CircuitBreakerClient, DecisionSettings,
    NameserverRacer, RacerSettings, SinkholeDecisionEngine, SinkholeRewriter,
};
use sinkhole_dns_domain::Config;
use sinkhole_dns_infrastructure::cache::{build_policy_caches, InMemoryVerdictCache};
use sinkhole_dns_infrastructure::dns::{
    exchange_timeout, resolve_nameservers, DnsRequestHandler, NetworkExchanger,
    SystemResolverConfig,
};
use sinkhole_dns_infrastructure::oracle::HttpOracleClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Process-wide wiring: one breaker, one verdict cache and one racer
/// shared by every listener task.
pub struct Services {
    pub handler: Arc<DnsRequestHandler>,
}

impl Services {
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let system = load_system_resolver(config);

        let nameservers = resolve_nameservers(&config.resolver, system.as_ref());
        if nameservers.is_empty() {
            anyhow::bail!("No upstream nameservers configured");
        }
        let timeout = exchange_timeout(&config.resolver, system.as_ref());

        let rewriter = SinkholeRewriter::from_config(config)
            .context("Invalid sinkhole address")?;

        let oracle = Arc::new(HttpOracleClient::new(&config.oracle)?);
        let breaker = Arc::new(CircuitBreakerClient::new(
            oracle,
            Arc::new(InMemoryVerdictCache::from_config(config)),
            Arc::new(BreakerState::new()),
            BreakerSettings::from_config(config),
        ));

        let engine = Arc::new(SinkholeDecisionEngine::new(
            breaker,
            build_policy_caches(&config.policy),
            rewriter,
            BackgroundTaskPool::new(config.background.max_in_flight),
            DecisionSettings::from_config(config),
        ));

        info!(
            servers = ?nameservers,
            timeout_secs = timeout.as_secs(),
            "Upstream nameservers"
        );

        let racer = Arc::new(NameserverRacer::new(
            Arc::new(NetworkExchanger::new()),
            nameservers,
            engine,
            RacerSettings {
                stagger_interval: Duration::from_millis(config.resolver.stagger_interval_ms),
                exchange_timeout: timeout,
            },
        ));

        Ok(Self {
            handler: Arc::new(DnsRequestHandler::new(racer)),
        })
    }
}

fn load_system_resolver(config: &Config) -> Option<SystemResolverConfig> {
    match SystemResolverConfig::from_file(&config.resolver.resolv_conf) {
        Ok(system) => Some(system),
        Err(e) if config.resolver.use_backend_exclusively => {
            info!(error = %e, "System resolver config not read, using backend resolvers");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to read system resolver config");
            None
        }
    }
}
