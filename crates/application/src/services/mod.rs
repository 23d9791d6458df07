pub mod background_pool;
pub mod breaker_state;
pub mod circuit_breaker;
pub mod decision_engine;
pub mod nameserver_racer;
pub mod sinkhole_rewriter;

pub use background_pool::BackgroundTaskPool;
pub use breaker_state::{now_millis, BreakerState, ProbeClaim};
pub use circuit_breaker::{BreakerSettings, CircuitBreakerClient, ProbeOutcome};
pub use decision_engine::{candidate_answer_values, Decision, DecisionSettings, SinkholeDecisionEngine};
pub use nameserver_racer::{NameserverRacer, RacerSettings};
pub use sinkhole_rewriter::SinkholeRewriter;
