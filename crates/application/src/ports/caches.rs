use sinkhole_dns_domain::{NameFingerprint, RequestFingerprint, Verdict};
use std::sync::Arc;

/// Memoized oracle verdicts.
///
/// Implementations must be safe for concurrent get/set from any task; each
/// operation is individually atomic, no cross-key consistency is expected.
pub trait VerdictCache: Send + Sync {
    fn get(&self, key: &RequestFingerprint) -> Option<Verdict>;

    fn set(&self, key: RequestFingerprint, verdict: Verdict);
}

/// A local policy list. Presence of a key is meaningful on its own; the
/// stored flag is the "blocked" bit.
pub trait PolicyCache: Send + Sync {
    fn get(&self, key: &NameFingerprint) -> Option<bool>;
}

/// The three local lists consulted in local-resolver mode, in lookup order.
#[derive(Clone)]
pub struct PolicyCaches {
    pub customlist: Arc<dyn PolicyCache>,
    pub whitelist: Arc<dyn PolicyCache>,
    pub ioclist: Arc<dyn PolicyCache>,
}
