use sinkhole_dns_application::ports::{PolicyCache, VerdictCache};
use sinkhole_dns_domain::{NameFingerprint, RequestFingerprint, Verdict};
use std::collections::HashMap;
use std::sync::RwLock;

// ============================================================================
// Mock VerdictCache
// ============================================================================

#[derive(Default)]
pub struct MockVerdictCache {
    entries: RwLock<HashMap<RequestFingerprint, Verdict>>,
}

impl MockVerdictCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: RequestFingerprint, verdict: Verdict) {
        self.entries.write().unwrap().insert(key, verdict);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VerdictCache for MockVerdictCache {
    fn get(&self, key: &RequestFingerprint) -> Option<Verdict> {
        self.entries.read().unwrap().get(key).copied()
    }

    fn set(&self, key: RequestFingerprint, verdict: Verdict) {
        self.entries.write().unwrap().insert(key, verdict);
    }
}

// ============================================================================
// Mock PolicyCache
// ============================================================================

#[derive(Default)]
pub struct MockPolicyCache {
    entries: RwLock<HashMap<NameFingerprint, bool>>,
}

impl MockPolicyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys are trimmed qnames; they are fingerprinted on insert.
    pub fn with_entries(entries: &[(&str, bool)]) -> Self {
        let cache = Self::new();
        for (name, flag) in entries {
            cache.insert(name, *flag);
        }
        cache
    }

    pub fn insert(&self, trimmed_qname: &str, flag: bool) {
        self.entries
            .write()
            .unwrap()
            .insert(NameFingerprint::compute(trimmed_qname), flag);
    }
}

impl PolicyCache for MockPolicyCache {
    fn get(&self, key: &NameFingerprint) -> Option<bool> {
        self.entries.read().unwrap().get(key).copied()
    }
}
