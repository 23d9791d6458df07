use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sinkhole_dns_application::ports::VerdictCache;
use sinkhole_dns_domain::{Config, RequestFingerprint, Verdict};
use std::time::{Duration, Instant};
use tracing::debug;

/// Shared verdict cache.
///
/// Entries expire after `ttl` when one is set. At capacity, expired entries
/// are purged first; if the map is still full the new verdict is not stored.
pub struct InMemoryVerdictCache {
    inner: DashMap<RequestFingerprint, (Verdict, Instant), FxBuildHasher>,
    ttl: Option<Duration>,
    max_entries: usize,
}

impl InMemoryVerdictCache {
    pub fn new(ttl: Option<Duration>, max_entries: usize) -> Self {
        Self {
            inner: DashMap::with_hasher(FxBuildHasher),
            ttl,
            max_entries,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.cache.verdict_ttl_secs.map(Duration::from_secs),
            config.cache.verdict_max_entries,
        )
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn is_expired(&self, inserted_at: Instant) -> bool {
        self.ttl.is_some_and(|ttl| inserted_at.elapsed() >= ttl)
    }

    fn purge_expired(&self) {
        if self.ttl.is_some() {
            self.inner
                .retain(|_, (_, inserted_at)| !self.is_expired(*inserted_at));
        }
    }
}

impl VerdictCache for InMemoryVerdictCache {
    fn get(&self, key: &RequestFingerprint) -> Option<Verdict> {
        let entry = self.inner.get(key)?;
        let (verdict, inserted_at) = *entry;
        if !self.is_expired(inserted_at) {
            return Some(verdict);
        }
        // Drop the read guard before removing
        drop(entry);
        self.inner.remove(key);
        None
    }

    fn set(&self, key: RequestFingerprint, verdict: Verdict) {
        if self.inner.len() >= self.max_entries && !self.inner.contains_key(&key) {
            self.purge_expired();
            if self.inner.len() >= self.max_entries {
                debug!(
                    max_entries = self.max_entries,
                    "Verdict cache full, not storing"
                );
                return;
            }
        }
        self.inner.insert(key, (verdict, Instant::now()));
    }
}
