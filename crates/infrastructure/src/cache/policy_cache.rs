use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sinkhole_dns_application::ports::{PolicyCache, PolicyCaches};
use sinkhole_dns_domain::config::PolicyConfig;
use sinkhole_dns_domain::dns_query::trim_root_dot;
use sinkhole_dns_domain::NameFingerprint;
use std::sync::Arc;
use tracing::info;

/// A policy list keyed by the md5 fingerprint of the trimmed name.
#[derive(Default)]
pub struct InMemoryPolicyCache {
    inner: DashMap<NameFingerprint, bool, FxBuildHasher>,
}

impl InMemoryPolicyCache {
    pub fn new() -> Self {
        Self {
            inner: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Names are matched as written, minus a trailing root dot.
    pub fn insert(&self, name: &str, flag: bool) {
        self.inner
            .insert(NameFingerprint::compute(trim_root_dot(name.trim())), flag);
    }

    pub fn extend<'a>(&self, names: impl IntoIterator<Item = &'a String>, flag: bool) {
        for name in names {
            if !name.trim().is_empty() {
                self.insert(name, flag);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl PolicyCache for InMemoryPolicyCache {
    fn get(&self, key: &NameFingerprint) -> Option<bool> {
        self.inner.get(key).map(|entry| *entry)
    }
}

/// Seeds customlist (blocked = true, allowed = false), whitelist and
/// ioclist from configuration.
pub fn build_policy_caches(config: &PolicyConfig) -> PolicyCaches {
    let customlist = InMemoryPolicyCache::new();
    customlist.extend(&config.customlist_allowed, false);
    customlist.extend(&config.customlist_blocked, true);

    let whitelist = InMemoryPolicyCache::new();
    whitelist.extend(&config.whitelist, true);

    let ioclist = InMemoryPolicyCache::new();
    ioclist.extend(&config.ioclist, true);

    info!(
        customlist = customlist.len(),
        whitelist = whitelist.len(),
        ioclist = ioclist.len(),
        "Policy lists loaded"
    );

    PolicyCaches {
        customlist: Arc::new(customlist),
        whitelist: Arc::new(whitelist),
        ioclist: Arc::new(ioclist),
    }
}
