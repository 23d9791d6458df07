pub mod policy_cache;
pub mod verdict_cache;

pub use policy_cache::{build_policy_caches, InMemoryPolicyCache};
pub use verdict_cache::InMemoryVerdictCache;
