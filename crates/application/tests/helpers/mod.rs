#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mock_caches;
pub mod mock_exchanger;
pub mod mock_oracle;

pub use builders::*;
pub use mock_caches::{MockPolicyCache, MockVerdictCache};
pub use mock_exchanger::{MockExchanger, MockReply};
pub use mock_oracle::MockOracleClient;
