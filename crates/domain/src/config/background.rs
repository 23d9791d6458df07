use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackgroundConfig {
    /// Upper bound on concurrent probe and warming tasks
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_max_in_flight() -> usize {
    256
}
