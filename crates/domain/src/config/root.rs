use serde::{Deserialize, Serialize};

use super::background::BackgroundConfig;
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::oracle::OracleConfig;
use super::policy::PolicyConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;
use super::sinkhole::SinkholeConfig;

const LOCAL_CONFIG_PATH: &str = "sinkhole-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/sinkhole-dns/config.toml";

/// Main configuration structure for Sinkhole DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub sinkhole: SinkholeConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub background: BackgroundConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sinkhole-dns.toml in current directory
    /// 3. /etc/sinkhole-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if !self.oracle.disabled && self.oracle.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "oracle.url is required unless oracle.disabled is set".to_string(),
            ));
        }

        if self.resolver.stagger_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "resolver.stagger_interval_ms cannot be 0".to_string(),
            ));
        }

        if self.resolver.exchange_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "resolver.exchange_timeout_secs cannot be 0".to_string(),
            ));
        }

        if self.resolver.use_backend_exclusively && self.resolver.backend_resolvers.is_empty() {
            return Err(ConfigError::Validation(
                "use_backend_exclusively is set but backend_resolvers is empty".to_string(),
            ));
        }

        if self.sinkhole.parsed_address().is_none() {
            return Err(ConfigError::Validation(format!(
                "sinkhole.address '{}' is not an IP address",
                self.sinkhole.address
            )));
        }

        if self.background.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "background.max_in_flight cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|candidate| std::path::Path::new(candidate).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
