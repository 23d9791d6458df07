use sinkhole_dns_domain::{CliOverrides, Config};
use tracing::{info, warn};

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config_summary(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        mode = ?config.sinkhole.mode,
        oracle_url = %config.oracle.url,
        stagger_ms = config.resolver.stagger_interval_ms,
        "Configuration loaded"
    );

    if config.oracle.disabled {
        warn!("Sinkhole processing is disabled, answers are passed through untouched");
    }
}
