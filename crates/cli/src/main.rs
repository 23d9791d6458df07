//! # Sinkhole DNS
//!
//! Resolving DNS proxy that races upstream nameservers and sinkholes
//! names flagged by a remote verdict oracle or local lists.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use sinkhole_dns_domain::CliOverrides;
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[derive(Parser)]
#[command(name = "sinkhole-dns")]
#[command(version)]
#[command(about = "Resolving DNS proxy with oracle-driven sinkholing")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_config_summary(&config, cli.config.as_deref());

    let services = di::Services::build(&config)?;

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let bind_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let dns_server = tokio::spawn(server::start_dns_server(bind_addr, services.handler));

    tokio::select! {
        result = dns_server => result??,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
