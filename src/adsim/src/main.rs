//! AdSim: deterministic mock ad-platform reporting API.
//!
//! Main entry point that loads configuration and starts the server.

use adsim_api::{shutdown_signal, ApiServer};
use adsim_cache::StructureCache;
use adsim_core::config::AppConfig;
use adsim_generator::all_accounts;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "adsim")]
#[command(about = "Deterministic mock ad-platform reporting API")]
#[command(version)]
struct Cli {
    /// Bind address (overrides config)
    #[arg(long, env = "ADSIM__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ADSIM__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Prometheus exporter port (overrides config)
    #[arg(long, env = "ADSIM__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Do not start the Prometheus exporter
    #[arg(long, default_value_t = false)]
    no_metrics: bool,

    /// Generate every account hierarchy before accepting traffic
    #[arg(long, default_value_t = false)]
    warm_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adsim=info,adsim_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("AdSim starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }
    if cli.no_metrics {
        config.metrics.enabled = false;
    }

    info!(
        environment = %config.environment,
        host = %config.api.host,
        http_port = config.api.http_port,
        metrics_enabled = config.metrics.enabled,
        metrics_port = config.metrics.port,
        default_page_size = config.reports.default_page_size,
        "Configuration loaded"
    );

    let cache = Arc::new(StructureCache::new());
    if cli.warm_cache {
        for account in all_accounts() {
            cache.get_or_generate(account.id);
        }
        info!(accounts = cache.len(), "Structure cache warmed");
    }

    let api_server = ApiServer::with_cache(config.clone(), cache);

    // Start metrics exporter
    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics() {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("AdSim is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http(shutdown_signal()).await?;

    info!("AdSim shut down cleanly");
    Ok(())
}
