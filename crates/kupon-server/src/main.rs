//! Kupon indicator server entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kupon_engine::IndicatorEngineBuilder;
use kupon_ext_file::create_file_market_data;
use kupon_ext_iss::create_iss_market_data;
use kupon_server::{ProviderKind, Server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,kupon=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Kupon Indicator Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/kupon.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)
            .with_context(|| format!("cannot load {config_path}"))?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };
    let server_config = server_config.with_env_overrides();

    // Market data provider
    let market_data = match server_config.provider {
        ProviderKind::Iss => {
            info!("Using ISS at {}", server_config.iss.base_url);
            create_iss_market_data(server_config.iss.clone())?
        }
        ProviderKind::File => {
            let path = server_config
                .fixtures_file
                .as_deref()
                .context("provider = \"file\" requires fixtures_file")?;
            info!("Using fixtures from {}", path);
            create_file_market_data(path)?
        }
    };

    // Build engine
    let engine = IndicatorEngineBuilder::new()
        .with_config(server_config.engine.clone())
        .with_market_data(Arc::new(market_data))
        .build()?;

    // Start server
    let server = Server::new(server_config, Arc::new(engine));
    server.start().await?;

    info!("Server stopped");
    Ok(())
}
