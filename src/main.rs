//! weatherbot - MansionNet Weather Bot
//!
//! Sits in a few IRC channels and answers `!weather <city>` with current
//! conditions from Open-Meteo.

mod bot;
mod config;
mod error;
mod network;
mod telemetry;
mod weather;

use crate::bot::Dispatcher;
use crate::config::Config;
use crate::network::Lifecycle;
use crate::weather::OpenMeteo;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration: optional TOML path, otherwise compiled-in defaults
    let config = match std::env::args().nth(1) {
        Some(config_path) => Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?,
        None => {
            config::validate(&Config::default()).map_err(config::ConfigError::Invalid)?;
            Config::default()
        }
    };
    let config = Arc::new(config);

    info!(
        host = %config.server.host,
        port = config.server.port,
        tls = config.server.tls,
        nick = %config.identity.nickname,
        channels = ?config.channels,
        "Starting weatherbot"
    );
    if config.server.tls && !config.server.verify_cert {
        tracing::warn!("Server certificate verification is disabled");
    }

    let weather = OpenMeteo::new(&config.weather)?;
    let dispatcher = Dispatcher::new(Arc::new(weather));

    Lifecycle::new(config, dispatcher).run().await;
    Ok(())
}
