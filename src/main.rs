//! Cash card service binary
//!
//! Usage: `cashcard [CONFIG.yaml]`
//!
//! The configuration path is taken from the first argument, then from
//! `CASHCARD_CONFIG`. Without either the built-in demo configuration is used.
//! `CASHCARD_BIND` overrides `server.bind`.

use anyhow::{Context, Result};
use cashcard::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cashcard=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CASHCARD_CONFIG").ok());

    let mut config = match config_path {
        Some(path) => {
            tracing::info!(%path, "loading configuration");
            AppConfig::from_yaml_file(&path)
                .with_context(|| format!("failed to load configuration from {}", path))?
        }
        None => {
            tracing::info!("no configuration given, using demo configuration");
            AppConfig::default_config()
        }
    };

    if let Ok(bind) = std::env::var("CASHCARD_BIND") {
        config.server.bind = bind;
    }

    tracing::info!(
        users = config.users.len(),
        cards = config.cards.len(),
        policy = ?config.access.resource_policy,
        "configuration ready"
    );

    ServerBuilder::from_config(&config)
        .context("invalid configuration")?
        .serve(&config.server.bind)
        .await
}
