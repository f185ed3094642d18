use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quote_engine::api::{AppState, create_router};
use quote_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/cleaning_services";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quote_engine=info,warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config_dir =
        env::var("QUOTE_ENGINE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("QUOTE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading award configuration from {}", config_dir))?;

    tracing::info!(
        award = %config.award().code,
        config_dir = %config_dir,
        server_addr = %addr,
        "Starting quote engine"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
