//! Payroll engine HTTP server.
//!
//! Environment:
//! - `PAYROLL_CONFIG_DIR`: tax table directory (default `./config/mx2024`)
//! - `PAYROLL_BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `PAYROLL_HISTORY_FILE`: JSON file for calculation history; history is
//!   kept in memory when unset
//! - `RUST_LOG`: log filter (default `info`)

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;
use payroll_engine::history::HistoryStore;

const DEFAULT_CONFIG_DIR: &str = "./config/mx2024";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("failed to load tax tables from {}", config_dir))?;

    let history = match std::env::var("PAYROLL_HISTORY_FILE") {
        Ok(path) => HistoryStore::open(&path)
            .with_context(|| format!("failed to open history file {}", path))?,
        Err(_) => HistoryStore::in_memory(),
    };

    let app = create_router(AppState::new(config, history));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Payroll engine listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
