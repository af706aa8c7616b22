mod bootstrap;
mod catalog;
mod health;
mod respond;
mod sales;

use anyhow::Result;
use axum::Router;
use bazar_core::config::{AppConfig, LoadOptions};
use bazar_db::DbPool;
use tower_http::cors::CorsLayer;

fn init_logging(config: &AppConfig) {
    use bazar_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

/// The full API surface. The storefront consumes this cross-origin, so the
/// whole router sits behind a permissive CORS layer.
pub fn router(db_pool: DbPool) -> Router {
    Router::new()
        .merge(catalog::router(db_pool.clone()))
        .merge(sales::router(db_pool.clone()))
        .merge(health::router(db_pool))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations.
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        bind_address = %address,
        "bazar server listening"
    );

    axum::serve(listener, router(app.db_pool.clone()))
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    tracing::info!(event_name = "system.server.stopping", "bazar server stopping");

    Ok(())
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
