//! Ferrobank API
//!
//! HTTP server for the Ferrobank banking back-end: accounts and
//! authentication, money movement, loan issuance, per-account reports, and
//! the scheduled loan-interest recalculation job.

mod config;
mod database;
mod error;
mod jobs;
mod middleware;
mod models;
mod routes;
mod services;
mod state;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;
use crate::database::initialize_database;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    tracing::info!("Starting Ferrobank API");

    let pool = initialize_database(&config.database).await?;
    tracing::info!("Database initialized successfully");

    let state = Arc::new(AppState::new(pool, &config));

    // Interest recalculation runs once at startup, then on a fixed interval.
    let sweep_state = state.clone();
    let sweep_interval = config.interest_sweep_interval;
    tokio::spawn(async move {
        jobs::interest::run_scheduler(sweep_state, sweep_interval).await;
    });

    let app = routes::create_router(state, &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("HTTP server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
    }

    tracing::info!("Ferrobank API shutdown complete");
    Ok(())
}
