//! # tagboard
//!
//! The entry point that assembles the application from its adapters.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::web::{router, AppState};
use configs::{LogFormat, LogSettings, Settings};
use secrecy::ExposeSecret;
use services::{BoardService, UserService};
use storage_adapters::sqlite::{self, SqliteBoardRepo, SqliteTagRepo, SqliteUserRepo};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.log);

    // 1. Initialize the store and apply migrations
    let pool = sqlite::connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("failed to initialize database")?;

    // 2. Wire repositories into the services
    let users = Arc::new(SqliteUserRepo::new(pool.clone()));
    let state = AppState::new(
        UserService::new(users.clone()),
        BoardService::new(
            users,
            Arc::new(SqliteBoardRepo::new(pool.clone())),
            Arc::new(SqliteTagRepo::new(pool.clone())),
        ),
    );

    // 3. Serve until ctrl-c
    let addr = (settings.server.host.as_str(), settings.server.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}:{}", addr.0, addr.1))?;
    tracing::info!(address = %listener.local_addr()?, "tagboard listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down cleanly");
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
