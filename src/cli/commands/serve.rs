use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgUserStore};
use crate::state::AppState;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    // Unreachable store at startup is fatal
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(config, Arc::new(PgUserStore::new(pool.clone())));
    if !state.auth.is_configured() {
        tracing::warn!("AUTH_USER / AUTH_PASS not set; every protected request will be rejected");
    }

    let bind_addr = format!("0.0.0.0:{}", state.config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        "User Records API listening on http://{} (users under {}/users)",
        bind_addr,
        state.config.server.path_prefix
    );

    axum::serve(listener, crate::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(pool).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
