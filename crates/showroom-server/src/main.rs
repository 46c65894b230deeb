//! Showroom Server - Main entry point

use anyhow::Result;
use showroom_common::logging::{init_logging, LogConfig};
use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, sync::Notify};
use tracing::info;

use showroom_server::{
    api::{self, AppState},
    config::Config,
    db::Store,
    notify,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("showroom-server".to_string())
        .filter_directives("showroom_server=debug,tower_http=debug,sqlx=info".to_string())
        .build();

    // Environment variables take precedence
    let log_config = LogConfig::from_env_with(log_config)?;

    init_logging(&log_config)?;

    info!("Starting Showroom Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let store = Store::open(&config.database).await?;
    info!(backend = store.backend(), "Store initialized");

    let notifier = notify::from_config(&config)?;
    info!(backend = notifier.name(), "Notifier initialized");

    let app = api::create_router(
        AppState {
            store: store.clone(),
            notifier,
        },
        &config,
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    let shutdown = Arc::new(Notify::new());
    let signalled = shutdown.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        signalled.notify_one();
    });

    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    tokio::select! {
        result = server.into_future() => result?,
        _ = async {
            shutdown.notified().await;
            info!("Waiting up to {} seconds for connections to close", timeout.as_secs());
            tokio::time::sleep(timeout).await;
        } => {
            tracing::warn!("Shutdown timeout reached, dropping remaining connections");
        },
    }

    store.close().await;
    info!("Server shut down gracefully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
