//! Catalogue Reference Finder Server
//!
//! Upload a PDF catalogue once, then look up references and get back the
//! page they first appear on, rendered as an image.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogue_server::config::Config;
use catalogue_server::formats::pdf::PdfDocumentHandler;
use catalogue_server::routes;
use catalogue_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG from it applies
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "catalogue_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Catalogue Reference Finder v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Upload limit: {} MiB, parse timeout: {:?}, render timeout: {:?}",
        config.catalogue.max_upload_bytes / (1024 * 1024),
        config.catalogue.parse_timeout,
        config.catalogue.render_timeout
    );

    let app_state = AppState::new(config.clone(), Arc::new(PdfDocumentHandler::new()));
    let app = routes::app_router(app_state);

    // Serve until a shutdown signal arrives
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Catalogue server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, draining connections");
        },
        _ = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        },
    }
}
