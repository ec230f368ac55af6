//! A small HTTP service that keeps a bounded, most-recent-first list of log entries in a blob
//! store.
//!
//! `GET /` returns the list (seeding four sample entries on first use), `POST /` appends an entry
//! whose name and location are either supplied by the caller (with a valid email) or picked at
//! random from fixed tables. The list never holds more than [`log::MAX_ENTRIES`] entries.

use color_eyre::Result;
use tokio::{
    net::TcpListener,
    signal,
};

pub mod config;
pub mod entry;
pub mod error;
pub mod log;
pub mod request;
pub mod routes;
pub mod service;
pub mod store;
pub mod tables;

use config::Config;
use service::LogService;

/// Binds the listener and serves until Ctrl-C or SIGTERM
pub async fn run_server(config: Config) -> Result<()> {
    let store = store::from_config(&config);
    let app = routes::router(LogService::new(store), config.request_timeout);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
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
}
