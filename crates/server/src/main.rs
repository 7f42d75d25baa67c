//! patient-server: Patient CRUD HTTP server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patient_core::{MemoryStore, SharedStore};
use patient_server::config::Config;
use patient_server::db::{PgPatientStore, create_pool};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = Config::from_env();

    // Pick the patient store
    let store: SharedStore = match config.database_url.as_deref() {
        Some(url) => {
            let store = PgPatientStore::new(create_pool(url).await?);
            store.ensure_schema().await?;
            tracing::info!("Using Postgres patient store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, patients are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    let app = patient_server::build_app(store, &config);

    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Starting patient server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
