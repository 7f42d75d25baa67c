//! patient-server library crate
//!
//! Exposes `build_app`, `config` and the Postgres store for integration tests.
//! The actual binary entrypoint is in `main.rs`.

pub mod config;
pub mod db;
mod error;
mod middleware;
mod routes;

use std::sync::OnceLock;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use patient_core::SharedStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;

pub use middleware::REQUEST_ID_HEADER;

/// Handle of the process-wide Prometheus recorder.
///
/// The recorder is installed on first use; every app built afterwards (one per
/// integration test) renders from that same recorder.
fn prometheus_handle() -> &'static PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if metrics::set_global_recorder(recorder).is_err() {
            tracing::warn!("Another metrics recorder is already installed");
        }
        handle
    })
}

/// Build the full application router with all routes and middleware.
///
/// The store is injected here and held as router state for the lifetime of
/// the app. Extracted from `main()` so integration tests can construct the
/// app without binding to a TCP port.
pub fn build_app(store: SharedStore, config: &Config) -> Router {
    let mut patient_routes = routes::patient_routes()
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware));
    match middleware::create_rate_limiter(config.rate_limit_rps) {
        Some(limiter) => patient_routes = patient_routes.layer(Extension(limiter)),
        None => tracing::warn!("Rate limiting disabled (RATE_LIMIT_RPS=0)"),
    }

    let prometheus_handle = prometheus_handle().clone();

    let public_routes = Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(public_routes)
        .merge(patient_routes)
        .with_state(store)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
