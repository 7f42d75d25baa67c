pub mod health;
pub mod metrics;
mod patient;

use axum::{Router, routing::get};
use patient_core::SharedStore;

/// Route table for the patient resource
pub fn patient_routes() -> Router<SharedStore> {
    Router::new()
        .route("/patients", get(patient::list).post(patient::create))
        .route(
            "/patients/{id}",
            get(patient::read)
                .put(patient::update)
                .delete(patient::delete),
        )
}
