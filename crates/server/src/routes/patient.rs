//! Patient resource HTTP handlers
//!
//! Each handler forwards to exactly one `PatientStore` call. Store errors go
//! back out with `?` and are mapped to statuses by `AppError`.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use patient_core::{Patient, SharedStore};
use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;

/// GET /patients - List every patient in store order
pub async fn list(State(store): State<SharedStore>) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = store.list().await?;
    tracing::debug!(count = patients.len(), "Listed patients");
    Ok(Json(patients))
}

/// GET /patients/{id} - Read a patient
pub async fn read(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    Ok(Json(store.get(&id).await?))
}

/// POST /patients - Create a new patient
pub async fn create(
    State(store): State<SharedStore>,
    Json(patient): Json<Patient>,
) -> Result<impl IntoResponse, AppError> {
    let saved = store.save(patient).await?;

    let mut headers = HeaderMap::new();
    if let Some(location) = saved.id().and_then(location_for) {
        headers.insert(header::LOCATION, location);
    }
    tracing::info!(patient_id = saved.id().unwrap_or_default(), "Patient created");

    Ok((StatusCode::CREATED, headers, Json(saved)))
}

/// `Location` value for a saved patient, with the id as one encoded segment
fn location_for(id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("/patients/{}", urlencoding::encode(id))).ok()
}

/// PUT /patients/{id} - Save a patient under the path id
///
/// Any `id` in the body is discarded whatever its JSON type; the path decides
/// which record is written.
pub async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(mut body): Json<Map<String, JsonValue>>,
) -> Result<Json<Patient>, AppError> {
    body.remove("id");
    let patient = Patient::from_fields(body).with_id(id);
    Ok(Json(store.save(patient).await?))
}

/// DELETE /patients/{id} - Delete a patient
pub async fn delete(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete(&id).await?;
    tracing::info!(patient_id = %id, "Patient deleted");
    Ok(StatusCode::NO_CONTENT)
}
