//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use patient_core::{IssueCode, Outcome, StoreError};

/// Error returned by request handlers.
///
/// Handlers forward store errors with `?`; this is the one place they are
/// turned into HTTP statuses.
#[derive(Debug)]
pub struct AppError(pub StoreError);

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match self.0 {
            err @ StoreError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Outcome::not_found(err.to_string()))
            }
            err @ StoreError::Invalid(_) => {
                (StatusCode::BAD_REQUEST, Outcome::invalid(err.to_string()))
            }
            err @ StoreError::Conflict(_) => {
                (StatusCode::CONFLICT, Outcome::conflict(err.to_string()))
            }
            StoreError::Backend(msg) => {
                tracing::error!(error = %msg, "Store backend failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Outcome::error(IssueCode::Exception, "Internal storage error"),
                )
            }
        };

        (status, Json(outcome)).into_response()
    }
}
