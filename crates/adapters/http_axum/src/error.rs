//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sentra_domain::error::SentraError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SentraError`] to an HTTP response with appropriate status code.
pub struct ApiError(SentraError);

impl From<SentraError> for ApiError {
    fn from(err: SentraError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SentraError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SentraError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SentraError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
