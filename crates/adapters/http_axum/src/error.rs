//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use presencehub_domain::error::{NotFoundError, PresenceHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PresenceHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PresenceHubError);

impl From<PresenceHubError> for ApiError {
    fn from(err: PresenceHubError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<NotFoundError> for ApiError {
    fn from(err: NotFoundError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PresenceHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PresenceHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PresenceHubError::Serialization(err) => {
                tracing::error!(error = %err, "serialization error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            PresenceHubError::Storage(err) | PresenceHubError::Delivery(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
