//! HTTP error responses.
//!
//! Every failure leaves the service as `{"error": {"code", "message"}}` with
//! a status derived from the `DeskError` variant. Malformed bodies and path
//! parameters are rejected as `invalid_request`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deskpulse_shared::rpc::ErrorResponse;
use deskpulse_shared::DeskError;
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: DeskError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> &DeskError {
        &self.error
    }
}

impl From<DeskError> for ApiError {
    fn from(error: DeskError) -> Self {
        let status = StatusCode::from_u16(error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, error }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            error: DeskError::InvalidRequest(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: DeskError::InvalidRequest(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_client_error() {
            warn!("  Request rejected: {}", self.error);
        } else {
            error!("  Request failed: {}", self.error);
        }

        let body = ErrorResponse::new(self.error.code(), self.error.to_string());
        (self.status, Json(body)).into_response()
    }
}
