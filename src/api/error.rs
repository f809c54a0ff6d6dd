//! HTTP error mapping.

use crate::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// A crate error surfaced as an HTTP response.
///
/// Bodies are shaped `{"detail": "<message>"}`. The status code follows the
/// error taxonomy: validation failures are 422, missing entities and missing
/// references are 404, disallowed query parameters are 400, and storage
/// failures are 500.
#[derive(Debug)]
pub struct ApiError(Error);

impl ApiError {
    /// Wraps a rejection or message as a validation error (422).
    pub fn validation(message: impl Into<String>) -> Self {
        Self(Error::Validation(message.into()))
    }

    /// Returns the HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::UnsupportedQueryParameters => StatusCode::BAD_REQUEST,
            Error::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
