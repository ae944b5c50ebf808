//! JSON error responses for the API surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use toxtriage_common::error::ToxtriageError;

/// Error wrapper every API handler returns. Renders as
/// `{ "error": "<message>" }` with an appropriate status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self { status: StatusCode::SERVICE_UNAVAILABLE, message: message.into() }
    }
}

impl From<ToxtriageError> for ApiError {
    fn from(e: ToxtriageError) -> Self {
        let status = match &e {
            // Upstream model or classifier misbehaved
            ToxtriageError::Http(_)
            | ToxtriageError::Backend(_)
            | ToxtriageError::Validation(_)
            | ToxtriageError::Pipeline(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(status = %self.status, message = %self.message, "API error");
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let api: ApiError = ToxtriageError::Backend("connection refused".to_string()).into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);

        let api: ApiError = ToxtriageError::Validation("score 1.5 outside [0, 1]".to_string()).into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_config_errors_are_internal() {
        let api: ApiError = ToxtriageError::Config("bad toml".to_string()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
