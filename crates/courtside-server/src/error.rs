//! HTTP mapping of pipeline errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courtside_core::{CourtsideError, ErrorKind};
use serde::Serialize;

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

/// Error wrapper turning a [`CourtsideError`] into a response
#[derive(Debug)]
pub struct ApiError(pub CourtsideError);

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self(CourtsideError::InvalidInput(message.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::IntentParse => StatusCode::BAD_GATEWAY,
            ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CourtsideError> for ApiError {
    fn from(err: CourtsideError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("Request failed ({}): {}", status.as_u16(), self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self.0);
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (CourtsideError::IntentParse("x".into()), StatusCode::BAD_GATEWAY),
            (
                CourtsideError::UpstreamUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (CourtsideError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (CourtsideError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                CourtsideError::Config("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status_code(), status);
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::invalid_input("No message provided").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
