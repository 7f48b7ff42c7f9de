//! Artjam API: error types.

use artjam_core::error::DomainError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            DomainError::NotActive => (StatusCode::CONFLICT, "not_active"),
            DomainError::AlreadyActive => (StatusCode::CONFLICT, "already_active"),
            DomainError::MissingTopic => (StatusCode::CONFLICT, "missing_topic"),
            DomainError::MissingTimeLimit => (StatusCode::CONFLICT, "missing_time_limit"),
            DomainError::NotAParticipant => (StatusCode::FORBIDDEN, "not_a_participant"),
            DomainError::PublicationFailure { .. } => {
                (StatusCode::BAD_GATEWAY, "publication_failure")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        assert_eq!(
            status_of(DomainError::InvalidInput("bad minutes".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_lifecycle_conflicts_map_to_409() {
        for err in [
            DomainError::NotActive,
            DomainError::AlreadyActive,
            DomainError::MissingTopic,
            DomainError::MissingTimeLimit,
        ] {
            assert_eq!(status_of(err), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_not_a_participant_maps_to_403() {
        assert_eq!(
            status_of(DomainError::NotAParticipant),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_publication_failure_maps_to_502() {
        assert_eq!(
            status_of(DomainError::PublicationFailure {
                destination: "gallery-submissions".into(),
                reason: "timeout".into(),
            }),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_io_error_converts_to_server_error() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");

        let err = AppError::from(io);

        assert!(matches!(err, AppError::Server(_)));
        assert_eq!(err.to_string(), "server error: address in use");
    }
}
