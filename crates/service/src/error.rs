//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cache::CacheError;
use crate::db::RepositoryError;
use crate::resolver::ResolutionError;

/// Application-level error type for the resolution service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identity resolution failed.
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Cache operation failed.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error is a system fault rather than a business rejection.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Cache(_) => true,
            Self::Resolution(err) => matches!(
                err,
                ResolutionError::BeaconLookup(_)
                    | ResolutionError::CustomerLookup(_)
                    | ResolutionError::CustomerPersist(_)
                    | ResolutionError::Customer(_)
            ),
            Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Resolution(err) => match err {
                ResolutionError::InvalidReading(_) => StatusCode::BAD_REQUEST,
                ResolutionError::BeaconNotFound { .. } => StatusCode::NOT_FOUND,
                // Legitimate business rejections, not system faults
                ResolutionError::BeaconNotActive { .. } | ResolutionError::Identity(_) => {
                    StatusCode::CONFLICT
                }
                ResolutionError::LowConfidence { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ResolutionError::BeaconLookup(_)
                | ResolutionError::CustomerLookup(_)
                | ResolutionError::CustomerPersist(_)
                | ResolutionError::Customer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
