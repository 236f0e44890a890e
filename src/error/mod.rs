//! Error handling module.
//!
//! This module provides unified error handling with HTTP status code mapping.
//! Response bodies keep the shapes clients already depend on:
//! `{"error": "..."}` for missing entities and `{"errors": [...]}` for
//! rejected input.

pub mod codes;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::EntityKind;

pub use codes::ErrorCode;

/// Message returned for every rejected request body.
pub const VALIDATION_MESSAGE: &str = "validation errors";

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Entity not found.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// Request body is not a JSON object of the expected shape.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// A field value was missing or invalid.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("Invalid reference: {kind} {id} does not exist")]
    InvalidReference {
        /// Kind of the referenced entity.
        kind: EntityKind,
        /// The dangling identifier.
        id: i64,
    },

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::MalformedBody(_) => ErrorCode::MALFORMED_BODY,
            Self::Validation(_) => ErrorCode::INVALID_FIELD,
            Self::InvalidReference { .. } => ErrorCode::INVALID_REFERENCE,
            Self::Storage(_) => ErrorCode::STORAGE_ERROR,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MalformedBody(_) | Self::Validation(_) | Self::InvalidReference { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        let body = match self {
            Self::NotFound(kind) => {
                tracing::debug!(error_code = code.as_i32(), %kind, "Entity not found");
                json!({ "error": format!("{kind} not found") })
            }
            Self::MalformedBody(_) | Self::Validation(_) | Self::InvalidReference { .. } => {
                tracing::warn!(
                    error_code = code.as_i32(),
                    category = %code.category(),
                    message = %message,
                    "Request rejected"
                );
                json!({ "errors": [VALIDATION_MESSAGE] })
            }
            Self::Storage(_) | Self::Internal(_) => {
                tracing::error!(
                    error_code = code.as_i32(),
                    status = %status,
                    message = %message,
                    "Request failed"
                );
                json!({ "error": "internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection error.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query failed: {0}")]
    Query(String),

    /// A foreign key or other integrity constraint was violated.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Schema migration error.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Backend not available.
    #[error("Storage backend unavailable")]
    Unavailable,
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.is_foreign_key_violation() => {
                Self::Constraint(e.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Self::Unavailable,
            sqlx::Error::Io(e) => Self::Connection(e.to_string()),
            sqlx::Error::Configuration(e) => Self::Connection(e.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
