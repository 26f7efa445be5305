//! Errors surfaced by the store and the facades

use room_grid_core::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    Unauthorized,
    BadRequest,
    ValidationError,
    NotFound,
    RoomNameConflict,
    DbConstraintViolation,
    UpstreamError,
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ApiErrorCode::Unauthorized => "UNAUTHORIZED",
            ApiErrorCode::BadRequest => "BAD_REQUEST",
            ApiErrorCode::ValidationError => "VALIDATION_ERROR",
            ApiErrorCode::NotFound => "NOT_FOUND",
            ApiErrorCode::RoomNameConflict => "ROOM_NAME_CONFLICT",
            ApiErrorCode::DbConstraintViolation => "DB_CONSTRAINT_VIOLATION",
            ApiErrorCode::UpstreamError => "UPSTREAM_ERROR",
        };
        f.write_str(code)
    }
}

/// Error with an HTTP-like status, a category and optional per-field details
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({code}, status {status})")]
pub struct ApiError {
    pub status: u16,
    pub code: ApiErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(status: u16, code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: FieldErrors) -> Self {
        self.details = Some(details);
        self
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, ApiErrorCode::Unauthorized, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, ApiErrorCode::BadRequest, message)
    }

    pub fn validation(details: FieldErrors) -> Self {
        Self::new(422, ApiErrorCode::ValidationError, "Validation failed").with_details(details)
    }

    /// Validation failure on a single field
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut details = FieldErrors::new();
        details.insert(field.to_string(), message.into());
        Self::validation(details)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, ApiErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, ApiErrorCode::RoomNameConflict, message)
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::new(422, ApiErrorCode::DbConstraintViolation, message)
    }

    /// Any failure of the remote store that has no more specific category
    pub fn upstream(message: impl fmt::Display) -> Self {
        Self::new(500, ApiErrorCode::UpstreamError, message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Message suitable for a toast: the `name` detail when present, else the message
    pub fn describe(&self) -> &str {
        self.details
            .as_ref()
            .and_then(|details| details.get("name"))
            .map(String::as_str)
            .unwrap_or(&self.message)
    }
}
