//! Application error type and its HTTP rendering.
//!
//! Every failure surfaces to clients as `{"error": "<message>"}` with no
//! stack trace. Internal errors keep their detail for the server log and
//! only expose a generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Message returned for failures whose detail stays server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid request input (400).
    #[error("{0}")]
    Validation(String),

    /// A referenced client or service does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The AI provider failed or answered with something unusable (500).
    /// The message is shown to the caller.
    #[error("{0}")]
    Upstream(String),

    /// Database or other infrastructure failure (500).
    /// The message is logged but never shown to the caller.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing required field: {field}"))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            AppError::Upstream(message) if message.is_empty() => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal(format!("Database error: {e}"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = first_validation_message(&errors, "")
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::bad_request(message)
    }
}

/// Picks one human-readable message out of a (possibly nested) error tree.
fn first_validation_message(errors: &ValidationErrors, prefix: &str) -> Option<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        let message = match kind {
            ValidationErrorsKind::Field(field_errors) => field_errors.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for field: {path}"))
            }),
            ValidationErrorsKind::Struct(nested) => first_validation_message(nested, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, nested)| {
                    first_validation_message(nested, &format!("{path}[{index}]"))
                }),
        };

        if message.is_some() {
            return message;
        }
    }

    None
}
