//! Error types for the document Q&A service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Request validation error (disallowed extension, oversize upload, tag mismatch)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No normalizer exists for the extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed document content
    #[error("Failed to parse {format} content: {message}")]
    Parse { format: String, message: String },

    /// Remote backend requested but not configured
    #[error("{0}")]
    BackendUnavailable(String),

    /// Network or inference failure from a backend
    #[error("Backend failure: {0}")]
    BackendFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a parse error for a given source format
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a backend failure error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendFailure(message.into())
    }

    /// Stable classification string surfaced to API clients
    pub fn classification(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Parse { .. } => "parse_error",
            Error::BackendUnavailable(_) => "backend_unavailable",
            Error::BackendFailure(_) => "backend_failure",
            Error::Config(_) => "config_error",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::BackendFailure(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_)
            | Error::UnsupportedFormat(_)
            | Error::Parse { .. }
            | Error::BackendUnavailable(_) => StatusCode::BAD_REQUEST,
            Error::BackendFailure(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": {
                "type": self.classification(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_stable() {
        assert_eq!(
            Error::Validation("bad".into()).classification(),
            "validation_error"
        );
        assert_eq!(
            Error::parse("csv", "ragged row").classification(),
            "parse_error"
        );
        assert_eq!(
            Error::BackendUnavailable("remote backend requested but not configured".into())
                .classification(),
            "backend_unavailable"
        );
    }

    #[test]
    fn parse_error_message_names_format() {
        let err = Error::parse("json", "unexpected end of input");
        assert_eq!(
            err.to_string(),
            "Failed to parse json content: unexpected end of input"
        );
    }
}
