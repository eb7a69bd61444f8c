//! Error types for littr.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    // === Server Errors ===
    #[error("Federation error: {0}")]
    Federation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            // 4xx Client Errors
            Self::NotFound(_) => 404,
            Self::Forbidden(_) => 403,
            Self::BadRequest(_) | Self::Validation(_) => 400,
            Self::MethodNotAllowed(_) => 405,

            // 5xx Server Errors
            Self::Federation(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            Self::Federation(_) => "FEDERATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

// === From implementations ===

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("abc".to_string()).status_code(), 404);
        assert_eq!(AppError::Validation("handle".to_string()).status_code(), 400);
        assert_eq!(AppError::Forbidden("nope".to_string()).status_code(), 403);
        assert_eq!(AppError::MethodNotAllowed("PUT".to_string()).status_code(), 405);
        assert_eq!(AppError::Federation("boom".to_string()).status_code(), 500);
    }

    #[test]
    fn test_server_error_classification() {
        assert!(AppError::Config("missing".to_string()).is_server_error());
        assert!(!AppError::BadRequest("no key".to_string()).is_server_error());
        assert_eq!(AppError::BadRequest("no key".to_string()).error_code(), "BAD_REQUEST");
    }
}
