//! Federation error types.

use std::fmt;

use littr_common::AppError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::signature::SignatureError;

/// Federation result type.
pub type FederationResult<T> = Result<T, FederationError>;

/// Domain reason attached to a non-success remote status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatusReason {
    NotFound,
    MethodNotAllowed,
    Forbidden,
    RemoteInternal,
    Unknown,
}

impl RemoteStatusReason {
    /// Classify a response status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND | StatusCode::GONE => Self::NotFound,
            StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::INTERNAL_SERVER_ERROR => Self::RemoteInternal,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RemoteStatusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Forbidden => "forbidden",
            Self::RemoteInternal => "remote internal error",
            Self::Unknown => "unknown remote error",
        })
    }
}

/// Error type for federation operations.
#[derive(Debug, Error)]
pub enum FederationError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote returned {status}: {reason}")]
    RemoteStatus {
        status: u16,
        reason: RemoteStatusReason,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unknown wire type: {0}")]
    UnknownType(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Unsupported private key type: {0}")]
    UnsupportedKey(String),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Account store error: {0}")]
    AccountStore(#[from] AppError),
}

impl FederationError {
    /// Error for a non-success response status.
    #[must_use]
    pub fn remote_status(status: StatusCode) -> Self {
        Self::RemoteStatus {
            status: status.as_u16(),
            reason: RemoteStatusReason::from_status(status),
        }
    }

    /// Whether the remote reported the target as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RemoteStatus {
                reason: RemoteStatusReason::NotFound,
                ..
            }
        )
    }
}

impl From<serde_json::Error> for FederationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<FederationError> for AppError {
    fn from(err: FederationError) -> Self {
        match err {
            FederationError::RemoteStatus { reason, status } => match reason {
                RemoteStatusReason::NotFound => Self::NotFound(format!("remote status {status}")),
                RemoteStatusReason::MethodNotAllowed => {
                    Self::MethodNotAllowed(format!("remote status {status}"))
                }
                RemoteStatusReason::Forbidden => Self::Forbidden(format!("remote status {status}")),
                RemoteStatusReason::RemoteInternal | RemoteStatusReason::Unknown => {
                    Self::Federation(format!("remote status {status}"))
                }
            },
            FederationError::InvalidFilter(msg) => Self::BadRequest(msg),
            FederationError::AccountStore(inner) => inner,
            other => Self::Federation(other.to_string()),
        }
    }
}
