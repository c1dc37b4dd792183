//! Shared error type across SinoAI crates.

use thiserror::Error;

/// Stable error codes used in structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input (config file, env values).
    BadRequest,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Data store could not be reached.
    StoreUnavailable,
    /// Data store answered with an error status or an undecodable body.
    StoreResponse,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::StoreResponse => "STORE_RESPONSE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("store response: {0}")]
    StoreResponse(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl AnalyticsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalyticsError::BadRequest(_) => ErrorCode::BadRequest,
            AnalyticsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            AnalyticsError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            AnalyticsError::StoreResponse(_) => ErrorCode::StoreResponse,
            AnalyticsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
