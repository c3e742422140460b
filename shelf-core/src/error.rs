//! Error types shared across the workspace.

use thiserror::Error;

/// Result type alias for page and configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by page sources, the request cache, and settings.
///
/// `Clone` because one failed resolution is handed to every caller that joined it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The data source could not produce a page (network failure, bad status).
    #[error("source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// A page size of zero was supplied.
    #[error("invalid page size: {size} (must be at least 1)")]
    InvalidPageSize { size: usize },

    /// The source answered with a payload that could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// A setting could not be parsed.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a source-unavailable error.
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Error::SourceUnavailable {
            message: message.into(),
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Error::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Whether issuing the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::SourceUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unavailable("connection refused");
        assert_eq!(err.to_string(), "source unavailable: connection refused");

        let err = Error::InvalidPageSize { size: 0 };
        assert_eq!(err.to_string(), "invalid page size: 0 (must be at least 1)");
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(Error::unavailable("timeout").is_retryable());
        assert!(!Error::InvalidPageSize { size: 0 }.is_retryable());
        assert!(!Error::invalid_response("bad json").is_retryable());
        assert!(!Error::config("bad value").is_retryable());
    }
}
