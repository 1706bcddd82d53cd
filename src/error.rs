//! Error types for forum-checkin.
//!
//! Per-account failures never surface as errors: they are converted into
//! outcomes. These errors cover what aborts a single runner call (and is then
//! isolated by the batch) or the whole process (bad payload, bad config).

use forum_api::ApiError;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    /// Audit log or config file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Forum client construction or configuration error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The JSON job description is malformed.
    #[error("payload error: {0}")]
    Payload(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CheckinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_payload() {
        let err = CheckinError::Payload("targets must be an object".into());
        assert_eq!(err.to_string(), "payload error: targets must be an object");
    }

    #[test]
    fn api_errors_convert() {
        let err: CheckinError = ApiError::Config("bad".into()).into();
        assert_eq!(err.to_string(), "API error: config error: bad");
    }

    #[test]
    fn io_errors_convert() {
        let err: CheckinError = std::io::Error::other("disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
