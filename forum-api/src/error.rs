//! Error types for the forum-api crate.
//!
//! All errors use stable string messages suitable for display to users.
//! Credentials never appear in error messages.

/// Errors that can occur while talking to a forum's private API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read
    /// (DNS, TLS, connect/total timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response body or record could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A site key that is not in the compiled-in registry.
    #[error("unknown site: {0}")]
    UnknownSite(String),
}

/// Convenience type alias for forum-api results.
pub type Result<T> = std::result::Result<T, ApiError>;
