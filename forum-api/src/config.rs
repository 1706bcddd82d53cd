//! HTTP client configuration with conservative defaults.
//!
//! [`ClientConfig`] controls timeouts, the User-Agent and (for tests) a base
//! URL that replaces every site's compiled-in origin.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Desktop Chrome User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// Configuration for the forum HTTP client.
///
/// Use [`Default::default()`] for production values, or construct with
/// field overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum time to establish a TCP/TLS connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Maximum time for a whole request including the body, in milliseconds.
    pub total_timeout_ms: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Replaces the site's base URL for every request when set.
    ///
    /// Only meant for pointing the client at a local mock server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url_override: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            total_timeout_ms: 30_000,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            base_url_override: None,
        }
    }
}

impl ClientConfig {
    /// Point every site at `base_url` instead of its real origin.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - both timeouts must be greater than 0
    /// - `connect_timeout_ms` must be <= `total_timeout_ms`
    /// - `user_agent` must not be blank
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.connect_timeout_ms == 0 {
            return Err(ApiError::Config(
                "connect_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.total_timeout_ms == 0 {
            return Err(ApiError::Config(
                "total_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.connect_timeout_ms > self.total_timeout_ms {
            return Err(ApiError::Config(
                "connect_timeout_ms must be <= total_timeout_ms".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ApiError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = ClientConfig::default();
        assert_eq!(config.connect_timeout_ms, 10_000);
        assert_eq!(config.total_timeout_ms, 30_000);
        assert!(config.user_agent.contains("Chrome/134"));
        assert!(config.base_url_override.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_connect_timeout_rejected() {
        let config = ClientConfig {
            connect_timeout_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("connect_timeout_ms"));
    }

    #[test]
    fn zero_total_timeout_rejected() {
        let config = ClientConfig {
            total_timeout_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("total_timeout_ms"));
    }

    #[test]
    fn connect_longer_than_total_rejected() {
        let config = ClientConfig {
            connect_timeout_ms: 5_000,
            total_timeout_ms: 1_000,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("<="));
    }

    #[test]
    fn blank_user_agent_rejected() {
        let config = ClientConfig {
            user_agent: "   ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn with_base_url_sets_override() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9999");
        assert_eq!(
            config.base_url_override.as_deref(),
            Some("http://127.0.0.1:9999")
        );
        assert!(config.validate().is_ok());
    }
}
