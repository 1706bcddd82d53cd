//! Shared HTTP client and browser-like headers for forum requests.
//!
//! The session credential travels in the `Cookie` header of every request.
//! No cookie store is attached: cookies set by the server are not replayed.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::sites::board_url;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, ORIGIN, REFERER,
};
use std::time::Duration;

const ACCEPT_LANGUAGE_VALUE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Build a [`reqwest::Client`] configured for forum API calls.
///
/// The client has:
/// - explicit connect and total timeouts from config
/// - the configured User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`ApiError::Config`] for an invalid config and [`ApiError::Http`]
/// if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    config.validate()?;

    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .timeout(Duration::from_millis(config.total_timeout_ms))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ApiError::Http(format!("failed to build HTTP client: {e}")))
}

/// Headers shared by every forum request.
///
/// `Origin` is the site's base URL and `Referer` its dashboard page.
///
/// # Errors
///
/// Returns [`ApiError::Config`] if the credential or base URL contains bytes
/// that are not valid in a header. The credential is not echoed back.
pub fn browser_headers(base_url: &str, credential: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );

    let mut cookie = HeaderValue::from_str(credential)
        .map_err(|_| ApiError::Config("credential is not a valid header value".into()))?;
    cookie.set_sensitive(true);
    headers.insert(COOKIE, cookie);

    headers.insert(
        ORIGIN,
        HeaderValue::from_str(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL header: {e}")))?,
    );
    headers.insert(
        REFERER,
        HeaderValue::from_str(&board_url(base_url))
            .map_err(|e| ApiError::Config(format!("invalid referer header: {e}")))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = ClientConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn build_client_rejects_invalid_config() {
        let config = ClientConfig {
            total_timeout_ms: 0,
            ..Default::default()
        };
        let err = build_client(&config).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn browser_headers_carry_site_identity() {
        let headers =
            browser_headers("https://www.nodeseek.com", "session=abc").expect("valid headers");
        assert_eq!(headers[ORIGIN], "https://www.nodeseek.com");
        assert_eq!(headers[REFERER], "https://www.nodeseek.com/board");
        assert_eq!(headers[COOKIE], "session=abc");
        assert!(headers[COOKIE].is_sensitive());
        assert_eq!(headers[ACCEPT], "*/*");
    }

    #[test]
    fn browser_headers_reject_control_characters_without_echo() {
        let err = browser_headers("https://www.nodeseek.com", "secret\nvalue").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(!err.to_string().contains("secret"));
    }
}
