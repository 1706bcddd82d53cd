//! `reqwest`-backed [`ForumApi`] implementation.

use crate::api::ForumApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{browser_headers, build_client};
use crate::sites::{attendance_url, board_url, credit_page_url, SiteProfile};
use crate::types::RawResponse;

/// Talks to the real forums (or to `base_url_override`).
#[derive(Debug, Clone)]
pub struct HttpForumApi {
    client: reqwest::Client,
    base_url_override: Option<String>,
}

impl HttpForumApi {
    /// Build the client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the config is invalid or the TLS backend
    /// cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(config)?,
            base_url_override: config
                .base_url_override
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_owned()),
        })
    }

    async fn read(
        site: &SiteProfile,
        what: &str,
        response: reqwest::Response,
    ) -> Result<RawResponse, ApiError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            ApiError::Http(format!("{} {what} response read failed: {e}", site.name))
        })?;
        tracing::trace!(site = site.key, what, status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

impl ForumApi for HttpForumApi {
    fn base_url<'a>(&'a self, site: &'a SiteProfile) -> &'a str {
        self.base_url_override.as_deref().unwrap_or(site.base_url)
    }

    async fn attend(
        &self,
        site: &SiteProfile,
        credential: &str,
        random: bool,
    ) -> Result<RawResponse, ApiError> {
        let base = self.base_url(site);
        let response = self
            .client
            .post(attendance_url(base, random))
            .headers(browser_headers(base, credential)?)
            .body("")
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("{} attendance request failed: {e}", site.name)))?;
        Self::read(site, "attendance", response).await
    }

    async fn prime_session(&self, site: &SiteProfile, credential: &str) -> Result<u16, ApiError> {
        let base = self.base_url(site);
        let response = self
            .client
            .get(board_url(base))
            .headers(browser_headers(base, credential)?)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("{} board request failed: {e}", site.name)))?;
        Ok(response.status().as_u16())
    }

    async fn credit_page(
        &self,
        site: &SiteProfile,
        credential: &str,
        page: u32,
    ) -> Result<RawResponse, ApiError> {
        let base = self.base_url(site);
        let response = self
            .client
            .get(credit_page_url(base, page))
            .headers(browser_headers(base, credential)?)
            .send()
            .await
            .map_err(|e| {
                ApiError::Http(format!("{} credit page {page} request failed: {e}", site.name))
            })?;
        Self::read(site, "credit page", response).await
    }
}
