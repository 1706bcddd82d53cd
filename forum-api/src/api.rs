//! Trait definition for the forum API surface used by the runners.
//!
//! [`crate::client::HttpForumApi`] is the production implementation; tests
//! substitute scripted implementations to count calls and inject failures.

use crate::error::ApiError;
use crate::sites::SiteProfile;
use crate::types::RawResponse;

/// The three calls the check-in and statistics flows make against a forum.
///
/// Implementations return `Err` only for transport-level failures. Any HTTP
/// status, including 403, comes back as a [`RawResponse`] so the caller can
/// classify it.
pub trait ForumApi: Send + Sync {
    /// Origin requests for `site` are actually sent to.
    fn base_url<'a>(&'a self, site: &'a SiteProfile) -> &'a str {
        site.base_url
    }

    /// `POST /api/attendance?random=<random>` with an empty body.
    fn attend(
        &self,
        site: &SiteProfile,
        credential: &str,
        random: bool,
    ) -> impl std::future::Future<Output = Result<RawResponse, ApiError>> + Send;

    /// `GET /board`, issued once before reading the credit history.
    ///
    /// Returns the HTTP status; the body is discarded.
    fn prime_session(
        &self,
        site: &SiteProfile,
        credential: &str,
    ) -> impl std::future::Future<Output = Result<u16, ApiError>> + Send;

    /// `GET /api/account/credit/page-<page>`.
    fn credit_page(
        &self,
        site: &SiteProfile,
        credential: &str,
        page: u32,
    ) -> impl std::future::Future<Output = Result<RawResponse, ApiError>> + Send;
}
