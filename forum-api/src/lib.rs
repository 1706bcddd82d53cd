//! # forum-api
//!
//! HTTP surface of the NodeSeek and DeepFlood private APIs.
//!
//! ## Design
//!
//! - Two compiled-in [`SiteProfile`]s, looked up by short key (`ns`, `df`)
//! - [`ForumApi`] trait covering attendance, session priming and credit history
//! - [`HttpForumApi`] implementation over `reqwest` with explicit timeouts
//! - Non-2xx statuses are returned, not raised, so callers can classify them
//!
//! ## Security
//!
//! - The session credential is sent only as the `Cookie` header, marked sensitive
//! - Credentials never appear in errors or tracing fields

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod sites;
pub mod types;

pub use api::ForumApi;
pub use client::HttpForumApi;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use sites::{SiteProfile, MAX_CREDIT_PAGES};
pub use types::{AttendanceReply, CreditPage, CreditRecord, RawResponse, REFERENCE_TZ};
