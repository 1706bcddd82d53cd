//! Daily check-in for one account.
//!
//! # Retry policy
//!
//! Up to [`ATTENDANCE_ATTEMPTS`] attempts with a fixed delay between them
//! (default [`RETRY_DELAY_MS`], no growth):
//!
//! - **Final** (`Success`, `AlreadyDone`, unknown site): returned immediately.
//! - **Everything else** (transport error, non-JSON body, 403 block, explicit
//!   failure message): retained and retried; the last one is returned once
//!   the attempts are used up.

use crate::audit::{chunk_str, AuditLog, BODY_CHUNK_CHARS, HIDDEN};
use crate::error::Result;
use crate::job::Credential;
use crate::outcome::{AttendanceOutcome, AttendanceStatus};
use forum_api::sites::attendance_url;
use forum_api::{AttendanceReply, ForumApi, RawResponse, SiteProfile};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;

/// Attempts per account and run.
pub const ATTENDANCE_ATTEMPTS: u32 = 3;

/// Default pause between attempts, in milliseconds.
pub const RETRY_DELAY_MS: u64 = 500;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("regex matching a run of ASCII digits"));

/// Message fragments the forums use for "already checked in today".
const ALREADY_MARKERS: &[&str] = &["重复", "already"];

/// Runs the attendance flow against a [`ForumApi`], writing to an
/// [`AuditLog`].
pub struct AttendanceRunner<'a, A> {
    api: &'a A,
    audit: &'a AuditLog,
    retry_delay: Duration,
}

impl<'a, A: ForumApi> AttendanceRunner<'a, A> {
    /// Runner with the given pause between attempts.
    pub fn new(api: &'a A, audit: &'a AuditLog, retry_delay: Duration) -> Self {
        Self {
            api,
            audit,
            retry_delay,
        }
    }

    /// Check in `name` on `site_key`.
    ///
    /// Always yields exactly one outcome for the account.
    ///
    /// # Errors
    ///
    /// Returns an error only when the audit log cannot be written.
    pub async fn run(
        &self,
        name: &str,
        credential: &Credential,
        site_key: &str,
        random: bool,
    ) -> Result<AttendanceOutcome> {
        let Some(site) = SiteProfile::lookup(site_key) else {
            let status = AttendanceStatus::ConfigError {
                site: site_key.to_owned(),
            };
            self.audit.write(&status.message())?;
            tracing::warn!(site = site_key, account = name, "unknown site key");
            return Ok(AttendanceOutcome::new(name, site_key, status));
        };

        let mut last: Option<AttendanceStatus> = None;
        for attempt in 1..=ATTENDANCE_ATTEMPTS {
            let status = self.attempt(site, name, credential, random, attempt).await?;
            self.audit
                .write(&format!("{site} - {name} 签到结果: {}", status.message()))?;

            if status.is_final() {
                tracing::info!(site = site.key, account = name, attempt, ?status, "attendance finished");
                return Ok(AttendanceOutcome::new(name, site_key, status));
            }

            tracing::warn!(
                site = site.key,
                account = name,
                attempt,
                max = ATTENDANCE_ATTEMPTS,
                ?status,
                "attendance attempt failed"
            );
            last = Some(status);
            if attempt < ATTENDANCE_ATTEMPTS {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        let status = last.unwrap_or(AttendanceStatus::Failed { message: None });
        Ok(AttendanceOutcome::new(name, site_key, status))
    }

    async fn attempt(
        &self,
        site: &SiteProfile,
        name: &str,
        credential: &Credential,
        random: bool,
        attempt: u32,
    ) -> Result<AttendanceStatus> {
        self.audit
            .write(&format!("==== 开始签到: {site} - {name} (第 {attempt} 次尝试) ===="))?;
        self.audit
            .write(&format!("请求 URL: {}", attendance_url(self.api.base_url(site), random)))?;
        self.audit
            .write(&format!("使用 Cookie(部分隐藏): {}", credential.masked()))?;
        self.audit.write(&format!("随机模式: {random}"))?;

        let response = match self.api.attend(site, credential.expose(), random).await {
            Ok(response) => response,
            Err(e) => {
                self.audit
                    .write(&format!("{site} - {name} 请求异常: {e}"))?;
                return Ok(AttendanceStatus::TransportError {
                    message: e.to_string(),
                });
            }
        };

        let body_chars = response.body.chars().count();
        self.audit.write(&format!("响应正文长度: {body_chars}"))?;

        match serde_json::from_str::<Value>(&response.body) {
            Ok(parsed) => {
                if parsed.is_object() || parsed.is_array() {
                    self.audit
                        .write(&format!("响应正文(JSON): {}", response.body))?;
                } else {
                    self.write_hidden_body(&response.body)?;
                }
                let status = classify(&response, &parsed);
                if status == AttendanceStatus::ProtocolError {
                    self.audit
                        .write(&format!("{site} - {name} 响应解析异常:{HIDDEN}"))?;
                }
                Ok(status)
            }
            Err(_) => {
                self.write_hidden_body(&response.body)?;
                self.audit
                    .write(&format!("{site} - {name} 响应解析异常:{HIDDEN}"))?;
                Ok(AttendanceStatus::ProtocolError)
            }
        }
    }

    /// One placeholder line per body chunk; the body itself is never written.
    fn write_hidden_body(&self, body: &str) -> Result<()> {
        for idx in 1..=chunk_str(body, BODY_CHUNK_CHARS).len() {
            self.audit.write(&format!("响应正文第 {idx} 段: {HIDDEN}"))?;
        }
        Ok(())
    }
}

/// Classify a response whose body parsed as JSON.
///
/// Priority: 403 block, success flag, "already" marker, anything else.
/// A `null` body is a protocol error. Other non-object values carry no
/// fields and end up as a failure without message.
#[must_use]
pub fn classify(response: &RawResponse, parsed: &Value) -> AttendanceStatus {
    if parsed.is_null() {
        return AttendanceStatus::ProtocolError;
    }
    let reply = AttendanceReply::from_value(parsed).unwrap_or_default();

    if response.is_blocked() {
        return AttendanceStatus::Blocked;
    }

    let message = reply.message.as_deref().unwrap_or_default();
    if reply.success {
        return AttendanceStatus::Success {
            amount: first_number(message),
        };
    }

    let lowered = message.to_lowercase();
    if ALREADY_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return AttendanceStatus::AlreadyDone;
    }

    AttendanceStatus::Failed {
        message: reply.message,
    }
}

/// First run of ASCII digits in `message`.
#[must_use]
pub fn first_number(message: &str) -> Option<String> {
    FIRST_NUMBER.find(message).map(|m| m.as_str().to_owned())
}
