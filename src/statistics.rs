//! Sign-in reward statistics for one account.
//!
//! Walks the credit history newest-first, one page at a time, until a page
//! ends before the lookback cutoff, the server stops answering with data, or
//! [`MAX_CREDIT_PAGES`] pages have been read. Sign-in rewards inside the
//! window are summed and averaged.

use crate::audit::{chunk_str, AuditLog, BODY_CHUNK_CHARS};
use crate::clock;
use crate::error::Result;
use crate::job::Credential;
use crate::outcome::{SigninEntry, SigninStats, StatisticsOutcome, StatisticsStatus};
use chrono::DateTime;
use chrono_tz::Tz;
use forum_api::{CreditPage, CreditRecord, ForumApi, SiteProfile, MAX_CREDIT_PAGES};
use serde_json::Value;

/// Runs the statistics flow against a [`ForumApi`], writing to an
/// [`AuditLog`].
pub struct StatisticsRunner<'a, A> {
    api: &'a A,
    audit: &'a AuditLog,
}

impl<'a, A: ForumApi> StatisticsRunner<'a, A> {
    /// New runner.
    pub fn new(api: &'a A, audit: &'a AuditLog) -> Self {
        Self { api, audit }
    }

    /// Sign-in rewards of `name` on `site_key` over the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns an error only when the audit log cannot be written.
    pub async fn run(
        &self,
        name: &str,
        credential: &Credential,
        site_key: &str,
        days: u32,
    ) -> Result<StatisticsOutcome> {
        let Some(site) = SiteProfile::lookup(site_key) else {
            let status = StatisticsStatus::ConfigError {
                site: site_key.to_owned(),
            };
            self.audit.write(&status.message())?;
            tracing::warn!(site = site_key, account = name, "unknown site key");
            return Ok(StatisticsOutcome::empty(name, site_key, status));
        };

        self.audit.write(&format!(
            "==== 开始统计收益: {site} - {name}, Cookie(部分隐藏): {}, 天数: {days} ====",
            credential.masked()
        ))?;
        let cutoff = clock::days_before(&clock::now(), days);

        match self.api.prime_session(site, credential.expose()).await {
            Ok(status) => {
                tracing::debug!(site = site.key, account = name, status, "board visited");
                self.audit.write(&format!(
                    "✅ {site} - {name} 访问 /board 成功，尝试获取信用记录"
                ))?;
            }
            Err(e) => {
                tracing::warn!(site = site.key, account = name, error = %e, "board visit failed");
                self.audit
                    .write(&format!("⚠️ {site} - {name} 访问 /board 失败: {e}"))?;
            }
        }

        let records = self.collect_records(site, credential, cutoff).await?;
        let rewards: Vec<CreditRecord> = records
            .into_iter()
            .filter(|record| site.is_signin_reward(&record.description))
            .collect();

        if rewards.is_empty() {
            tracing::info!(site = site.key, account = name, days, "no sign-in rewards");
            return Ok(StatisticsOutcome::empty(
                name,
                site_key,
                StatisticsStatus::NoRecords { days },
            ));
        }

        let stats = aggregate(&rewards);
        tracing::info!(
            site = site.key,
            account = name,
            total = stats.total_amount,
            count = stats.days_count,
            "statistics finished"
        );
        Ok(StatisticsOutcome::new(
            name,
            site_key,
            StatisticsStatus::Success,
            stats,
        ))
    }

    /// Every record at or after `cutoff`, newest first.
    async fn collect_records(
        &self,
        site: &SiteProfile,
        credential: &Credential,
        cutoff: DateTime<Tz>,
    ) -> Result<Vec<CreditRecord>> {
        let mut kept = Vec::new();
        for page in 1..=MAX_CREDIT_PAGES {
            let Some(rows) = self.fetch_page(site, credential, page).await? else {
                break;
            };
            if rows.is_empty() {
                break;
            }

            for row in &rows {
                match CreditRecord::from_tuple(row) {
                    Ok(record) if record.time >= cutoff => kept.push(record),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(site = site.key, page, error = %e, "skipping credit row");
                    }
                }
            }

            let oldest = rows
                .last()
                .and_then(|row| CreditRecord::from_tuple(row).ok())
                .map(|record| record.time);
            if oldest.is_some_and(|time| time < cutoff) {
                break;
            }
        }
        Ok(kept)
    }

    /// Rows of one page, or `None` when pagination should stop.
    async fn fetch_page(
        &self,
        site: &SiteProfile,
        credential: &Credential,
        page: u32,
    ) -> Result<Option<Vec<Value>>> {
        let response = match self.api.credit_page(site, credential.expose(), page).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(site = site.key, page, error = %e, "credit page request failed");
                self.audit
                    .write(&format!("⚠️ {site} 请求信用记录异常: {e}"))?;
                return Ok(None);
            }
        };

        for (idx, chunk) in chunk_str(&response.body, BODY_CHUNK_CHARS)
            .iter()
            .enumerate()
        {
            self.audit.write(&format!(
                "{site} 信用记录第 {page} 页 - 响应正文第 {} 段:\n{chunk}",
                idx + 1
            ))?;
        }

        match CreditPage::parse(&response.body) {
            Ok(parsed) if parsed.success => Ok(parsed.data),
            Ok(_) => Ok(None),
            Err(e) => {
                self.audit.write(&format!("⚠️ {site} 信用记录解析异常: {e}"))?;
                Ok(None)
            }
        }
    }
}

/// Sum, count and two-decimal average of `rewards`, in the given order.
#[must_use]
pub fn aggregate(rewards: &[CreditRecord]) -> SigninStats {
    if rewards.is_empty() {
        return SigninStats::default();
    }
    let total_amount: i64 = rewards.iter().map(|record| record.amount).sum();
    let days_count = rewards.len();
    #[allow(clippy::cast_precision_loss)]
    let average = total_amount as f64 / days_count as f64;
    SigninStats {
        total_amount,
        average: format!("{average:.2}"),
        days_count,
        records: rewards
            .iter()
            .map(|record| SigninEntry {
                amount: record.amount,
                date: clock::date(&record.time),
                description: record.description.clone(),
            })
            .collect(),
    }
}
