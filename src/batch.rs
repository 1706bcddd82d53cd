//! Batch orchestration: every account of a job description, one after the
//! other, results grouped back by user and site.
//!
//! A runner error for one account becomes an `Aborted` outcome for that
//! account and never stops the batch.

use crate::attendance::AttendanceRunner;
use crate::audit::AuditLog;
use crate::config::AttendanceConfig;
use crate::error::CheckinError;
use crate::job::{AccountJob, AttendancePayload, StatisticsPayload, Targets};
use crate::outcome::{AttendanceOutcome, AttendanceStatus, StatisticsOutcome, StatisticsStatus};
use crate::statistics::StatisticsRunner;
use forum_api::{ForumApi, SiteProfile};
use indexmap::IndexMap;
use std::future::Future;

/// `{userId: {siteKey: [outcome, ...]}}`, in input order.
pub type BatchResults<O> = IndexMap<String, IndexMap<String, Vec<O>>>;

/// Check in every account in `payload`.
pub async fn sign_accounts<A: ForumApi>(
    api: &A,
    audit: &AuditLog,
    config: &AttendanceConfig,
    payload: &AttendancePayload,
) -> BatchResults<AttendanceOutcome> {
    let runner = &AttendanceRunner::new(api, audit, config.retry_delay());
    run_batch(
        &payload.targets,
        payload.jobs(),
        audit,
        "签到异常",
        move |job| async move {
            runner
                .run(&job.account_name, &job.credential, &job.site_key, job.mode)
                .await
        },
        |job, e| {
            AttendanceOutcome::new(
                &job.account_name,
                &job.site_key,
                AttendanceStatus::Aborted {
                    message: e.to_string(),
                },
            )
        },
    )
    .await
}

/// Collect statistics for every account in `payload`.
pub async fn stats_accounts<A: ForumApi>(
    api: &A,
    audit: &AuditLog,
    payload: &StatisticsPayload,
) -> BatchResults<StatisticsOutcome> {
    let runner = &StatisticsRunner::new(api, audit);
    run_batch(
        &payload.targets,
        payload.jobs(),
        audit,
        "统计异常",
        move |job| async move {
            runner
                .run(&job.account_name, &job.credential, &job.site_key, job.mode)
                .await
        },
        |job, e| {
            StatisticsOutcome::empty(
                &job.account_name,
                &job.site_key,
                StatisticsStatus::Aborted {
                    message: e.to_string(),
                },
            )
        },
    )
    .await
}

/// Run `run` for each job in order, converting its errors with `abort`.
///
/// Every user and site in `targets` appears in the result, even with no
/// accounts.
async fn run_batch<M, O, Fut>(
    targets: &Targets,
    jobs: Vec<AccountJob<M>>,
    audit: &AuditLog,
    failure_label: &str,
    mut run: impl FnMut(AccountJob<M>) -> Fut,
    abort: impl Fn(&AccountJob<M>, &CheckinError) -> O,
) -> BatchResults<O>
where
    M: Clone,
    Fut: Future<Output = crate::error::Result<O>>,
{
    let mut results = skeleton(targets);

    for job in jobs {
        let outcome = match run(job.clone()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let site = SiteProfile::lookup(&job.site_key)
                    .map_or_else(|| "❓ Unknown".to_owned(), ToString::to_string);
                tracing::error!(
                    user = %job.user_id,
                    site = %job.site_key,
                    account = %job.account_name,
                    error = %e,
                    "account run failed"
                );
                let line = format!(
                    "⚠️ 用户 {} {site} 账号 {} {failure_label}: {e}",
                    job.user_id, job.account_name
                );
                if let Err(log_err) = audit.write(&line) {
                    tracing::error!(error = %log_err, "audit log write failed");
                }
                abort(&job, &e)
            }
        };

        results
            .entry(job.user_id.clone())
            .or_default()
            .entry(job.site_key.clone())
            .or_default()
            .push(outcome);
    }

    results
}

fn skeleton<O>(targets: &Targets) -> BatchResults<O> {
    targets
        .iter()
        .map(|(user_id, sites)| {
            let groups: IndexMap<String, Vec<O>> =
                sites.keys().map(|site| (site.clone(), Vec::new())).collect();
            (user_id.clone(), groups)
        })
        .collect()
}
