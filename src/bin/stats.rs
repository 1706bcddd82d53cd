//! `forum-stats`: sign-in reward statistics for every account of a JSON job
//! description.
//!
//! Prints `{userId: {siteKey: [outcome, ...]}}` as one JSON line on stdout.
//! All tracing output goes to stderr.

use anyhow::Context;
use clap::Parser;
use forum_api::HttpForumApi;
use forum_checkin::{stats_accounts, AuditLog, CheckinConfig, StatisticsPayload};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sign-in reward statistics for NodeSeek and DeepFlood accounts.
#[derive(Parser)]
#[command(name = "forum-stats", version, about)]
struct Cli {
    /// Job description: `{"targets": {...}, "days": 30}`.
    payload: String,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("forum_checkin=info,forum_api=info")),
        )
        .init();

    let cli = Cli::parse();

    let payload =
        StatisticsPayload::from_json(&cli.payload).context("invalid job description")?;
    let config = CheckinConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let log_dir = config.log.resolved_dir();
    let audit = AuditLog::open(&log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;
    let api = HttpForumApi::new(&config.http)?;

    tracing::info!(
        accounts = payload.jobs().len(),
        days = payload.days(),
        "forum-stats starting"
    );
    let results = stats_accounts(&api, &audit, &payload).await;

    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}
