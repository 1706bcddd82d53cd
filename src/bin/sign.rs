//! `forum-sign`: check in every account of a JSON job description.
//!
//! Prints `{userId: {siteKey: [outcome, ...]}}` as one JSON line on stdout.
//! All tracing output goes to stderr so that stdout stays machine-readable.

use anyhow::Context;
use clap::Parser;
use forum_api::HttpForumApi;
use forum_checkin::{sign_accounts, AttendancePayload, AuditLog, CheckinConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Daily check-in for NodeSeek and DeepFlood accounts.
#[derive(Parser)]
#[command(name = "forum-sign", version, about)]
struct Cli {
    /// Job description: `{"targets": {...}, "userModes": {...}}`.
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
        AttendancePayload::from_json(&cli.payload).context("invalid job description")?;
    let config = CheckinConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let log_dir = config.log.resolved_dir();
    let audit = AuditLog::open(&log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;
    let api = HttpForumApi::new(&config.http)?;

    tracing::info!(accounts = payload.jobs().len(), "forum-sign starting");
    let results = sign_accounts(&api, &audit, &config.attendance, &payload).await;

    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}
