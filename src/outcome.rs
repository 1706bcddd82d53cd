//! Per-account outcomes returned to the caller.
//!
//! Every outcome carries a tagged status for programmatic dispatch and the
//! human-readable `result` line the forums' users are used to seeing.

use crate::clock;
use serde::Serialize;

/// How a check-in attempt (or the whole attempt loop) ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Reward granted. `amount` is the first run of digits in the server
    /// message, if any.
    Success { amount: Option<String> },
    /// Already checked in today.
    AlreadyDone,
    /// HTTP 403 from anti-bot protection.
    Blocked,
    /// The server declined with a message.
    Failed { message: Option<String> },
    /// The request never produced a response.
    TransportError { message: String },
    /// The response body was not JSON (usually an expired session).
    ProtocolError,
    /// Site key not in the registry.
    ConfigError { site: String },
    /// The runner itself failed; reported by the batch.
    Aborted { message: String },
}

impl AttendanceStatus {
    /// Display line for this status.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success { amount } => {
                format!("✅ 签到收益 {} 个 🍗", amount.as_deref().unwrap_or("未知"))
            }
            Self::AlreadyDone => "☑️ 已签到".to_owned(),
            Self::Blocked => "🚫 风控拦截".to_owned(),
            Self::Failed { message } => {
                let message = message.as_deref().filter(|m| !m.is_empty());
                format!("🚫 签到失败：{}", message.unwrap_or("未知错误"))
            }
            Self::TransportError { message } => format!("🚫 请求异常：{message}"),
            Self::ProtocolError => "🚫 响应解析失败，非 JSON 格式或登录失效".to_owned(),
            Self::ConfigError { site } => format!("❌ 不支持的网站类型: {site}"),
            Self::Aborted { message } => format!("🚫 签到异常: {message}"),
        }
    }

    /// `true` when the account is checked in for today.
    #[must_use]
    pub fn is_checked_in(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::AlreadyDone)
    }

    /// `true` when retrying cannot change the result.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Success { .. } | Self::AlreadyDone | Self::ConfigError { .. }
        )
    }
}

/// Result of one attendance run for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceOutcome {
    /// Account name.
    pub name: String,
    /// Display line, see [`AttendanceStatus::message`].
    pub result: String,
    /// When the outcome was produced, reference-timezone wall clock.
    pub time: String,
    /// Site key as given in the job.
    pub site_type: String,
    /// Tagged status.
    pub status: AttendanceStatus,
}

impl AttendanceOutcome {
    /// Outcome stamped with the current time.
    #[must_use]
    pub fn new(name: &str, site_key: &str, status: AttendanceStatus) -> Self {
        Self {
            name: name.to_owned(),
            result: status.message(),
            time: clock::timestamp(&clock::now()),
            site_type: site_key.to_owned(),
            status,
        }
    }
}

/// How a statistics run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatisticsStatus {
    /// At least one sign-in reward in the window.
    Success,
    /// No sign-in reward in the last `days` days.
    NoRecords { days: u32 },
    /// Site key not in the registry.
    ConfigError { site: String },
    /// The runner itself failed; reported by the batch.
    Aborted { message: String },
}

impl StatisticsStatus {
    /// Display line for this status.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success => "✅ 查询成功".to_owned(),
            Self::NoRecords { days } => format!("⚠️ 近 {days} 天没有签到记录"),
            Self::ConfigError { site } => format!("❌ 不支持的网站类型: {site}"),
            Self::Aborted { message } => format!("🚫 查询异常: {message}"),
        }
    }
}

/// One sign-in reward in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigninEntry {
    /// Reward amount.
    pub amount: i64,
    /// Booking date, `YYYY-MM-DD` in the reference timezone.
    pub date: String,
    /// Ledger description.
    pub description: String,
}

/// Aggregated sign-in rewards for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigninStats {
    /// Sum of all rewards.
    pub total_amount: i64,
    /// `total_amount / days_count`, two decimals.
    pub average: String,
    /// Number of rewards counted.
    pub days_count: usize,
    /// Rewards in collection order (newest first).
    pub records: Vec<SigninEntry>,
}

impl Default for SigninStats {
    fn default() -> Self {
        Self {
            total_amount: 0,
            average: "0.00".to_owned(),
            days_count: 0,
            records: Vec::new(),
        }
    }
}

/// Result of one statistics run for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsOutcome {
    /// Account name.
    pub name: String,
    /// Display line, see [`StatisticsStatus::message`].
    pub result: String,
    /// Tagged status.
    pub status: StatisticsStatus,
    /// Aggregates; zeroed unless `status` is `Success`.
    pub stats: SigninStats,
    /// Site key as given in the job.
    pub site_type: String,
}

impl StatisticsOutcome {
    /// Outcome with the given aggregates.
    #[must_use]
    pub fn new(name: &str, site_key: &str, status: StatisticsStatus, stats: SigninStats) -> Self {
        Self {
            name: name.to_owned(),
            result: status.message(),
            status,
            stats,
            site_type: site_key.to_owned(),
        }
    }

    /// Outcome with zeroed aggregates.
    #[must_use]
    pub fn empty(name: &str, site_key: &str, status: StatisticsStatus) -> Self {
        Self::new(name, site_key, status, SigninStats::default())
    }
}
