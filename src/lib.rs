//! Daily check-in and sign-in reward statistics for NodeSeek and DeepFlood
//! accounts.
//!
//! Two flows share one forum client and one audit log:
//! - **Attendance**: `POST /api/attendance` per account, with bounded retries
//!   and a classified outcome (reward, already done, blocked, failed)
//! - **Statistics**: credit history pagination over a lookback window,
//!   summing sign-in rewards
//!
//! # Architecture
//!
//! ```text
//! JSON payload ─► job ─► batch ─► attendance / statistics ─► outcome
//!                                        │            │
//!                                   forum_api     audit (daily file)
//! ```
//!
//! The forum HTTP surface lives in the `forum-api` workspace crate behind the
//! [`forum_api::ForumApi`] trait, so runners are tested against scripted
//! implementations.

pub mod attendance;
pub mod audit;
pub mod batch;
pub mod clock;
pub mod config;
pub mod error;
pub mod job;
pub mod outcome;
pub mod paths;
pub mod statistics;

pub use attendance::AttendanceRunner;
pub use audit::AuditLog;
pub use batch::{sign_accounts, stats_accounts, BatchResults};
pub use config::CheckinConfig;
pub use error::{CheckinError, Result};
pub use job::{AttendancePayload, Credential, StatisticsPayload};
pub use outcome::{AttendanceOutcome, AttendanceStatus, StatisticsOutcome, StatisticsStatus};
pub use statistics::StatisticsRunner;
