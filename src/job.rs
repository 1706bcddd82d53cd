//! Job descriptions: the JSON payloads the binaries receive and the flat
//! list of per-account jobs built from them.

use crate::audit::mask_credential;
use crate::error::{CheckinError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Lookback window used when the payload omits `days` (or passes 0).
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Opaque session cookie string.
///
/// This type implements a custom [`Debug`] that only shows the masked form,
/// so a job can be logged with `?job` without leaking the session.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw cookie string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw value, for the `Cookie` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `first8...last5` form for log lines.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_credential(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// `{userId: {siteKey: {accountName: credential}}}`, in input key order.
pub type Targets = IndexMap<String, IndexMap<String, IndexMap<String, Credential>>>;

/// One account to process, with its run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountJob<M> {
    /// Caller-side owner of the account.
    pub user_id: String,
    /// Site key as given in the payload (may be unknown to the registry).
    pub site_key: String,
    /// Display name of the account.
    pub account_name: String,
    /// Session cookie.
    pub credential: Credential,
    /// `bool` random-reward flag for attendance, lookback days for statistics.
    pub mode: M,
}

/// Input of `forum-sign`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePayload {
    /// Accounts grouped by user and site.
    pub targets: Targets,
    /// Per user and site: request a randomised reward. Missing means `false`.
    #[serde(default, rename = "userModes")]
    pub user_modes: HashMap<String, HashMap<String, bool>>,
}

impl AttendancePayload {
    /// Parse the JSON argument.
    ///
    /// # Errors
    ///
    /// Returns [`CheckinError::Payload`] when the JSON does not match.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| CheckinError::Payload(e.to_string()))
    }

    /// Random-reward flag for one user and site.
    #[must_use]
    pub fn random_mode(&self, user_id: &str, site_key: &str) -> bool {
        self.user_modes
            .get(user_id)
            .and_then(|sites| sites.get(site_key))
            .copied()
            .unwrap_or(false)
    }

    /// Flatten `targets` into jobs, in input order.
    #[must_use]
    pub fn jobs(&self) -> Vec<AccountJob<bool>> {
        flatten(&self.targets, |user_id, site_key| {
            self.random_mode(user_id, site_key)
        })
    }
}

/// Input of `forum-stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsPayload {
    /// Accounts grouped by user and site.
    pub targets: Targets,
    /// Lookback window in days.
    #[serde(default)]
    pub days: Option<u32>,
}

impl StatisticsPayload {
    /// Parse the JSON argument.
    ///
    /// # Errors
    ///
    /// Returns [`CheckinError::Payload`] when the JSON does not match.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| CheckinError::Payload(e.to_string()))
    }

    /// Effective lookback window; absent or zero means
    /// [`DEFAULT_LOOKBACK_DAYS`].
    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_LOOKBACK_DAYS)
    }

    /// Flatten `targets` into jobs, in input order.
    #[must_use]
    pub fn jobs(&self) -> Vec<AccountJob<u32>> {
        let days = self.days();
        flatten(&self.targets, |_, _| days)
    }
}

fn flatten<M>(targets: &Targets, mode: impl Fn(&str, &str) -> M) -> Vec<AccountJob<M>> {
    let mut jobs = Vec::new();
    for (user_id, sites) in targets {
        for (site_key, accounts) in sites {
            for (account_name, credential) in accounts {
                jobs.push(AccountJob {
                    user_id: user_id.clone(),
                    site_key: site_key.clone(),
                    account_name: account_name.clone(),
                    credential: credential.clone(),
                    mode: mode(user_id.as_str(), site_key.as_str()),
                });
            }
        }
    }
    jobs
}
