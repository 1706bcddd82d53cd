//! Compiled-in site profiles for the two supported forums.

use std::fmt;

/// Static descriptor of one forum's API origin and display identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteProfile {
    /// Short key used in job descriptions (`ns`, `df`).
    pub key: &'static str,
    /// Human-readable forum name.
    pub name: &'static str,
    /// Origin of the forum, without a trailing slash.
    pub base_url: &'static str,
    /// Visual marker prefixed to log lines.
    pub marker: &'static str,
    /// Text a credit description must contain to count as a sign-in reward.
    pub reward_marker: &'static str,
    /// Reward unit that must also appear in the description.
    pub unit_marker: &'static str,
}

/// NodeSeek.
pub const NODESEEK: SiteProfile = SiteProfile {
    key: "ns",
    name: "NodeSeek",
    base_url: "https://www.nodeseek.com",
    marker: "🔵",
    reward_marker: "签到收益",
    unit_marker: "鸡腿",
};

/// DeepFlood.
pub const DEEPFLOOD: SiteProfile = SiteProfile {
    key: "df",
    name: "DeepFlood",
    base_url: "https://www.deepflood.com",
    marker: "🟢",
    reward_marker: "签到收益",
    unit_marker: "鸡腿",
};

const SITES: &[SiteProfile] = &[NODESEEK, DEEPFLOOD];

/// Last-page guard for credit history pagination.
pub const MAX_CREDIT_PAGES: u32 = 20;

impl SiteProfile {
    /// Look up a profile by its short key.
    #[must_use]
    pub fn lookup(key: &str) -> Option<&'static SiteProfile> {
        SITES.iter().find(|site| site.key == key)
    }

    /// Returns every registered profile.
    #[must_use]
    pub fn all() -> &'static [SiteProfile] {
        SITES
    }

    /// `true` when `description` is a sign-in reward entry for this site.
    #[must_use]
    pub fn is_signin_reward(&self, description: &str) -> bool {
        description.contains(self.reward_marker) && description.contains(self.unit_marker)
    }
}

impl fmt::Display for SiteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker, self.name)
    }
}

/// Attendance endpoint; `random` asks for a randomised instead of fixed reward.
#[must_use]
pub fn attendance_url(base_url: &str, random: bool) -> String {
    format!("{base_url}/api/attendance?random={random}")
}

/// One page of the credit history, 1-based.
#[must_use]
pub fn credit_page_url(base_url: &str, page: u32) -> String {
    format!("{base_url}/api/account/credit/page-{page}")
}

/// Dashboard page, used as Referer and for session priming.
#[must_use]
pub fn board_url(base_url: &str) -> String {
    format!("{base_url}/board")
}
