//! Wall clock in the reference timezone.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use forum_api::REFERENCE_TZ;

/// Current time in [`REFERENCE_TZ`].
#[must_use]
pub fn now() -> DateTime<Tz> {
    Utc::now().with_timezone(&REFERENCE_TZ)
}

/// `days` whole days before `at`, clamped to the earliest representable
/// instant.
#[must_use]
pub fn days_before(at: &DateTime<Tz>, days: u32) -> DateTime<Tz> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|delta| at.checked_sub_signed(delta))
        .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC.with_timezone(&REFERENCE_TZ))
}

/// `YYYY-MM-DD HH:MM:SS`, used for log lines and outcome timestamps.
#[must_use]
pub fn timestamp(at: &DateTime<Tz>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `YYYY-MM-DD`, used for log file names and record dates.
#[must_use]
pub fn date(at: &DateTime<Tz>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_reference_timezone() {
        let at = Utc
            .with_ymd_and_hms(2024, 6, 1, 18, 5, 9)
            .unwrap()
            .with_timezone(&REFERENCE_TZ);
        assert_eq!(timestamp(&at), "2024-06-02 02:05:09");
        assert_eq!(date(&at), "2024-06-02");
    }

    #[test]
    fn days_before_subtracts_whole_days() {
        let at = REFERENCE_TZ.with_ymd_and_hms(2025, 3, 31, 9, 0, 0).unwrap();
        assert_eq!(date(&days_before(&at, 30)), "2025-03-01");
        assert_eq!(days_before(&at, 0), at);
    }

    #[test]
    fn days_before_clamps_out_of_range_windows() {
        let at = now();
        let earliest = DateTime::<Utc>::MIN_UTC.with_timezone(&REFERENCE_TZ);
        assert_eq!(days_before(&at, 200_000_000), earliest);
        assert_eq!(days_before(&at, u32::MAX), earliest);
    }

    #[test]
    fn now_is_in_reference_timezone() {
        assert_eq!(now().timezone(), REFERENCE_TZ);
    }
}
