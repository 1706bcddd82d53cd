//! Default directory paths for forum-checkin.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! # Environment Overrides
//!
//! - `CHECKIN_DATA_DIR`: overrides [`data_dir`]
//! - `CHECKIN_CONFIG_DIR`: overrides [`config_dir`]

use std::path::PathBuf;

const APP_DIR: &str = "forum-checkin";

/// Application data root directory.
///
/// Resolves to `dirs::data_dir()/forum-checkin/` by default. Override with
/// the `CHECKIN_DATA_DIR` environment variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CHECKIN_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/forum-checkin-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/forum-checkin/` by default. Override with
/// the `CHECKIN_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CHECKIN_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/forum-checkin-config"))
}

/// Audit log directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
