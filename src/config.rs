//! Configuration for the check-in and statistics runs.

use crate::error::{CheckinError, Result};
use forum_api::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration, read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckinConfig {
    /// HTTP client settings (timeouts, User-Agent).
    pub http: ClientConfig,
    /// Audit log settings.
    pub log: LogConfig,
    /// Attendance retry settings.
    pub attendance: AttendanceConfig,
}

/// Audit log configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for daily audit files (None = `paths::logs_dir()`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl LogConfig {
    /// Directory audit files are written to.
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(crate::paths::logs_dir)
    }
}

/// Attendance retry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceConfig {
    /// Fixed pause between attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: crate::attendance::RETRY_DELAY_MS,
        }
    }
}

impl AttendanceConfig {
    /// Pause between attempts.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl CheckinConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CheckinError::Config(e.to_string()))
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else defaults. The result is validated.
    ///
    /// An explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = crate::paths::config_file();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`CheckinError::Api`] when the HTTP section is invalid.
    pub fn validate(&self) -> Result<()> {
        self.http.validate()?;
        Ok(())
    }
}
