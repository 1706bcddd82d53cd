//! Append-only daily audit log.
//!
//! [`AuditLog`] appends one line per event to `<dir>/YYYY-MM-DD.log`, where
//! the date is today's date in the reference timezone. The file name is
//! resolved on every write, so a run that crosses midnight continues in the
//! next day's file.
//!
//! # Format
//!
//! ```text
//! [YYYY-MM-DD HH:MM:SS] message\n
//! ```
//!
//! Credentials must be passed through [`mask_credential`] before they reach
//! a log line.

use crate::clock;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Chunk size used when logging (or redacting) long response bodies.
pub const BODY_CHUNK_CHARS: usize = 2000;

/// Placeholder written instead of hidden content.
pub const HIDDEN: &str = "（隐藏）";

/// Daily audit log writer.
#[derive(Debug, Clone)]
pub struct AuditLog {
    dir: PathBuf,
}

impl AuditLog {
    /// Use `dir` for audit files, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory audit files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of today's audit file.
    #[must_use]
    pub fn today_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", clock::date(&clock::now())))
    }

    /// Append one timestamped line and flush it.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be opened or written.
    pub fn write(&self, message: &str) -> io::Result<()> {
        let now = clock::now();
        let path = self.dir.join(format!("{}.log", clock::date(&now)));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "[{}] {message}", clock::timestamp(&now))?;
        file.flush()?;
        tracing::debug!(target: "audit", "{message}");
        Ok(())
    }
}

/// Mask a credential for logging: `first8...last5` when longer than 15
/// characters, otherwise unchanged.
#[must_use]
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 15 {
        return credential.to_owned();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{head}...{tail}")
}

/// Split `text` into pieces of at most `chunk_chars` characters.
///
/// Empty input yields no chunks.
#[must_use]
pub fn chunk_str(text: &str, chunk_chars: usize) -> Vec<&str> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == chunk_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}
