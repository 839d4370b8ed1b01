//! Append-only output for pretty-printed timer dumps.
//!
//! The registry hands a formatted snapshot to a [`Sink`]; the default
//! [`FileSink`] appends to a log file whose name carries the dump moment at
//! second granularity. Appending (never truncating) means a filename
//! collision between two dumps in the same second stacks the dumps instead
//! of losing one.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use time::macros::format_description;
use time::OffsetDateTime;

/// Destination for a formatted dump.
pub trait Sink {
    /// Append `content` to the artifact at `path`, creating it if needed.
    fn append(&self, path: &Path, content: &str) -> Result<()>;
}

/// Appends to regular files, creating parent directories as needed.
pub struct FileSink;

impl Sink for FileSink {
    fn append(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {} for append", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to append to {}", path.display()))?;
        Ok(())
    }
}

/// Artifact name for a dump happening now: `timer_<YYYY-MM-DD_HHMMSS>.log`.
pub fn log_file_name() -> Result<String> {
    log_file_name_at(OffsetDateTime::now_utc())
}

fn log_file_name_at(at: OffsetDateTime) -> Result<String> {
    let format = format_description!("[year]-[month]-[day]_[hour][minute][second]");
    let stamp = at
        .format(&format)
        .context("Failed to format dump timestamp")?;
    Ok(format!("timer_{stamp}.log"))
}
