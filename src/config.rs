//! Log directory configuration.
//!
//! Reads configuration from environment variables with built-in defaults.
//! Only the dump log directory is configurable; everything else about the
//! registry is set through its constructor.

use std::path::PathBuf;

/// Environment variable naming the dump log directory.
pub const LOG_DIR_ENV: &str = "TIMEKEEP_LOG_DIR";

/// Log directory used when [`LOG_DIR_ENV`] is unset.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Timekeep configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory receiving `timer_<timestamp>.log` artifacts.
    pub log_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let log_dir = std::env::var(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));
        Self { log_dir }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}
