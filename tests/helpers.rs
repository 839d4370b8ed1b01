//! Shared test utilities for timekeep tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use timekeep::{ManualClock, TimerRegistry};

/// Test environment with a manual clock and a temporary log directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Log directory for dump artifacts
    pub log_dir: PathBuf,
    /// Clock shared with the registry
    pub clock: Arc<ManualClock>,
    /// Registry under test
    pub timers: TimerRegistry,
}

impl TestEnv {
    /// Create a fresh environment with the clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_dir = temp_dir.path().join("logs");

        let clock = Arc::new(ManualClock::new(start));
        let timers = TimerRegistry::with_clock(Arc::clone(&clock));

        Self {
            _temp_dir: temp_dir,
            log_dir,
            clock,
            timers,
        }
    }
}

/// All dump artifacts currently in `log_dir`, sorted by name.
pub fn log_files(log_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(log_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}
