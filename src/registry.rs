//! Name-addressed timer registry.
//!
//! All mutation lives here: timers are created, checkpointed, finalized and
//! dumped by name, so callers never hold timer objects across the code they
//! are measuring. The map is guarded by a single mutex; instrumentation call
//! frequency is low enough that finer-grained locking buys nothing.
//!
//! Unknown names never fail. Lookups fall back to a synthesized
//! "since process start" record (see [`TimerRegistry::get_or_fallback`]),
//! which keeps error paths free of defensive existence checks at the cost of
//! silently absorbing typos in timer names.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::pretty;
use crate::record::TimerRecord;
use crate::sink::{self, FileSink, Sink};

/// Decimal places used by `stop` and `checkpoint` unless overridden.
pub const DEFAULT_DECIMALS: usize = 5;

/// Description given to records synthesized for unknown names.
const FALLBACK_DESCRIPTION: &str = "Timer since process start";

/// Precision used when `dump` force-finalizes still-running timers.
/// Intentionally not configurable per call.
const DUMP_DECIMALS: usize = 5;

/// Mapping from timer name to [`TimerRecord`], plus the clock it reads.
///
/// Create one per test with [`TimerRegistry::with_clock`], or use the shared
/// process-wide instance via [`global`].
pub struct TimerRegistry {
    timers: Mutex<BTreeMap<String, TimerRecord>>,
    clock: Box<dyn Clock>,
    fallback_start: Option<f64>,
}

impl TimerRegistry {
    /// Registry on the system wall clock with no fallback start time.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Registry on a caller-supplied clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            timers: Mutex::new(BTreeMap::new()),
            clock: Box::new(clock),
            fallback_start: None,
        }
    }

    /// Set the process-start timestamp used as the origin of fallback
    /// records. Without it, fallback records start at the lookup time.
    pub fn fallback_start(mut self, secs: f64) -> Self {
        self.fallback_start = Some(secs);
        self
    }

    /// Create (or overwrite) the timer `name`, started now.
    ///
    /// Starting a name that is already running or finished discards the old
    /// record including its checkpoints. Callers must use unique names per
    /// logical timer lifespan or accept the loss. Empty or whitespace-only
    /// names are a caller contract violation and get no special handling.
    pub fn start(&self, name: &str, description: Option<&str>) {
        let now = self.clock.now_secs();
        let record = TimerRecord::new(now, description.map(str::to_string));
        self.lock().insert(name.to_string(), record);
    }

    /// Stop the timer `name` with [`DEFAULT_DECIMALS`] precision.
    pub fn stop(&self, name: &str) -> TimerRecord {
        self.stop_with_decimals(name, DEFAULT_DECIMALS)
    }

    /// Stop the timer `name` and return the finalized record.
    ///
    /// The clock is read before the map is touched, so lock contention does
    /// not skew the measurement. Elapsed time is stored in milliseconds,
    /// formatted to `decimals` places. Stopping a never-started name
    /// finalizes a fresh fallback record; stopping twice re-finalizes from
    /// the original start to the new end (the calls do not accumulate).
    pub fn stop_with_decimals(&self, name: &str, decimals: usize) -> TimerRecord {
        let end = self.clock.now_secs();
        let mut timers = self.lock();
        let mut record = timers
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.fallback_record(end));
        record.finalize_millis(end, decimals);
        timers.insert(name.to_string(), record.clone());
        record
    }

    /// Append a checkpoint to `name` with [`DEFAULT_DECIMALS`] precision.
    pub fn checkpoint(&self, name: &str, description: Option<&str>) {
        self.checkpoint_with_decimals(name, description, DEFAULT_DECIMALS)
    }

    /// Append a checkpoint to the timer `name`.
    ///
    /// An unknown name is resolved to a fallback record which *is* stored,
    /// so later checkpoints against the same name accumulate on one record.
    /// `timeFromStart` is always computed; `timeFromLastCheckpoint` only from
    /// the second checkpoint on.
    pub fn checkpoint_with_decimals(
        &self,
        name: &str,
        description: Option<&str>,
        decimals: usize,
    ) {
        let end = self.clock.now_secs();
        let mut timers = self.lock();
        let record = timers
            .entry(name.to_string())
            .or_insert_with(|| self.fallback_record(end));
        record.push_checkpoint(end, description.map(str::to_string), decimals);
    }

    /// Look up `name`, or synthesize a fallback record without storing it.
    ///
    /// The fallback describes itself as running since process start and
    /// begins at the configured fallback start time, or at the lookup time
    /// when none is configured. Because every name resolves, a typo in a
    /// timer name is silently absorbed rather than reported.
    pub fn get_or_fallback(&self, name: &str) -> TimerRecord {
        let now = self.clock.now_secs();
        self.lock()
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.fallback_record(now))
    }

    /// Strict lookup: `None` for names that were never started.
    pub fn get_existing(&self, name: &str) -> Option<TimerRecord> {
        self.lock().get(name).cloned()
    }

    /// Finalize every still-running timer and return the full snapshot.
    ///
    /// Running records get `end` set to a single clock reading captured on
    /// entry and their elapsed time formatted in seconds at [`DUMP_DECIMALS`]
    /// precision. Records that already finished are left untouched; their
    /// elapsed values are not recomputed against the dump-time clock.
    pub fn dump(&self) -> BTreeMap<String, TimerRecord> {
        let end = self.clock.now_secs();
        let mut timers = self.lock();
        for record in timers.values_mut() {
            if record.is_running() {
                record.finalize_secs(end, DUMP_DECIMALS);
            }
        }
        timers.clone()
    }

    /// Dump, pretty-print and append the snapshot to a log artifact.
    ///
    /// The artifact is `<log_dir>/timer_<YYYY-MM-DD_HHMMSS>.log`; append
    /// semantics mean repeated dumps never clobber earlier ones, though two
    /// dumps within the same second share one file. A sink failure is
    /// returned as an error; the in-memory finalization from the dump step
    /// is kept either way.
    pub fn write(&self, sink: &dyn Sink, log_dir: &Path) -> Result<PathBuf> {
        let snapshot = self.dump();
        let compact =
            serde_json::to_string(&snapshot).context("Failed to serialize timer dump")?;
        let formatted = pretty::reindent(&compact);

        let path = log_dir.join(sink::log_file_name()?);
        sink.append(&path, &formatted)
            .with_context(|| format!("Failed to write timer dump to {}", path.display()))?;
        Ok(path)
    }

    /// [`write`](Self::write) to a [`FileSink`] under the configured log
    /// directory (`TIMEKEEP_LOG_DIR`, default `logs`).
    pub fn write_default(&self) -> Result<PathBuf> {
        let config = Config::from_env();
        self.write(&FileSink, &config.log_dir)
    }

    /// Remove every timer. The only way to drop records; there is no
    /// per-name deletion.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn fallback_record(&self, now: f64) -> TimerRecord {
        TimerRecord::new(
            self.fallback_start.unwrap_or(now),
            Some(FALLBACK_DESCRIPTION.to_string()),
        )
    }

    // A poisoned lock still holds usable timer data; instrumentation should
    // never take the process down.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, TimerRecord>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<TimerRegistry> = OnceLock::new();

/// Shared process-wide registry on the system clock.
///
/// Initialized on first use, or explicitly via [`init_global`] to configure
/// a fallback start time for the whole process.
pub fn global() -> &'static TimerRegistry {
    GLOBAL.get_or_init(TimerRegistry::new)
}

/// Install a configured registry as the process-wide instance.
///
/// Returns false if the global registry was already initialized, in which
/// case `registry` is dropped and the existing instance stays in place.
pub fn init_global(registry: TimerRegistry) -> bool {
    GLOBAL.set(registry).is_ok()
}
