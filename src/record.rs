//! Timer and checkpoint value types.
//!
//! These are plain data carriers; all mutation goes through
//! [`TimerRegistry`](crate::registry::TimerRegistry). The serde shape matches
//! the dump artifact: `description`, `start`, `end`, `time`, `checkpoints`,
//! with checkpoint keys `description`, `end`, `timeFromStart` and (from the
//! second checkpoint on) `timeFromLastCheckpoint`.

use serde::{Deserialize, Serialize};

/// Fixed-point decimal formatting, locale-independent.
///
/// Always uses `.` as the decimal point regardless of the process locale.
pub(crate) fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// One intra-timer marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Optional caller-supplied label.
    pub description: Option<String>,
    /// Timestamp (seconds) at checkpoint time.
    pub end: f64,
    /// Seconds since the owning timer started, fixed-point formatted.
    #[serde(rename = "timeFromStart")]
    pub time_from_start: String,
    /// Seconds since the previous checkpoint; absent on the first checkpoint.
    #[serde(
        rename = "timeFromLastCheckpoint",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub time_from_last_checkpoint: Option<String>,
}

/// Full state of one named timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerRecord {
    /// Optional caller-supplied label, set at start, immutable thereafter.
    pub description: Option<String>,
    /// Timestamp (seconds) at creation, immutable.
    pub start: f64,
    /// Timestamp (seconds) at stop/finalize; `None` while running.
    pub end: Option<f64>,
    /// Formatted elapsed value; `None` while running. Set together with
    /// `end`, never one without the other. Milliseconds when finalized by
    /// `stop`, seconds when force-finalized by `dump`.
    pub time: Option<String>,
    /// Append-only, in insertion order.
    pub checkpoints: Vec<Checkpoint>,
}

impl TimerRecord {
    pub(crate) fn new(start: f64, description: Option<String>) -> Self {
        Self {
            description,
            start,
            end: None,
            time: None,
            checkpoints: Vec::new(),
        }
    }

    /// Returns true while the timer has not been finalized.
    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Finalize with elapsed time in milliseconds (explicit stop).
    ///
    /// Overwrites any previous finalization: the original start and the new
    /// end are used, so repeated stops re-measure rather than accumulate.
    pub(crate) fn finalize_millis(&mut self, end: f64, decimals: usize) {
        self.end = Some(end);
        self.time = Some(format_fixed((end - self.start) * 1000.0, decimals));
    }

    /// Finalize with elapsed time in seconds (forced finalize during dump).
    pub(crate) fn finalize_secs(&mut self, end: f64, decimals: usize) {
        self.end = Some(end);
        self.time = Some(format_fixed(end - self.start, decimals));
    }

    /// Append a checkpoint at `end` seconds.
    ///
    /// `timeFromLastCheckpoint` is computed against the previous checkpoint's
    /// raw `end` timestamp, not its formatted value.
    pub(crate) fn push_checkpoint(
        &mut self,
        end: f64,
        description: Option<String>,
        decimals: usize,
    ) {
        let time_from_last_checkpoint = self
            .checkpoints
            .last()
            .map(|prev| format_fixed(end - prev.end, decimals));

        self.checkpoints.push(Checkpoint {
            description,
            end,
            time_from_start: format_fixed(end - self.start, decimals),
            time_from_last_checkpoint,
        });
    }
}
