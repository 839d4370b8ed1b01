//! Timekeep - named-timer instrumentation registry.
//!
//! Measures elapsed durations of labeled operations without handing timer
//! objects to the caller: timers are addressed by name through a registry.
//! A timer records its start and end timestamps plus any number of
//! intermediate checkpoints; dumping the registry force-finalizes whatever
//! is still running and can persist a pretty-printed JSON snapshot to an
//! append-only log artifact.
//!
//! ```
//! use std::sync::Arc;
//! use timekeep::{ManualClock, TimerRegistry};
//!
//! let clock = Arc::new(ManualClock::new(100.0));
//! let timers = TimerRegistry::with_clock(Arc::clone(&clock));
//!
//! timers.start("build", Some("compile step"));
//! clock.advance(0.25);
//! timers.checkpoint_with_decimals("build", Some("parsed"), 3);
//! clock.advance(0.55);
//!
//! let record = timers.stop_with_decimals("build", 3);
//! assert_eq!(record.time.as_deref(), Some("800.000"));
//! assert_eq!(record.checkpoints[0].time_from_start, "0.250");
//! ```
//!
//! For production use the process-wide instance is available through
//! [`registry::global`], backed by the system wall clock.

pub mod clock;
pub mod config;
pub mod pretty;
pub mod record;
pub mod registry;
pub mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use record::{Checkpoint, TimerRecord};
pub use registry::{global, init_global, TimerRegistry, DEFAULT_DECIMALS};
pub use sink::{FileSink, Sink};
