//! Clock sources for timestamp capture.
//!
//! The registry never reads the system clock directly; it goes through the
//! [`Clock`] trait so that tests and simulations can drive time by hand.
//! Wall-clock time is acceptable for real use: durations are short-lived and
//! process-local, and only subtraction of two readings matters.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the current time as fractional seconds.
///
/// Implementations must be monotonic enough that two calls ordered in real
/// time yield `second >= first`.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}

/// Wall-clock seconds since the Unix epoch.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            // a host clock set before 1970 is not a supported deployment
            .unwrap_or(0.0)
    }
}

/// Caller-driven clock for tests and simulation.
///
/// Every read returns the current reading; advance it with [`set`] or
/// [`advance`] between operations. Share it with a registry via `Arc`:
///
/// ```
/// use std::sync::Arc;
/// use timekeep::{Clock, ManualClock};
///
/// let clock = Arc::new(ManualClock::new(100.0));
/// clock.advance(0.25);
/// assert_eq!(clock.now_secs(), 100.25);
/// ```
///
/// [`set`]: ManualClock::set
/// [`advance`]: ManualClock::advance
pub struct ManualClock {
    current: Mutex<f64>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Set the clock to an absolute reading.
    pub fn set(&self, secs: f64) {
        *self.lock() = secs;
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        *self.lock() += secs;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, f64> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_ordered() {
        let clock = SystemClock;
        let first = clock.now_secs();
        let second = clock.now_secs();
        assert!(second >= first);
        assert!(first > 0.0);
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(10.0);
        assert_eq!(clock.now_secs(), 10.0);

        clock.advance(2.5);
        assert_eq!(clock.now_secs(), 12.5);

        clock.set(100.0);
        assert_eq!(clock.now_secs(), 100.0);
    }

    #[test]
    fn test_manual_clock_through_arc() {
        let clock = Arc::new(ManualClock::new(1.0));
        let shared: Arc<ManualClock> = Arc::clone(&clock);
        clock.advance(1.0);
        assert_eq!(shared.now_secs(), 2.0);
    }
}
