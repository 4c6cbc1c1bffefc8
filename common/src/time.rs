//! Time utilities for QP Bank records.

use chrono::{DateTime, Duration, Local, Utc};
use parking_lot::Mutex;

/// A timestamp with timezone (always stored as UTC).
pub type Timestamp = DateTime<Utc>;

/// Display format for record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp in local time, e.g. `2024-03-01 14:05:09`.
pub fn format_local(timestamp: Timestamp) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Source of wall-clock time for the ledger.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current wall-clock time.
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the clock by `delta` (may be negative).
    pub fn advance(&self, delta: Duration) {
        let mut current = self.current.lock();
        *current = *current + delta;
    }

    /// Jump to an absolute time.
    pub fn set(&self, timestamp: Timestamp) {
        *self.current.lock() = timestamp;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
