//! Where "now" comes from when an entry doesn't say when it was modified.

use chrono::Utc;

/// A source of the current time, in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> i64;
}

/// The system's wall clock
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock stuck at the given timestamp, for reproducible archives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now(&self) -> i64 {
        self()
    }
}
