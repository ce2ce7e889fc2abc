//! Injectable time source.
//!
//! Anything that needs "now" (the daily task schedule, completion stamps,
//! adoption date checks) reads it through [`Clock`] so tests can pin time.

use std::sync::Mutex;

use chrono::Utc;

use crate::types::{Date, Timestamp};

/// A source of the current UTC instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// The current UTC calendar date.
    fn today(&self) -> Date {
        self.now().date_naive()
    }
}

/// Wall-clock time via [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: Timestamp) {
        *self.lock() = now;
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.lock();
        *guard += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timestamp> {
        // A poisoned lock still holds a valid timestamp.
        self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.lock()
    }
}
