//! services/api/src/adapters/clock.rs
//!
//! Implementations of the core `Clock` port.

use chrono::{Local, NaiveDateTime};
use guesthouse_core::ports::Clock;

/// The host's local wall clock. The guest house runs on local dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant, for tests and reproducible snapshots.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
