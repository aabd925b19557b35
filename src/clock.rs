//! Time source abstraction
//!
//! Rotation and retention decisions depend on "now". Production code reads the
//! system clock; tests pin it with [`FixedClock`].

use chrono::{DateTime, Local};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// System clock - uses real time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
