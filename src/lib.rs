//! pos-sim - point-of-sale flow simulation with daily log rotation
//!
//! This library provides the log rotation, log sink and simulated POS
//! providers used by the `pos-sim` binary.

pub mod clock;
pub mod config;
pub mod logging;
pub mod pos;
