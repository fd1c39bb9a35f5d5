//! Simulation time management
//!
//! Virtual time is decoupled from wall-clock time: a run over a 100-second
//! horizon finishes in however long the event loop takes. [`SimTime`] is the
//! clock value the engine advances through arrival and departure events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

/// A point in simulation time, stored as nanoseconds since the start of the
/// run.
///
/// `SimTime` is totally ordered, which lets pending departure times live in
/// an ordered structure, and its arithmetic saturates so the clock can never
/// move backwards through an underflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    /// The start of the simulation (time zero).
    pub const fn zero() -> Self {
        SimTime(0)
    }

    /// Create a `SimTime` from raw nanoseconds.
    pub const fn from_nanos(nanos: u64) -> Self {
        SimTime(nanos)
    }

    /// Create a `SimTime` from milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        SimTime(millis * 1_000_000)
    }

    /// Create a `SimTime` from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        SimTime(secs * 1_000_000_000)
    }

    /// Create a `SimTime` from fractional seconds.
    ///
    /// # Panics
    ///
    /// Panics if `secs` is negative, non-finite, or overflows the nanosecond
    /// range, mirroring [`Duration::from_secs_f64`].
    pub fn from_secs_f64(secs: f64) -> Self {
        SimTime::from_duration(Duration::from_secs_f64(secs))
    }

    /// Create a `SimTime` from a [`Duration`] offset from time zero.
    pub fn from_duration(duration: Duration) -> Self {
        SimTime(duration.as_nanos() as u64)
    }

    /// The raw nanosecond value.
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// This time as fractional seconds since the start of the run.
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1e9
    }

    /// This time as an offset from time zero.
    pub fn as_duration(&self) -> Duration {
        Duration::from_nanos(self.0)
    }

    /// Elapsed time since `earlier`, saturating to zero if `earlier` is in
    /// fact later.
    pub fn duration_since(&self, earlier: SimTime) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }
}

impl Add<SimTime> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> Self::Output {
        SimTime(self.0.saturating_add(rhs.0))
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> Self::Output {
        SimTime(self.0.saturating_add(rhs.as_nanos() as u64))
    }
}

impl Sub<SimTime> for SimTime {
    type Output = Duration;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl Sub<Duration> for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: Duration) -> Self::Output {
        SimTime(self.0.saturating_sub(rhs.as_nanos() as u64))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.9}s", self.as_secs_f64())
    }
}
