//! Unit types for configured time quantities.
//!
//! Configuration is written in fractional seconds, the way a person tunes a
//! box by hand. Runtime code works with [`core::time::Duration`]; conversion
//! happens once, when a component is built from its config section.

use core::fmt;
use core::time::Duration;

use libm::round;
use serde::Deserialize;

/// A span of time in seconds, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f32);

impl Seconds {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Whether this is a usable duration (finite and not negative).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// Convert to a runtime duration, rounded to the microsecond.
    ///
    /// Values that fail [`Seconds::is_valid`] convert to zero; validation
    /// rejects them before any component is built.
    #[inline]
    pub fn to_duration(self) -> Duration {
        if !self.is_valid() {
            return Duration::ZERO;
        }
        Duration::from_micros(round(self.0 as f64 * 1_000_000.0) as u64)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Inclusive `[min, max]` range a random delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DelayRange {
    /// Shortest delay.
    pub min: Seconds,
    /// Longest delay.
    pub max: Seconds,
}

impl DelayRange {
    /// Create a new delay range.
    pub const fn new(min: Seconds, max: Seconds) -> Self {
        Self { min, max }
    }

    /// Range expressed in plain seconds.
    pub const fn secs(min: f32, max: f32) -> Self {
        Self::new(Seconds(min), Seconds(max))
    }

    /// Check the range is usable (both ends valid, min <= max).
    pub fn is_valid(&self) -> bool {
        self.min.is_valid() && self.max.is_valid() && self.min.0 <= self.max.0
    }

    /// Check if a duration falls inside the range.
    pub fn contains(&self, d: Duration) -> bool {
        d >= self.min.to_duration() && d <= self.max.to_duration()
    }
}
