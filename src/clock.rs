//! Monotonic time source.
//!
//! The core never reads wall-clock time. Every elapsed-time decision (PWM
//! phase flips, pause trigger, pause resume) compares two [`Instant`]s taken
//! from the same [`Clock`].

use core::fmt;
use core::ops::Add;
use core::time::Duration;

use embedded_hal::delay::DelayNs;

/// A point on a monotonic timeline, in microseconds from an arbitrary origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(u64);

impl Instant {
    /// The timeline origin.
    pub const ZERO: Self = Self(0);

    /// Create from microseconds since the origin.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create from milliseconds since the origin.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1000)
    }

    /// Microseconds since the origin.
    #[inline]
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub fn duration_since(self, earlier: Instant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        let micros = u64::try_from(rhs.as_micros()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(micros))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// Monotonic time source.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Block on `delay` for `duration`, in microsecond steps.
pub(crate) fn block_for<D: DelayNs>(delay: &mut D, duration: Duration) {
    let mut remaining = duration.as_micros();
    while remaining > 0 {
        let step = u32::try_from(remaining).unwrap_or(u32::MAX);
        delay.delay_us(step);
        remaining -= u128::from(step);
    }
}

/// Clock backed by `std::time::Instant`, counting from its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        let micros = u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX);
        Instant::from_micros(micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_since_saturates() {
        let early = Instant::from_millis(100);
        let late = Instant::from_millis(350);
        assert_eq!(late.duration_since(early), Duration::from_millis(250));
        assert_eq!(early.duration_since(late), Duration::ZERO);
    }

    #[test]
    fn test_add_duration() {
        let t = Instant::from_millis(50) + Duration::from_micros(8_000);
        assert_eq!(t.as_micros(), 58_000);
    }

    #[derive(Default)]
    struct RecordingDelay {
        calls: heapless::Vec<u32, 4>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.delay_us(ns / 1000);
        }

        fn delay_us(&mut self, us: u32) {
            let _ = self.calls.push(us);
        }
    }

    #[test]
    fn test_block_for_splits_long_waits() {
        let mut delay = RecordingDelay::default();
        block_for(&mut delay, Duration::from_micros(u64::from(u32::MAX) + 1));
        block_for(&mut delay, Duration::ZERO);
        assert_eq!(delay.calls.as_slice(), &[u32::MAX, 1]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(clock.now() > a);
    }
}
