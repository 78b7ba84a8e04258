//! Sampled switch with edge detection.

use core::fmt;

use embedded_hal::digital::InputPin;

use crate::error::{Error, InputError, Result};

/// A labelled switch level.
pub trait SwitchLevel: Copy + PartialEq + fmt::Debug {
    /// Channel name for logs and errors.
    const CHANNEL: &'static str;

    /// Label for a reading where the channel is in its active position.
    fn from_active(active: bool) -> Self;
}

/// Toggle switch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleLevel {
    /// Disarmed.
    Low,
    /// Armed: the arm should come out.
    High,
}

impl SwitchLevel for ToggleLevel {
    const CHANNEL: &'static str = "toggle";

    fn from_active(active: bool) -> Self {
        if active {
            ToggleLevel::High
        } else {
            ToggleLevel::Low
        }
    }
}

impl fmt::Display for ToggleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleLevel::Low => write!(f, "LOW"),
            ToggleLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Limit switch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitLevel {
    /// Arm away from home.
    Released,
    /// Arm fully retracted.
    Pressed,
}

impl SwitchLevel for LimitLevel {
    const CHANNEL: &'static str = "limit";

    fn from_active(active: bool) -> Self {
        if active {
            LimitLevel::Pressed
        } else {
            LimitLevel::Released
        }
    }
}

impl fmt::Display for LimitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitLevel::Released => write!(f, "RELEASED"),
            LimitLevel::Pressed => write!(f, "PRESSED"),
        }
    }
}

/// One poll of a switch: the current level and the level one poll earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample<L> {
    /// Level read this poll.
    pub level: L,
    /// Level read the previous poll.
    pub previous: L,
}

impl<L: SwitchLevel> Sample<L> {
    /// Whether the level changed since the previous poll.
    #[inline]
    pub fn changed(&self) -> bool {
        self.level != self.previous
    }

    /// The new level, if the switch moved.
    #[inline]
    pub fn edge(&self) -> Option<L> {
        self.changed().then_some(self.level)
    }

    /// Whether the switch just moved into `level`.
    #[inline]
    pub fn entered(&self, level: L) -> bool {
        self.changed() && self.level == level
    }
}

/// An input pin read as a labelled switch, remembering the last level.
pub struct Switch<P, L>
where
    P: InputPin,
    L: SwitchLevel,
{
    /// Input pin (pull-up configured by the board layer).
    pin: P,

    /// Raw level that maps to the active label.
    active_level: bool,

    /// Level seen on the previous poll.
    last: Option<L>,
}

impl<P, L> Switch<P, L>
where
    P: InputPin,
    L: SwitchLevel,
{
    /// Wrap a pin; `active_level` is the raw reading for the active label.
    pub fn new(pin: P, active_level: bool) -> Self {
        Self {
            pin,
            active_level,
            last: None,
        }
    }

    /// Read the raw pin level, without touching the edge cache.
    pub fn read_raw(&mut self) -> Result<bool> {
        self.pin
            .is_high()
            .map_err(|_| Error::Input(InputError::PinError { switch: L::CHANNEL }))
    }

    /// Read the labelled level, without touching the edge cache.
    pub fn read(&mut self) -> Result<L> {
        let raw = self.read_raw()?;
        Ok(L::from_active(raw == self.active_level))
    }

    /// Read the level and seed the edge cache with it.
    ///
    /// Whatever the switch reads at startup is taken as its resting level,
    /// so no edge is reported for it.
    pub fn prime(&mut self) -> Result<L> {
        let level = self.read()?;
        self.last = Some(level);
        Ok(level)
    }

    /// Poll the switch and compare against the previous poll.
    ///
    /// The first poll of an unprimed switch primes it.
    pub fn sample(&mut self) -> Result<Sample<L>> {
        let level = self.read()?;
        let previous = self.last.unwrap_or(level);
        self.last = Some(level);
        Ok(Sample { level, previous })
    }

    /// Release the pin.
    pub fn release(self) -> P {
        self.pin
    }
}
