//! Commanded motor direction.

use core::fmt;

/// Direction the motor is commanded to turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Both bridge inputs low.
    #[default]
    Stopped,
    /// Extending the arm.
    Forward,
    /// Retracting the arm.
    Reverse,
}

impl Direction {
    /// Pin pair `(a, b)` that drives the motor this way at full power.
    ///
    /// Never `(true, true)`.
    #[inline]
    pub const fn levels(self) -> (bool, bool) {
        match self {
            Direction::Stopped => (false, false),
            Direction::Forward => (false, true),
            Direction::Reverse => (true, false),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Stopped => write!(f, "stopped"),
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}
