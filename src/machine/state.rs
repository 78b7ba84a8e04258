//! Arm states.

use core::fmt;

/// Where the arm is in its cycle.
///
/// Closed set: every match over it is exhaustive, so there is no "unknown
/// state" to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmState {
    /// Motor stopped, arm home, waiting for the toggle.
    #[default]
    Idle,
    /// Motor forward, arm on its way to the toggle.
    Extending,
    /// Motor stopped mid-extension for a while.
    ExtendingPaused,
    /// Motor reverse, arm on its way home.
    Retracting,
}

impl ArmState {
    /// Whether the arm is out (or heading out) for the toggle.
    #[inline]
    pub const fn is_extending(self) -> bool {
        matches!(self, ArmState::Extending | ArmState::ExtendingPaused)
    }

    /// Upper-case label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            ArmState::Idle => "IDLE",
            ArmState::Extending => "EXTENDING",
            ArmState::ExtendingPaused => "EXTENDING_PAUSED",
            ArmState::Retracting => "RETRACTING",
        }
    }
}

impl fmt::Display for ArmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
