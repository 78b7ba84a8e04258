//! Poll cadence and fixed delays.

use serde::Deserialize;

use super::units::Seconds;

/// Fixed timing of the polling loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Sleep between two polls of the switches.
    pub tick_period: Seconds,

    /// Motor-off pause between stopping and reversing.
    pub settle_delay: Seconds,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_period: Seconds(0.05),
            settle_delay: Seconds(0.2),
        }
    }
}
