//! Box configuration - root configuration structure.

use serde::Deserialize;

use super::behavior::BehaviorConfig;
use super::inputs::InputConfig;
use super::motor::MotorConfig;
use super::timing::TimingConfig;

/// Root configuration structure from TOML.
///
/// Every section is optional; missing sections and keys fall back to the
/// values the box was originally tuned with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    /// Motor output and PWM settings.
    pub motor: MotorConfig,

    /// Random start delay and mid-extension pause.
    pub behavior: BehaviorConfig,

    /// Poll cadence and settle delay.
    pub timing: TimingConfig,

    /// Switch polarity.
    pub inputs: InputConfig,
}

impl BoxConfig {
    /// Effective motor speed as a percentage of full speed.
    pub fn speed_percent(&self) -> u8 {
        self.motor.speed_percent()
    }
}
