//! Motor configuration from TOML.

use serde::Deserialize;

use crate::motor::PwmTiming;

use super::units::Seconds;

/// Motor output and software PWM settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Time-slice the motor pins for reduced speed.
    pub use_speed_control: bool,

    /// PWM on phase. Lower is slower.
    pub on_time: Seconds,

    /// PWM off phase. Higher is slower.
    pub off_time: Seconds,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            use_speed_control: true,
            on_time: Seconds(0.008),
            off_time: Seconds(0.025),
        }
    }
}

impl MotorConfig {
    /// Average fraction of time the motor is energized while running.
    ///
    /// `1.0` without speed control.
    pub fn duty_cycle(&self) -> f32 {
        PwmTiming::effective_duty(PwmTiming::from_config(self).as_ref())
    }

    /// Effective speed as a whole percentage of full speed.
    pub fn speed_percent(&self) -> u8 {
        PwmTiming::speed_percent(PwmTiming::from_config(self).as_ref())
    }
}
