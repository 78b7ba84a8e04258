//! Builder pattern for MotorDriver.

use core::time::Duration;

use embedded_hal::digital::OutputPin;

use crate::config::MotorConfig;
use crate::error::{ConfigError, Error, Result};

use super::driver::MotorDriver;
use super::pwm::PwmTiming;

/// Builder for creating MotorDriver instances.
pub struct MotorDriverBuilder<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    pin_a: Option<A>,
    pin_b: Option<B>,
    pwm: Option<PwmTiming>,
}

impl<A, B> Default for MotorDriverBuilder<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, B> MotorDriverBuilder<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    /// Create a new builder (full speed until told otherwise).
    pub fn new() -> Self {
        Self {
            pin_a: None,
            pin_b: None,
            pwm: None,
        }
    }

    /// Set bridge input A (high = reverse).
    pub fn pin_a(mut self, pin: A) -> Self {
        self.pin_a = Some(pin);
        self
    }

    /// Set bridge input B (high = forward).
    pub fn pin_b(mut self, pin: B) -> Self {
        self.pin_b = Some(pin);
        self
    }

    /// Time-slice the pins with the given on/off phases.
    pub fn speed_control(mut self, on_time: Duration, off_time: Duration) -> Self {
        self.pwm = Some(PwmTiming::new(on_time, off_time));
        self
    }

    /// Drive at constant levels.
    pub fn full_speed(mut self) -> Self {
        self.pwm = None;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.pwm = PwmTiming::from_config(config);
        self
    }

    /// Build the MotorDriver.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin is missing.
    pub fn build(self) -> Result<MotorDriver<A, B>> {
        let pin_a = self
            .pin_a
            .ok_or(Error::Config(ConfigError::MissingField("pin_a")))?;

        let pin_b = self
            .pin_b
            .ok_or(Error::Config(ConfigError::MissingField("pin_b")))?;

        Ok(MotorDriver::new(pin_a, pin_b, self.pwm))
    }
}
