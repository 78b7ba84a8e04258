//! Two-pin DC motor driver.
//!
//! Generic over embedded-hal 1.0 output pins. Pin A and pin B feed the two
//! direction inputs of an H-bridge whose enables are tied high:
//!
//! | Direction | A    | B    |
//! |-----------|------|------|
//! | Stopped   | low  | low  |
//! | Forward   | low  | high |
//! | Reverse   | high | low  |

use embedded_hal::digital::OutputPin;

use crate::clock::Instant;
use crate::config::MotorConfig;
use crate::error::{MotorError, Result};

use super::builder::MotorDriverBuilder;
use super::direction::Direction;
use super::pwm::{PwmPhase, PwmTiming};

/// DC motor driver with optional software PWM.
///
/// Generic over:
/// - `A`: first bridge input (must implement `OutputPin`)
/// - `B`: second bridge input (must implement `OutputPin`)
///
/// Every write sets both pins. The pin going low is always written before
/// the pin going high, so the bridge never sees both inputs high.
pub struct MotorDriver<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    /// Bridge input A (high = reverse).
    pin_a: A,

    /// Bridge input B (high = forward).
    pin_b: B,

    /// PWM phase lengths, `None` for full speed.
    pwm: Option<PwmTiming>,

    /// Current PWM phase.
    phase: PwmPhase,

    /// Last commanded direction.
    direction: Direction,

    /// Last levels written to (A, B).
    output: (bool, bool),
}

impl<A, B> MotorDriver<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    /// Create a driver. Pins are not touched until the first command.
    pub fn new(pin_a: A, pin_b: B, pwm: Option<PwmTiming>) -> Self {
        Self {
            pin_a,
            pin_b,
            pwm,
            phase: PwmPhase::default(),
            direction: Direction::Stopped,
            output: (false, false),
        }
    }

    /// Create a driver from a motor config section.
    pub fn from_config(pin_a: A, pin_b: B, config: &MotorConfig) -> Self {
        Self::new(pin_a, pin_b, PwmTiming::from_config(config))
    }

    /// Start building a driver.
    pub fn builder() -> MotorDriverBuilder<A, B> {
        MotorDriverBuilder::new()
    }

    /// Release both bridge inputs.
    pub fn stop(&mut self) -> Result<()> {
        self.phase.reset();
        self.direction = Direction::Stopped;
        self.write(Direction::Stopped.levels())
    }

    /// Drive forward at full power.
    pub fn forward(&mut self) -> Result<()> {
        self.direction = Direction::Forward;
        self.write(Direction::Forward.levels())
    }

    /// Drive in reverse at full power.
    pub fn reverse(&mut self) -> Result<()> {
        self.direction = Direction::Reverse;
        self.write(Direction::Reverse.levels())
    }

    /// Keep driving forward with software PWM.
    ///
    /// Non-blocking; call on every poll tick while forward motion is wanted.
    pub fn tick_forward(&mut self, now: Instant) -> Result<()> {
        self.tick(Direction::Forward, now)
    }

    /// Keep driving in reverse with software PWM.
    ///
    /// Non-blocking; call on every poll tick while reverse motion is wanted.
    pub fn tick_reverse(&mut self, now: Instant) -> Result<()> {
        self.tick(Direction::Reverse, now)
    }

    /// Command a direction, pulsed or constant depending on configuration.
    pub fn run(&mut self, direction: Direction, now: Instant) -> Result<()> {
        match direction {
            Direction::Stopped => self.stop(),
            Direction::Forward | Direction::Reverse if self.pwm.is_some() => {
                self.tick(direction, now)
            }
            Direction::Forward => self.forward(),
            Direction::Reverse => self.reverse(),
        }
    }

    /// Last commanded direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Last levels written to (A, B).
    #[inline]
    pub fn output(&self) -> (bool, bool) {
        self.output
    }

    /// Whether either bridge input is currently high.
    #[inline]
    pub fn is_energized(&self) -> bool {
        self.output.0 || self.output.1
    }

    /// PWM phase lengths, `None` at full speed.
    #[inline]
    pub fn pwm_timing(&self) -> Option<&PwmTiming> {
        self.pwm.as_ref()
    }

    /// Average duty while running (`1.0` at full speed).
    pub fn duty_cycle(&self) -> f32 {
        PwmTiming::effective_duty(self.pwm.as_ref())
    }

    /// Effective speed as a whole percentage of full speed.
    pub fn speed_percent(&self) -> u8 {
        PwmTiming::speed_percent(self.pwm.as_ref())
    }

    /// Release the pins.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }

    fn tick(&mut self, direction: Direction, now: Instant) -> Result<()> {
        let Some(timing) = self.pwm else {
            // Full speed: hold the constant level
            if self.direction != direction || self.output != direction.levels() {
                self.direction = direction;
                return self.write(direction.levels());
            }
            return Ok(());
        };

        if self.direction != direction {
            self.phase.reset();
            self.direction = direction;
        }

        match self.phase.advance(now, &timing) {
            Some(true) => self.write(direction.levels()),
            Some(false) => self.write(Direction::Stopped.levels()),
            None => Ok(()),
        }
    }

    fn write(&mut self, (a, b): (bool, bool)) -> Result<()> {
        if a {
            set_level(&mut self.pin_b, b)?;
            set_level(&mut self.pin_a, a)?;
        } else {
            set_level(&mut self.pin_a, a)?;
            set_level(&mut self.pin_b, b)?;
        }
        self.output = (a, b);
        Ok(())
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    if high {
        pin.set_high().map_err(|_| MotorError::PinError)?;
    } else {
        pin.set_low().map_err(|_| MotorError::PinError)?;
    }
    Ok(())
}
