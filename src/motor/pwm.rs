//! Software PWM timing.
//!
//! The motor bridge has no hardware PWM input on this box, so speed is cut by
//! time-slicing the direction pins from the poll loop: `on_time` energized,
//! `off_time` released, repeat. The average duty is
//! `on_time / (on_time + off_time)`.

use core::time::Duration;

use crate::clock::Instant;
use crate::config::MotorConfig;

/// On/off phase lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmTiming {
    /// Energized phase.
    pub on_time: Duration,
    /// Released phase.
    pub off_time: Duration,
}

impl PwmTiming {
    /// Create PWM timing from phase lengths.
    pub const fn new(on_time: Duration, off_time: Duration) -> Self {
        Self { on_time, off_time }
    }

    /// PWM timing for a motor config, `None` when speed control is off.
    pub fn from_config(config: &MotorConfig) -> Option<Self> {
        config
            .use_speed_control
            .then(|| Self::new(config.on_time.to_duration(), config.off_time.to_duration()))
    }

    /// Average fraction of time energized.
    pub fn duty_cycle(&self) -> f32 {
        let period = self.on_time + self.off_time;
        if period.is_zero() {
            return 0.0;
        }
        self.on_time.as_secs_f32() / period.as_secs_f32()
    }

    /// Average duty of an optionally pulsed motor (`1.0` at full speed).
    pub fn effective_duty(pwm: Option<&PwmTiming>) -> f32 {
        pwm.map_or(1.0, PwmTiming::duty_cycle)
    }

    /// [`PwmTiming::effective_duty`] as a whole percentage.
    pub fn speed_percent(pwm: Option<&PwmTiming>) -> u8 {
        libm::roundf(Self::effective_duty(pwm) * 100.0).clamp(0.0, 100.0) as u8
    }
}

/// Current PWM phase.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PwmPhase {
    /// Pins energized in the current phase.
    on: bool,

    /// Time of the last flip. `None` until the first flip after a reset.
    last_toggle: Option<Instant>,
}

impl PwmPhase {
    /// Back to released, flipping on at the next tick.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Flip the phase if the current one has run its length.
    ///
    /// Returns the new phase on a flip.
    pub(crate) fn advance(&mut self, now: Instant, timing: &PwmTiming) -> Option<bool> {
        let due = match self.last_toggle {
            None => true,
            Some(last) => {
                let length = if self.on { timing.on_time } else { timing.off_time };
                now.duration_since(last) >= length
            }
        };

        if !due {
            return None;
        }

        self.on = !self.on;
        self.last_toggle = Some(now);
        Some(self.on)
    }
}
