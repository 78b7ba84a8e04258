//! Polling loop.
//!
//! [`UselessBox`] owns both switches, the state machine and a delay
//! provider, and runs the whole box on a fixed tick. Each tick samples both
//! switches once and feeds the machine in a fixed order:
//!
//! 1. toggle edge
//! 2. pause trigger or resume
//! 3. toggle-Low level check
//! 4. motor upkeep (PWM, stop while paused)
//! 5. limit-release warning while retracting
//! 6. limit edge
//!
//! Then the loop sleeps one full tick period; time spent handling the tick
//! is not subtracted.

use core::convert::Infallible;
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::behavior::RandomSource;
use crate::clock::{block_for, Clock};
use crate::config::{validate_config, BoxConfig};
use crate::error::Result;
use crate::input::{LimitLevel, Switch, ToggleLevel};
use crate::machine::{ArmState, StateMachine};
use crate::motor::MotorDriver;

/// The four GPIO lines of a box.
pub struct BoxPins<T, L, A, B> {
    /// Toggle switch input.
    pub toggle: T,
    /// Limit switch input.
    pub limit: L,
    /// Motor bridge input A (high = reverse).
    pub motor_a: A,
    /// Motor bridge input B (high = forward).
    pub motor_b: B,
}

/// A complete box: switches, state machine, and poll timing.
pub struct UselessBox<T, L, A, B, C, R, D>
where
    T: InputPin,
    L: InputPin,
    A: OutputPin,
    B: OutputPin,
    C: Clock,
    R: RandomSource,
    D: DelayNs,
{
    toggle: Switch<T, ToggleLevel>,
    limit: Switch<L, LimitLevel>,
    machine: StateMachine<A, B, C, R>,
    delay: D,
    tick_period: Duration,
}

impl<T, L, A, B, C, R, D> UselessBox<T, L, A, B, C, R, D>
where
    T: InputPin,
    L: InputPin,
    A: OutputPin,
    B: OutputPin,
    C: Clock,
    R: RandomSource,
    D: DelayNs,
{
    /// Assemble a box from its parts.
    pub fn new(
        toggle: Switch<T, ToggleLevel>,
        limit: Switch<L, LimitLevel>,
        machine: StateMachine<A, B, C, R>,
        delay: D,
        tick_period: Duration,
    ) -> Self {
        Self {
            toggle,
            limit,
            machine,
            delay,
            tick_period,
        }
    }

    /// Validate `config` and build a box on `pins`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(
        pins: BoxPins<T, L, A, B>,
        clock: C,
        rng: R,
        delay: D,
        config: &BoxConfig,
    ) -> Result<Self> {
        validate_config(config)?;

        let toggle = Switch::new(pins.toggle, config.inputs.toggle_high_level());
        let limit = Switch::new(pins.limit, config.inputs.limit_pressed_level());
        let motor = MotorDriver::from_config(pins.motor_a, pins.motor_b, &config.motor);
        let machine = StateMachine::from_config(motor, clock, rng, config);

        Ok(Self::new(
            toggle,
            limit,
            machine,
            delay,
            config.timing.tick_period.to_duration(),
        ))
    }

    /// Stop the motor, go idle, and take the current switch levels as the
    /// starting point for edge detection.
    pub fn start(&mut self) -> Result<()> {
        self.machine.reset()?;

        let toggle = self.toggle.prime()?;
        let limit = self.limit.prime()?;
        info!("toggle switch: {}", toggle);
        info!("limit switch: {}", limit);
        let raw = self.limit.read_raw()?;
        debug!("raw limit pin: {}", raw);

        let motor = self.machine.motor();
        if motor.pwm_timing().is_some() {
            info!("motor speed control: ENABLED ({}% speed)", motor.speed_percent());
        } else {
            info!("motor speed control: DISABLED (full speed)");
        }
        Ok(())
    }

    /// Run one poll tick, without the trailing sleep.
    pub fn tick(&mut self) -> Result<()> {
        let toggle = self.toggle.sample()?;
        let limit = self.limit.sample()?;

        if let Some(level) = toggle.edge() {
            self.machine.handle_toggle_change(level, &mut self.delay)?;
        }
        self.machine.update_pause()?;
        self.machine.check_toggle_low(toggle.level, &mut self.delay)?;
        self.machine.drive()?;
        self.machine.note_limit_sample(&limit);
        if let Some(level) = limit.edge() {
            self.machine.handle_limit_change(level)?;
        }

        Ok(())
    }

    /// Run `ticks` poll ticks, sleeping one period after each.
    pub fn run_ticks(&mut self, ticks: usize) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
            block_for(&mut self.delay, self.tick_period);
        }
        Ok(())
    }

    /// Start the box and poll forever.
    ///
    /// Only returns on a GPIO failure.
    pub fn run(&mut self) -> Result<Infallible> {
        self.start()?;
        loop {
            self.tick()?;
            block_for(&mut self.delay, self.tick_period);
        }
    }

    /// Current arm state.
    #[inline]
    pub fn state(&self) -> ArmState {
        self.machine.state()
    }

    /// The state machine.
    #[inline]
    pub fn machine(&self) -> &StateMachine<A, B, C, R> {
        &self.machine
    }

    /// Sleep between polls.
    #[inline]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }
}
