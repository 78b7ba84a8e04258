//! Simulated board shared by the integration tests.
//!
//! Switches and motor pins are shared cells, so a test keeps a handle on
//! the board while the box owns the pins. The delay advances the simulated
//! clock, so blocking waits cost simulated time only.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use useless_box::{BoxConfig, BoxPins, Clock, Direction, Instant, RandomSource, UselessBox};

pub type SimBox =
    UselessBox<SimSwitch, SimSwitch, BridgePin, BridgePin, SimClock, ScriptedRandom, SimDelay>;

// =============================================================================
// Switch inputs
// =============================================================================

/// Input pin whose level the test sets.
#[derive(Clone, Default)]
pub struct SimSwitch(Rc<Cell<bool>>);

impl SimSwitch {
    pub fn set(&self, high: bool) {
        self.0.set(high);
    }
}

impl ErrorType for SimSwitch {
    type Error = Infallible;
}

impl InputPin for SimSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

// =============================================================================
// Motor bridge
// =============================================================================

/// Levels of the two bridge inputs (A, B).
#[derive(Clone, Default)]
pub struct Bridge(Rc<Cell<(bool, bool)>>);

impl Bridge {
    pub fn levels(&self) -> (bool, bool) {
        self.0.get()
    }

    pub fn direction(&self) -> Direction {
        match self.levels() {
            (false, false) => Direction::Stopped,
            (false, true) => Direction::Forward,
            (true, false) => Direction::Reverse,
            (true, true) => panic!("both bridge inputs high"),
        }
    }

    fn pin(&self, side_a: bool) -> BridgePin {
        BridgePin {
            bridge: self.clone(),
            side_a,
        }
    }
}

/// One bridge input. Panics on any write that leaves both inputs high.
pub struct BridgePin {
    bridge: Bridge,
    side_a: bool,
}

impl BridgePin {
    fn write(&mut self, high: bool) {
        let (mut a, mut b) = self.bridge.levels();
        if self.side_a {
            a = high;
        } else {
            b = high;
        }
        assert!(!(a && b), "both bridge inputs high");
        self.bridge.0.set((a, b));
    }
}

impl ErrorType for BridgePin {
    type Error = Infallible;
}

impl OutputPin for BridgePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.write(true);
        Ok(())
    }
}

// =============================================================================
// Time
// =============================================================================

/// Clock that only moves when a [`SimDelay`] sleeps.
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

impl Clock for SimClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.0.get())
    }
}

/// Toggle level changes due at a given time.
type Schedule = Rc<RefCell<Vec<(Instant, bool)>>>;

/// Delay that advances the simulated clock.
///
/// Notes the motor direction at the start of every sleep, and applies
/// scheduled toggle changes that fall inside it.
pub struct SimDelay {
    clock: SimClock,
    bridge: Bridge,
    toggle: SimSwitch,
    schedule: Schedule,
    trace: Rc<RefCell<Vec<Direction>>>,
}

impl SimDelay {
    fn sleep_us(&mut self, us: u64) {
        let direction = self.bridge.direction();
        {
            let mut trace = self.trace.borrow_mut();
            if trace.last() != Some(&direction) {
                trace.push(direction);
            }
        }

        self.clock.advance_us(us);
        let now = self.clock.now();
        let mut schedule = self.schedule.borrow_mut();
        schedule.sort_by_key(|(at, _)| *at);
        for (_, high) in schedule.iter().filter(|(at, _)| *at <= now) {
            self.toggle.set(*high);
        }
        schedule.retain(|(at, _)| *at > now);
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sleep_us((u64::from(ns) + 999) / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.sleep_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleep_us(u64::from(ms) * 1000);
    }
}

// =============================================================================
// Randomness
// =============================================================================

/// Random source with scripted answers.
///
/// Uniform draws land at `fraction` of the way through their range. Pause
/// draws come from `pauses` in order, repeating the last one.
pub struct ScriptedRandom {
    fraction: f32,
    pauses: Vec<bool>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(fraction: f32, pauses: Vec<bool>) -> Self {
        Self {
            fraction,
            pauses,
            next: 0,
        }
    }

    pub fn never_pause(fraction: f32) -> Self {
        Self::new(fraction, vec![false])
    }

    pub fn always_pause(fraction: f32) -> Self {
        Self::new(fraction, vec![true])
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.fraction
    }

    fn bernoulli(&mut self, _p: f32) -> bool {
        let draw = self
            .pauses
            .get(self.next)
            .or(self.pauses.last())
            .copied()
            .unwrap_or(false);
        self.next += 1;
        draw
    }
}

// =============================================================================
// Board
// =============================================================================

/// Handles on everything a box is wired to.
#[derive(Default)]
pub struct SimBoard {
    pub toggle: SimSwitch,
    pub limit: SimSwitch,
    pub bridge: Bridge,
    pub clock: SimClock,
    schedule: Schedule,
    trace: Rc<RefCell<Vec<Direction>>>,
}

impl SimBoard {
    /// Board with the switches at the given levels.
    pub fn new(toggle_high: bool, limit_pressed: bool) -> Self {
        let board = Self::default();
        board.toggle.set(toggle_high);
        board.limit.set(limit_pressed);
        board
    }

    /// Board with the arm at rest: toggle Low, limit Pressed.
    pub fn at_rest() -> Self {
        Self::new(false, true)
    }

    /// Build a started box on this board.
    pub fn build(&self, config: &BoxConfig, rng: ScriptedRandom) -> SimBox {
        let mut uselessbox = self.try_build(config, rng).unwrap();
        uselessbox.start().unwrap();
        uselessbox
    }

    /// Build a box on this board without starting it.
    pub fn try_build(
        &self,
        config: &BoxConfig,
        rng: ScriptedRandom,
    ) -> useless_box::Result<SimBox> {
        let pins = BoxPins {
            toggle: self.toggle.clone(),
            limit: self.limit.clone(),
            motor_a: self.bridge.pin(true),
            motor_b: self.bridge.pin(false),
        };
        let delay = SimDelay {
            clock: self.clock.clone(),
            bridge: self.bridge.clone(),
            toggle: self.toggle.clone(),
            schedule: Rc::clone(&self.schedule),
            trace: Rc::clone(&self.trace),
        };

        UselessBox::from_config(pins, self.clock.clone(), rng, delay, config)
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Flip the toggle to `high` once the clock reaches `at`, even in the
    /// middle of a sleep.
    pub fn schedule_toggle(&self, at: Instant, high: bool) {
        self.schedule.borrow_mut().push((at, high));
    }

    pub fn direction(&self) -> Direction {
        self.bridge.direction()
    }

    /// Motor directions seen at each sleep, consecutive repeats collapsed.
    pub fn trace(&self) -> Vec<Direction> {
        self.trace.borrow().clone()
    }
}

/// Config with constant motor levels and the given pause probability.
pub fn full_speed_config(pause_probability: f32) -> BoxConfig {
    let mut config = BoxConfig::default();
    config.motor.use_speed_control = false;
    config.behavior.pause_probability = pause_probability;
    config
}

/// Run `n` poll ticks.
pub fn ticks(uselessbox: &mut SimBox, n: usize) {
    uselessbox.run_ticks(n).unwrap();
}

/// Elapsed simulated time between two instants.
pub fn elapsed(from: Instant, to: Instant) -> Duration {
    to.duration_since(from)
}
