//! The arm state machine.
//!
//! Consumes switch edges, switch levels and elapsed time, and commands the
//! motor. Transitions:
//!
//! | From                    | Trigger                  | To              |
//! |-------------------------|--------------------------|-----------------|
//! | Idle                    | toggle Low -> High       | Extending       |
//! | Extending               | scheduled pause due      | ExtendingPaused |
//! | ExtendingPaused         | pause over               | Extending       |
//! | Extending / Paused      | toggle Low               | Retracting      |
//! | Retracting              | limit Released -> Pressed| Idle            |
//! | Extending / Paused      | limit Released -> Pressed| Idle (anomaly)  |
//!
//! Two transitions block the caller: the random start delay before the arm
//! moves out, and the settle delay before it reverses. Switches are not
//! polled while blocked, so an edge that comes and goes inside either
//! window is never seen.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::behavior::{BehaviorPlanner, RandomSource};
use crate::clock::{block_for, Clock, Instant};
use crate::config::BoxConfig;
use crate::error::Result;
use crate::input::{LimitLevel, Sample, ToggleLevel};
use crate::motor::{Direction, MotorDriver};

use super::state::ArmState;
use super::timing::CycleTiming;

/// Running totals since power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleStats {
    /// Extensions started.
    pub started: u32,
    /// Cycles that ended with the arm back home.
    pub completed: u32,
    /// Mid-extension pauses taken.
    pub pauses: u32,
    /// Safety stops (limit pressed while extending).
    pub faults: u32,
}

/// Four-state arm controller.
///
/// Owns the motor; nothing else writes the motor pins while the machine
/// exists.
pub struct StateMachine<A, B, C, R>
where
    A: OutputPin,
    B: OutputPin,
    C: Clock,
    R: RandomSource,
{
    motor: MotorDriver<A, B>,
    clock: C,
    planner: BehaviorPlanner<R>,

    /// Motor-off wait between stopping and reversing.
    settle_delay: Duration,

    /// Extension time before a scheduled pause fires.
    pause_after: Duration,

    state: ArmState,
    timing: CycleTiming,
    stats: CycleStats,
}

impl<A, B, C, R> StateMachine<A, B, C, R>
where
    A: OutputPin,
    B: OutputPin,
    C: Clock,
    R: RandomSource,
{
    /// Create a machine in `Idle`. The motor is not touched until
    /// [`StateMachine::reset`] or the first transition.
    pub fn new(
        motor: MotorDriver<A, B>,
        clock: C,
        planner: BehaviorPlanner<R>,
        settle_delay: Duration,
        pause_after: Duration,
    ) -> Self {
        Self {
            motor,
            clock,
            planner,
            settle_delay,
            pause_after,
            state: ArmState::Idle,
            timing: CycleTiming::default(),
            stats: CycleStats::default(),
        }
    }

    /// Create a machine from a validated box config.
    pub fn from_config(motor: MotorDriver<A, B>, clock: C, rng: R, config: &BoxConfig) -> Self {
        Self::new(
            motor,
            clock,
            BehaviorPlanner::new(rng, &config.behavior),
            config.timing.settle_delay.to_duration(),
            config.behavior.pause_after.to_duration(),
        )
    }

    /// Stop the motor and go to `Idle`, forgetting any cycle in progress.
    pub fn reset(&mut self) -> Result<()> {
        self.motor.stop()?;
        self.timing.clear();
        self.set_state(ArmState::Idle);
        Ok(())
    }

    /// React to the toggle switch moving to `level`.
    ///
    /// Low -> High while idle starts a cycle; this blocks on `delay` for the
    /// random start delay before the motor is commanded. High -> Low while
    /// extending (paused or not) retracts the arm.
    pub fn handle_toggle_change<D: DelayNs>(
        &mut self,
        level: ToggleLevel,
        delay: &mut D,
    ) -> Result<()> {
        match (level, self.state) {
            (ToggleLevel::High, ArmState::Idle) => self.extend(delay),
            (ToggleLevel::High, state) => {
                debug!("toggle HIGH ignored in {}", state);
                Ok(())
            }
            (ToggleLevel::Low, state) if state.is_extending() => {
                info!("arm hit the toggle, reversing");
                self.retract(delay)
            }
            (ToggleLevel::Low, state) => {
                debug!("toggle LOW in {}", state);
                Ok(())
            }
        }
    }

    /// Fire a due pause, or end a finished one.
    ///
    /// At most one of the two happens per call.
    pub fn update_pause(&mut self) -> Result<()> {
        let now = self.clock.now();
        match self.state {
            ArmState::Extending if self.timing.pause_due(now, self.pause_after) => {
                self.motor.stop()?;
                let duration = self.planner.plan_pause_duration();
                self.timing.begin_pause(now, duration);
                self.stats.pauses += 1;
                info!("pausing for {} ms", duration.as_millis() as u64);
                self.set_state(ArmState::ExtendingPaused);
            }
            ArmState::ExtendingPaused if self.timing.resume_due(now) => {
                self.timing.end_pause();
                self.motor.run(Direction::Forward, now)?;
                info!("pause over, extending");
                self.set_state(ArmState::Extending);
            }
            _ => {}
        }
        Ok(())
    }

    /// Level check on the toggle, independent of edges.
    ///
    /// A toggle found Low while the arm is out retracts it, so a missed
    /// edge cannot leave the arm pushing forward forever.
    pub fn check_toggle_low<D: DelayNs>(
        &mut self,
        level: ToggleLevel,
        delay: &mut D,
    ) -> Result<()> {
        if level == ToggleLevel::Low && self.state.is_extending() {
            info!("toggle LOW while {}, reversing", self.state);
            self.retract(delay)?;
        }
        Ok(())
    }

    /// Per-tick motor upkeep for the current state.
    ///
    /// Advances software PWM while moving, and re-asserts stop while paused.
    pub fn drive(&mut self) -> Result<()> {
        let now = self.clock.now();
        match self.state {
            ArmState::Idle => Ok(()),
            ArmState::Extending => self.motor.run(Direction::Forward, now),
            ArmState::ExtendingPaused => self.motor.stop(),
            ArmState::Retracting => self.motor.run(Direction::Reverse, now),
        }
    }

    /// Warn when the limit switch lets go while the arm is coming home.
    pub fn note_limit_sample(&self, sample: &Sample<LimitLevel>) {
        if self.state == ArmState::Retracting && sample.entered(LimitLevel::Released) {
            warn!("limit switch released while retracting, continuing");
        }
    }

    /// React to the limit switch moving to `level`.
    pub fn handle_limit_change(&mut self, level: LimitLevel) -> Result<()> {
        match (level, self.state) {
            (LimitLevel::Pressed, ArmState::Retracting) => {
                self.motor.stop()?;
                self.timing.clear();
                self.stats.completed += 1;
                info!("arm home, ready for next cycle");
                self.set_state(ArmState::Idle);
            }
            (LimitLevel::Pressed, state @ (ArmState::Extending | ArmState::ExtendingPaused)) => {
                warn!("limit switch pressed while {}, stopping motor", state);
                self.motor.stop()?;
                self.timing.clear();
                self.stats.faults += 1;
                self.set_state(ArmState::Idle);
            }
            (LimitLevel::Pressed, ArmState::Idle) => {
                info!("limit switch pressed, arm at rest");
            }
            (LimitLevel::Released, state) => {
                debug!("limit switch released in {}", state);
            }
        }
        Ok(())
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> ArmState {
        self.state
    }

    /// Direction last commanded to the motor.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.motor.direction()
    }

    /// The motor driver.
    #[inline]
    pub fn motor(&self) -> &MotorDriver<A, B> {
        &self.motor
    }

    /// Timing of the cycle in progress.
    #[inline]
    pub fn timing(&self) -> &CycleTiming {
        &self.timing
    }

    /// Running totals.
    #[inline]
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Current time on the machine's clock.
    #[inline]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    fn extend<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        let plan = self.planner.plan_cycle_start();
        info!(
            "toggle HIGH, waiting {} ms before extending (pause: {})",
            plan.start_delay.as_millis() as u64,
            plan.will_pause
        );
        block_for(delay, plan.start_delay);

        let now = self.clock.now();
        self.timing.begin(now, plan.will_pause);
        self.stats.started += 1;
        self.motor.run(Direction::Forward, now)?;
        self.set_state(ArmState::Extending);
        Ok(())
    }

    fn retract<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.motor.stop()?;
        block_for(delay, self.settle_delay);

        let now = self.clock.now();
        self.motor.run(Direction::Reverse, now)?;
        self.timing.clear();
        self.set_state(ArmState::Retracting);
        Ok(())
    }

    fn set_state(&mut self, next: ArmState) {
        if self.state != next {
            info!("state: {} -> {}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    struct TestPin;

    impl ErrorType for TestPin {
        type Error = Infallible;
    }

    impl OutputPin for TestPin {
        fn set_low(&mut self) -> core::result::Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Infallible> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestClock(Cell<u64>);

    impl TestClock {
        fn advance_ms(&self, ms: u64) {
            self.0.set(self.0.get() + ms * 1000);
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> Instant {
            Instant::from_micros(self.0.get())
        }
    }

    /// Always pauses, every draw at the bottom of its range.
    struct Low;

    impl RandomSource for Low {
        fn uniform(&mut self, min: f32, _max: f32) -> f32 {
            min
        }

        fn bernoulli(&mut self, p: f32) -> bool {
            p > 0.0
        }
    }

    fn machine(
        clock: &TestClock,
        pause_probability: f32,
    ) -> StateMachine<TestPin, TestPin, &TestClock, Low> {
        let mut config = BoxConfig::default();
        config.behavior.pause_probability = pause_probability;
        let motor = MotorDriver::from_config(TestPin, TestPin, &config.motor);
        StateMachine::from_config(motor, clock, Low, &config)
    }

    #[test]
    fn test_full_cycle() {
        let clock = TestClock::default();
        let mut sm = machine(&clock, 0.0);
        let mut delay = NoopDelay::new();
        sm.reset().unwrap();

        sm.handle_toggle_change(ToggleLevel::High, &mut delay).unwrap();
        assert_eq!(sm.state(), ArmState::Extending);
        assert_eq!(sm.direction(), Direction::Forward);
        assert!(!sm.timing().pause_scheduled);

        sm.handle_toggle_change(ToggleLevel::Low, &mut delay).unwrap();
        assert_eq!(sm.state(), ArmState::Retracting);
        assert_eq!(sm.direction(), Direction::Reverse);
        assert_eq!(*sm.timing(), CycleTiming::default());

        sm.handle_limit_change(LimitLevel::Pressed).unwrap();
        assert_eq!(sm.state(), ArmState::Idle);
        assert_eq!(sm.direction(), Direction::Stopped);
        assert_eq!(sm.stats().completed, 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let clock = TestClock::default();
        let mut sm = machine(&clock, 1.0);
        let mut delay = NoopDelay::new();

        sm.handle_toggle_change(ToggleLevel::High, &mut delay).unwrap();
        assert!(sm.timing().pause_scheduled);

        clock.advance_ms(299);
        sm.update_pause().unwrap();
        assert_eq!(sm.state(), ArmState::Extending);

        clock.advance_ms(1);
        sm.update_pause().unwrap();
        assert_eq!(sm.state(), ArmState::ExtendingPaused);
        assert_eq!(sm.direction(), Direction::Stopped);
        assert_eq!(sm.timing().pause_duration, Duration::from_secs(1));

        clock.advance_ms(1000);
        sm.drive().unwrap();
        assert_eq!(sm.direction(), Direction::Stopped);
        sm.update_pause().unwrap();
        assert_eq!(sm.state(), ArmState::Extending);
        assert_eq!(sm.direction(), Direction::Forward);

        // Only one pause per cycle
        clock.advance_ms(5000);
        sm.update_pause().unwrap();
        assert_eq!(sm.state(), ArmState::Extending);
        assert_eq!(sm.stats().pauses, 1);
    }

    #[test]
    fn test_toggle_low_interrupts_pause() {
        let clock = TestClock::default();
        let mut sm = machine(&clock, 1.0);
        let mut delay = NoopDelay::new();

        sm.handle_toggle_change(ToggleLevel::High, &mut delay).unwrap();
        clock.advance_ms(300);
        sm.update_pause().unwrap();
        assert_eq!(sm.state(), ArmState::ExtendingPaused);

        sm.check_toggle_low(ToggleLevel::Low, &mut delay).unwrap();
        assert_eq!(sm.state(), ArmState::Retracting);
        assert_eq!(sm.direction(), Direction::Reverse);
    }

    #[test]
    fn test_limit_press_while_extending_is_a_fault() {
        let clock = TestClock::default();
        let mut sm = machine(&clock, 0.0);
        let mut delay = NoopDelay::new();

        sm.handle_toggle_change(ToggleLevel::High, &mut delay).unwrap();
        sm.handle_limit_change(LimitLevel::Pressed).unwrap();

        assert_eq!(sm.state(), ArmState::Idle);
        assert_eq!(sm.direction(), Direction::Stopped);
        assert_eq!(sm.stats().faults, 1);
        assert_eq!(sm.stats().completed, 0);
    }

    #[test]
    fn test_ignored_events() {
        let clock = TestClock::default();
        let mut sm = machine(&clock, 0.0);
        let mut delay = NoopDelay::new();

        sm.handle_toggle_change(ToggleLevel::Low, &mut delay).unwrap();
        sm.check_toggle_low(ToggleLevel::Low, &mut delay).unwrap();
        sm.handle_limit_change(LimitLevel::Pressed).unwrap();
        sm.handle_limit_change(LimitLevel::Released).unwrap();
        sm.drive().unwrap();
        assert_eq!(sm.state(), ArmState::Idle);
        assert_eq!(sm.stats(), CycleStats::default());

        sm.handle_toggle_change(ToggleLevel::High, &mut delay).unwrap();
        sm.handle_toggle_change(ToggleLevel::High, &mut delay).unwrap();
        sm.handle_limit_change(LimitLevel::Released).unwrap();
        assert_eq!(sm.state(), ArmState::Extending);
        assert_eq!(sm.stats().started, 1);
    }
}
