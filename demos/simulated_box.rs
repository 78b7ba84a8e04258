//! Simulated useless box.
//!
//! Runs a box on simulated switches and motor pins, with a clock that only
//! moves when the box sleeps. A scripted "person" flips the toggle on; the
//! arm comes out, hits the toggle off, and returns home.
//!
//! Run with `cargo run --example simulated_box`.

use std::cell::Cell;
use std::rc::Rc;

use useless_box::behavior::seeded_rng;
use useless_box::{BoxConfig, BoxPins, Clock, Instant, UselessBox};

/// Prints log records to stdout.
struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

/// Shared simulated time in microseconds.
#[derive(Clone, Default)]
struct SimClock(Rc<Cell<u64>>);

impl Clock for SimClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.0.get())
    }
}

/// Delay that advances the simulated clock instead of sleeping.
struct SimDelay(SimClock);

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        let clock = &(self.0).0;
        clock.set(clock.get() + (u64::from(ns) + 999) / 1000);
    }
}

/// Input pin the demo script flips.
#[derive(Clone, Default)]
struct SimSwitch(Rc<Cell<bool>>);

impl embedded_hal::digital::ErrorType for SimSwitch {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for SimSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// Motor bridge input.
#[derive(Clone, Default)]
struct SimPin(Rc<Cell<bool>>);

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

fn main() -> useless_box::Result<()> {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Info));

    println!("=== Simulated Useless Box ===\n");

    let mut config = BoxConfig::default();
    config.behavior.pause_probability = 1.0;

    let clock = SimClock::default();
    let toggle = SimSwitch::default();
    let limit = SimSwitch(Rc::new(Cell::new(true)));
    let pins = BoxPins {
        toggle: toggle.clone(),
        limit: limit.clone(),
        motor_a: SimPin::default(),
        motor_b: SimPin::default(),
    };

    let delay = SimDelay(clock.clone());
    let rng = seeded_rng(2024);
    let mut uselessbox = UselessBox::from_config(pins, clock.clone(), rng, delay, &config)?;
    uselessbox.start()?;

    println!("\n--- person flips the toggle on ---");
    toggle.0.set(true);
    uselessbox.run_ticks(2)?;

    println!("\n--- arm leaves the limit switch ---");
    limit.0.set(false);
    uselessbox.run_ticks(60)?;

    println!("\n--- arm pushes the toggle off ---");
    toggle.0.set(false);
    uselessbox.run_ticks(20)?;

    println!("\n--- arm reaches home ---");
    limit.0.set(true);
    uselessbox.run_ticks(1)?;

    let stats = uselessbox.machine().stats();
    println!("\nState: {}", uselessbox.state());
    println!("Simulated time: {} ms", clock.now().as_micros() / 1000);
    println!(
        "Cycles: {} started, {} completed, {} pauses, {} faults",
        stats.started, stats.completed, stats.pauses, stats.faults
    );

    Ok(())
}
