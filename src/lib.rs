//! # useless-box
//!
//! Polled state machine for a motorized "useless box" arm, with embedded-hal
//! 1.0 support.
//!
//! ## Features
//!
//! - **Configuration-driven**: PWM speed, random delays and poll timing from
//!   TOML files
//! - **embedded-hal 1.0**: `InputPin` for the switches, `OutputPin` for the
//!   motor bridge, `DelayNs` for blocking waits
//! - **no_std compatible**: Core library works without standard library
//! - **Software PWM**: Reduced motor speed without a PWM peripheral
//! - **Mischief**: Random start delay and an occasional mid-extension pause
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use useless_box::{BoxPins, MonotonicClock, UselessBox};
//! use useless_box::behavior::entropy_rng;
//!
//! let config = useless_box::load_config("box.toml")?;
//!
//! let pins = BoxPins {
//!     toggle: toggle_pin,
//!     limit: limit_pin,
//!     motor_a: motor_a_pin,
//!     motor_b: motor_b_pin,
//! };
//!
//! let clock = MonotonicClock::new();
//! let mut uselessbox = UselessBox::from_config(pins, clock, entropy_rng(), delay, &config)?;
//! uselessbox.run()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and OS-seeded randomness
//! - `defmt`: Log through defmt instead of the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod logging;

// Core modules
pub mod behavior;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod machine;
pub mod motor;

// Re-exports for ergonomic API
pub use behavior::{BehaviorPlanner, CyclePlan, RandomSource};
pub use clock::{Clock, Instant};
pub use config::{
    validate_config, BehaviorConfig, BoxConfig, InputConfig, MotorConfig, TimingConfig,
};
pub use controller::{BoxPins, UselessBox};
pub use error::{Error, Result};
pub use input::{LimitLevel, Switch, ToggleLevel};
pub use machine::{ArmState, CycleStats, CycleTiming, StateMachine};
pub use motor::{Direction, MotorDriver, MotorDriverBuilder, PwmTiming};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

#[cfg(feature = "std")]
pub use clock::MonotonicClock;

// Unit types
pub use config::units::{DelayRange, Seconds};
