//! Configuration module for useless-box.
//!
//! Provides types for loading and validating the box configuration from TOML
//! files (with `std` feature) or building it in code.

mod behavior;
mod inputs;
mod motor;
mod system;
mod timing;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use behavior::BehaviorConfig;
pub use inputs::InputConfig;
pub use motor::MotorConfig;
pub use system::BoxConfig;
pub use timing::TimingConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{DelayRange, Seconds};
