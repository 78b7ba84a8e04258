//! Motor module for useless-box.
//!
//! Provides the two-pin H-bridge driver with optional software PWM.

mod builder;
mod direction;
mod driver;
mod pwm;

pub use builder::MotorDriverBuilder;
pub use direction::Direction;
pub use driver::MotorDriver;
pub use pwm::PwmTiming;
