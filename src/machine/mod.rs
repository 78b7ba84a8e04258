//! Arm state machine for useless-box.
//!
//! Sequences the motor through one cycle: idle, extend (with an optional
//! pause), retract, idle.

mod state;
mod state_machine;
mod timing;

pub use state::ArmState;
pub use state_machine::{CycleStats, StateMachine};
pub use timing::CycleTiming;
