//! Randomized arm behavior.
//!
//! The planner is the only source of non-determinism in the box: how long
//! to wait before the arm comes out, whether it stops half-way, and for how
//! long. Everything else is a pure function of switch levels and elapsed
//! time.

mod planner;
mod random;

pub use planner::{BehaviorPlanner, CyclePlan};
pub use random::{seeded_rng, RandomSource};

#[cfg(feature = "std")]
pub use random::entropy_rng;
