//! Per-cycle behavior planning.

use core::time::Duration;

use crate::config::{BehaviorConfig, DelayRange, Seconds};

use super::random::RandomSource;

/// What the arm will do on one extension cycle, decided when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePlan {
    /// Wait before the motor is commanded forward.
    pub start_delay: Duration,
    /// Whether the arm stops once mid-way through extending.
    pub will_pause: bool,
}

/// Draws start delays and pauses from a [`RandomSource`].
pub struct BehaviorPlanner<R: RandomSource> {
    rng: R,
    start_delay: DelayRange,
    pause_probability: f32,
    pause_delay: DelayRange,
}

impl<R: RandomSource> BehaviorPlanner<R> {
    /// Create a planner from a behavior config section.
    pub fn new(rng: R, config: &BehaviorConfig) -> Self {
        Self {
            rng,
            start_delay: config.start_delay,
            pause_probability: config.pause_probability,
            pause_delay: config.pause_delay,
        }
    }

    /// Plan the start of an extension cycle.
    ///
    /// Draws the start delay first, then the pause decision.
    pub fn plan_cycle_start(&mut self) -> CyclePlan {
        let start_delay = self.draw(self.start_delay);
        let will_pause = self.rng.bernoulli(self.pause_probability);
        CyclePlan {
            start_delay,
            will_pause,
        }
    }

    /// Length of a pause that is about to begin.
    pub fn plan_pause_duration(&mut self) -> Duration {
        self.draw(self.pause_delay)
    }

    fn draw(&mut self, range: DelayRange) -> Duration {
        Seconds(self.rng.uniform(range.min.value(), range.max.value())).to_duration()
    }
}
