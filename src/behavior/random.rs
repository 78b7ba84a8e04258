//! Random sampling seam.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform and Bernoulli sampling.
///
/// Implemented for every [`rand::Rng`]; tests substitute scripted sources.
pub trait RandomSource {
    /// Uniform draw from `[min, max]`. Returns `min` when the range is empty
    /// or degenerate.
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// `true` with probability `p`, clamped to `[0, 1]`.
    fn bernoulli(&mut self, p: f32) -> bool;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn bernoulli(&mut self, p: f32) -> bool {
        if p.is_nan() {
            return false;
        }
        self.gen_bool(f64::from(p.clamp(0.0, 1.0)))
    }
}

/// Small fast generator with a fixed seed, for targets without entropy.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Small fast generator seeded from the OS.
#[cfg(feature = "std")]
pub fn entropy_rng() -> SmallRng {
    SmallRng::from_entropy()
}
