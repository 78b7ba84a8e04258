//! Randomized behavior settings.

use serde::Deserialize;

use super::units::{DelayRange, Seconds};

/// How unpredictable the arm is.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Wait before the arm starts extending after the toggle is flipped on.
    pub start_delay: DelayRange,

    /// Chance that an extension cycle includes a mid-way pause.
    pub pause_probability: f32,

    /// How long the arm extends before a scheduled pause kicks in.
    pub pause_after: Seconds,

    /// How long a pause lasts.
    pub pause_delay: DelayRange,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            start_delay: DelayRange::secs(0.5, 1.5),
            pause_probability: 0.3,
            pause_after: Seconds(0.3),
            pause_delay: DelayRange::secs(1.0, 2.0),
        }
    }
}

impl BehaviorConfig {
    /// Behavior without any mid-extension pause.
    pub fn without_pause() -> Self {
        Self {
            pause_probability: 0.0,
            ..Self::default()
        }
    }
}
