//! Switch polarity settings.

use serde::Deserialize;

use crate::input::{LIMIT_PRESSED_LEVEL, TOGGLE_HIGH_LEVEL};

/// Per-channel inversion on top of the documented wiring convention.
///
/// Both switches sit on pull-up inputs. With the box wired as built, the
/// toggle reads `true` when High and the limit switch reads `true` when
/// Pressed. Set a flag when a box is wired the other way round.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Invert toggle switch logic.
    pub invert_toggle: bool,

    /// Invert limit switch logic.
    pub invert_limit: bool,
}

impl InputConfig {
    /// Raw pin level that means "toggle High".
    pub fn toggle_high_level(&self) -> bool {
        TOGGLE_HIGH_LEVEL != self.invert_toggle
    }

    /// Raw pin level that means "limit Pressed".
    pub fn limit_pressed_level(&self) -> bool {
        LIMIT_PRESSED_LEVEL != self.invert_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_follow_wiring_convention() {
        let config = InputConfig::default();
        assert!(config.toggle_high_level());
        assert!(config.limit_pressed_level());
    }

    #[test]
    fn test_inverted_limit() {
        let config = InputConfig {
            invert_limit: true,
            ..InputConfig::default()
        };
        assert!(!config.limit_pressed_level());
        assert!(config.toggle_high_level());
    }
}
