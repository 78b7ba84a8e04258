//! Switch inputs for useless-box.
//!
//! Both switches are plain `embedded-hal` input pins on pull-ups. A raw
//! boolean carries no meaning by itself; each channel maps it to a labelled
//! level through a documented wiring convention, optionally inverted by
//! configuration.

mod switch;

pub use switch::{LimitLevel, Sample, Switch, SwitchLevel, ToggleLevel};

/// Raw level the toggle switch reads when flipped on (High).
pub const TOGGLE_HIGH_LEVEL: bool = true;

/// Raw level the limit switch reads when pressed.
///
/// This is a hardware convention of the box as wired, not a consequence of
/// the pull-up: the roller microswitch is connected so that "pressed" reads
/// logical high directly, without the inversion a pull-up to a
/// normally-open contact would suggest.
pub const LIMIT_PRESSED_LEVEL: bool = true;
