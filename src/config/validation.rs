//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::units::{DelayRange, Seconds};
use super::{BehaviorConfig, BoxConfig, MotorConfig, TimingConfig};

/// Validate a box configuration.
///
/// Checks:
/// - PWM phases are at least one microsecond when speed control is enabled
/// - Random delay ranges are non-negative with min <= max
/// - Pause probability is within [0, 1]
/// - Tick period is at least one microsecond and settle delay is non-negative
pub fn validate_config(config: &BoxConfig) -> Result<()> {
    validate_motor(&config.motor)?;
    validate_behavior(&config.behavior)?;
    validate_timing(&config.timing)?;
    Ok(())
}

fn validate_motor(config: &MotorConfig) -> Result<()> {
    // Phases only matter when the pins are time-sliced
    if !config.use_speed_control {
        return Ok(());
    }

    // Rounds to whole microseconds; anything that rounds to zero is no phase
    for (setting, value) in [("on_time", config.on_time), ("off_time", config.off_time)] {
        if value.to_duration().is_zero() {
            return Err(Error::Config(ConfigError::InvalidPwmPhase {
                setting,
                value: value.0,
            }));
        }
    }

    Ok(())
}

fn validate_behavior(config: &BehaviorConfig) -> Result<()> {
    validate_range("start_delay", &config.start_delay)?;
    validate_range("pause_delay", &config.pause_delay)?;
    validate_duration("pause_after", config.pause_after)?;

    // NaN fails the range check too
    if !(0.0..=1.0).contains(&config.pause_probability) {
        return Err(Error::Config(ConfigError::InvalidProbability(
            config.pause_probability,
        )));
    }

    Ok(())
}

fn validate_timing(config: &TimingConfig) -> Result<()> {
    if config.tick_period.to_duration().is_zero() {
        return Err(Error::Config(ConfigError::InvalidTickPeriod(
            config.tick_period.0,
        )));
    }

    validate_duration("settle_delay", config.settle_delay)
}

fn validate_range(setting: &'static str, range: &DelayRange) -> Result<()> {
    validate_duration(setting, range.min)?;
    validate_duration(setting, range.max)?;

    if !range.is_valid() {
        return Err(Error::Config(ConfigError::InvalidDelayRange {
            setting,
            min: range.min.0,
            max: range.max.0,
        }));
    }

    Ok(())
}

fn validate_duration(setting: &'static str, value: Seconds) -> Result<()> {
    if !value.is_valid() {
        return Err(Error::Config(ConfigError::InvalidDuration {
            setting,
            value: value.0,
        }));
    }
    Ok(())
}
