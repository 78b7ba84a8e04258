//! Error types for the useless-box library.
//!
//! Arm anomalies (limit switch pressed mid-extension and the like) are not
//! errors: the state machine recovers from them by stopping the motor and
//! returning to idle. The types here cover what the core cannot recover from
//! by itself: bad configuration and failing GPIO collaborators.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all useless-box operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor output error
    Motor(MotorError),
    /// Switch input error
    Input(InputError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A random delay range has min > max
    InvalidDelayRange {
        /// Name of the offending setting
        setting: &'static str,
        /// Lower bound in seconds
        min: f32,
        /// Upper bound in seconds
        max: f32,
    },
    /// Pause probability outside [0, 1]
    InvalidProbability(f32),
    /// PWM on or off phase must be at least 1us when speed control is enabled
    InvalidPwmPhase {
        /// Name of the offending setting
        setting: &'static str,
        /// Configured value in seconds
        value: f32,
    },
    /// Duration is negative or not finite
    InvalidDuration {
        /// Name of the offending setting
        setting: &'static str,
        /// Configured value in seconds
        value: f32,
    },
    /// Poll tick period must be at least 1us
    InvalidTickPeriod(f32),
    /// A builder was finished without a required part
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Output pin write failed
    PinError,
}

/// Switch input errors.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Input pin read failed
    PinError {
        /// Which switch failed
        switch: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Input(e) => write!(f, "Input error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidDelayRange { setting, min, max } => {
                write!(f, "Invalid {} range: min ({}) must be <= max ({})", setting, min, max)
            }
            ConfigError::InvalidProbability(p) => {
                write!(f, "Invalid pause probability: {}. Must be within 0.0-1.0", p)
            }
            ConfigError::InvalidPwmPhase { setting, value } => {
                write!(
                    f,
                    "Invalid {}: {}. Must be at least 1us with speed control enabled",
                    setting, value
                )
            }
            ConfigError::InvalidDuration { setting, value } => {
                write!(
                    f,
                    "Invalid {}: {}. Must be a finite, non-negative number of seconds",
                    setting, value
                )
            }
            ConfigError::InvalidTickPeriod(v) => {
                write!(f, "Invalid tick period: {}. Must be at least 1us", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO output pin operation failed"),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::PinError { switch } => write!(f, "Failed to read {} switch", switch),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Error::Input(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}
