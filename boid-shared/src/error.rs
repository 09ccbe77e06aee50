//! Configuration errors reported before a simulation starts.

use core::fmt;

/// A settings, boundary or spawn value that cannot drive a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// NaN or infinite value.
    NotFinite { field: &'static str },
    /// Must be strictly greater than zero.
    NotPositive { field: &'static str, value: f32 },
    /// Must be zero or greater.
    Negative { field: &'static str, value: f32 },
    /// Must lie inside `[min, max]`.
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl ConfigError {
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::NotFinite { field }
            | ConfigError::NotPositive { field, .. }
            | ConfigError::Negative { field, .. }
            | ConfigError::OutOfRange { field, .. } => *field,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => write!(f, "{} must be a finite number", field),
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {})", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must be between {} and {} (got {})",
                field, min, max, value
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
