//! Error types for the duel arena.

use thiserror::Error;

/// Top-level error type for duel operations.
#[derive(Debug, Error)]
pub enum DuelError {
    /// Configuration rejected at the boundary
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration values that fall outside what the simulation accepts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be zero or greater was negative
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Dotted path of the offending field
        field: String,
        /// Value supplied
        value: f32,
    },

    /// A value that must be strictly positive was zero or negative
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive {
        /// Dotted path of the offending field
        field: String,
        /// Value supplied
        value: f32,
    },

    /// NaN or infinity
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Dotted path of the offending field
        field: String,
    },

    /// Value outside an inclusive range
    #[error("{field} must lie within [{min}, {max}] (got {value})")]
    OutOfRange {
        /// Dotted path of the offending field
        field: String,
        /// Value supplied
        value: f32,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
}

impl ConfigError {
    /// Returns the dotted path of the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Negative { field, .. }
            | Self::NotPositive { field, .. }
            | Self::NotFinite { field }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Result type alias for duel operations.
pub type DuelResult<T> = Result<T, DuelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: DuelError = ConfigError::NotFinite {
            field: "physics.gravity".to_string(),
        }
        .into();
        assert!(err.to_string().contains("physics.gravity"));
    }

    #[test]
    fn test_field_accessor() {
        let err = ConfigError::OutOfRange {
            field: "hitbox.front_ratio".to_string(),
            value: 2.0,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(err.field(), "hitbox.front_ratio");
    }
}
