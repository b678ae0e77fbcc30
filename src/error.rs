// src/error.rs
use std::fmt;

/// Custom error types for the fair-price library
#[derive(Debug, Clone)]
pub enum PricerError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// Path simulation error
    SimulationError { paths: usize, reason: String },

    /// Numerical instability or breakdown of an estimator
    NumericalInstability { method: String, reason: String },
}

impl fmt::Display for PricerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricerError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            PricerError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            PricerError::SimulationError { paths, reason } => {
                write!(f, "Simulation error with {} paths: {}", paths, reason)
            }
            PricerError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
        }
    }
}

impl std::error::Error for PricerError {}

/// Result type alias for fair-price operations
pub type PricerResult<T> = Result<T, PricerError>;

/// Validation utilities
pub mod validation {
    use super::{PricerError, PricerResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PricerResult<()> {
        if value <= 0.0 {
            Err(PricerError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PricerResult<()> {
        if value < 0.0 {
            Err(PricerError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricerResult<()> {
        if !value.is_finite() {
            Err(PricerError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> PricerResult<()> {
        if paths == 0 {
            Err(PricerError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(PricerError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> PricerResult<()> {
        if steps == 0 {
            Err(PricerError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(PricerError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sigma", 0.0).is_ok());
        assert!(validate_non_negative("sigma", 0.3).is_ok());
        assert!(validate_non_negative("sigma", -0.01).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_paths() {
        assert!(validate_paths(1).is_ok());
        assert!(validate_paths(1_000_000).is_ok());
        assert!(validate_paths(0).is_err());
        assert!(validate_paths(2_000_000_000).is_err());
    }

    #[test]
    fn test_validate_steps() {
        assert!(validate_steps(252).is_ok());
        assert!(validate_steps(0).is_err());
        assert!(validate_steps(200_000).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = PricerError::InvalidParameters {
            parameter: "sigma".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_simulation_error_display() {
        let error = PricerError::SimulationError {
            paths: 50_000,
            reason: "terminal price overflow".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("50000"));
        assert!(display.contains("overflow"));
    }
}
