// src/error.rs
use thiserror::Error;

/// Error types for the mc-pricer library
#[derive(Debug, Error)]
pub enum McError {
    /// A model or option parameter violates its domain constraint
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Operands have incompatible lengths or shapes
    #[error("Dimension mismatch in {operation}: expected {expected}, got {found}")]
    DimensionMismatch {
        operation: String,
        expected: usize,
        found: usize,
    },

    /// Row, column or element access beyond bounds
    #[error("Index {index} out of range for {axis} of length {len}")]
    IndexOutOfRange {
        axis: String,
        index: usize,
        len: usize,
    },

    /// Not enough samples or discount factors for the requested computation
    #[error("Insufficient data for {context}: need at least {required}, got {available}")]
    InsufficientData {
        context: String,
        required: usize,
        available: usize,
    },

    /// Arithmetic requested on an element type that has none
    #[error("Unsupported operation '{operation}' for element type {element_type}")]
    UnsupportedOperation {
        operation: String,
        element_type: String,
    },

    /// Integer overflow or integer division by zero
    #[error("Arithmetic failure in {operation} for element type {element_type}: overflow or division by zero")]
    ArithmeticFailure {
        operation: String,
        element_type: String,
    },

    /// Malformed matrix text input
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for mc-pricer operations
pub type McResult<T> = Result<T, McError>;

impl McError {
    pub(crate) fn dimension_mismatch(operation: &str, expected: usize, found: usize) -> Self {
        McError::DimensionMismatch {
            operation: operation.to_string(),
            expected,
            found,
        }
    }

    pub(crate) fn index_out_of_range(axis: &str, index: usize, len: usize) -> Self {
        McError::IndexOutOfRange {
            axis: axis.to_string(),
            index,
            len,
        }
    }

    pub(crate) fn insufficient_data(context: &str, required: usize, available: usize) -> Self {
        McError::InsufficientData {
            context: context.to_string(),
            required,
            available,
        }
    }
}

/// Validation utilities
pub mod validation {
    use super::{McError, McResult};

    fn invalid(name: &str, value: f64, constraint: impl Into<String>) -> McError {
        McError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: constraint.into(),
        }
    }

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> McResult<()> {
        // NaN fails the comparison and is rejected here too
        if !(value > 0.0) {
            Err(invalid(name, value, "must be positive (> 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> McResult<()> {
        if !(value >= 0.0) {
            Err(invalid(name, value, "must be non-negative (≥ 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> McResult<()> {
        if !value.is_finite() {
            Err(invalid(name, value, "must be finite (not NaN or infinite)"))
        } else {
            Ok(())
        }
    }

    /// Validate a probability level strictly inside (0, 1)
    pub fn validate_probability(name: &str, value: f64) -> McResult<()> {
        if !(value > 0.0 && value < 1.0) {
            Err(invalid(name, value, "must be in the open interval (0, 1)"))
        } else {
            Ok(())
        }
    }

    /// Validate paths count; variance needs at least two samples
    pub fn validate_paths(paths: usize) -> McResult<()> {
        if paths < 2 {
            Err(McError::insufficient_data("sample variance (paths)", 2, paths))
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> McResult<()> {
        if steps == 0 {
            Err(invalid("steps", 0.0, "must be greater than 0"))
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
        assert!(validate_positive("t", 1.0).is_ok());
        assert!(validate_positive("t", 0.0).is_err());
        assert!(validate_positive("t", -0.1).is_err());
        assert!(validate_positive("t", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sigma", 0.0).is_ok());
        assert!(validate_non_negative("sigma", 0.2).is_ok());
        assert!(matches!(
            validate_non_negative("sigma", -0.2),
            Err(McError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_paths_and_steps() {
        assert!(matches!(
            validate_paths(1),
            Err(McError::InsufficientData { required: 2, available: 1, .. })
        ));
        assert!(validate_paths(2).is_ok());
        assert!(validate_steps(0).is_err());
        assert!(validate_steps(1).is_ok());
    }

    #[test]
    fn test_error_display() {
        let error = McError::InvalidParameter {
            parameter: "sigma".to_string(),
            value: -0.1,
            constraint: "must be non-negative".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("non-negative"));

        let error = McError::dimension_mismatch("vector addition", 3, 4);
        let display = error.to_string();
        assert!(display.contains("vector addition"));
        assert!(display.contains('3'));
        assert!(display.contains('4'));
    }
}
