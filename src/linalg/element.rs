//! Element types storable in [`Vector`](super::Vector) and [`Matrix`](super::Matrix).
//!
//! Every element supports ordering (for elementwise min/max) but only the
//! numeric primitives carry arithmetic. Non-numeric elements such as `bool`
//! can be stored and compared; asking them for arithmetic yields
//! [`McError::UnsupportedOperation`] before any other check runs.
//!
//! Kernels return `None` when the result is not representable: integer
//! overflow and integer division by zero. Float kernels follow IEEE 754 and
//! never fail.

use crate::error::{McError, McResult};
use std::fmt::Debug;

/// Arithmetic kernels for a numeric element type
#[derive(Clone, Copy)]
pub struct Arithmetic<T> {
    pub add: fn(T, T) -> Option<T>,
    pub sub: fn(T, T) -> Option<T>,
    pub mul: fn(T, T) -> Option<T>,
    pub div: fn(T, T) -> Option<T>,
    pub to_f64: fn(T) -> f64,
}

/// A value that can live inside a vector or matrix
pub trait Element: Copy + PartialOrd + Default + Debug {
    /// Arithmetic for this type, `None` when the type has none
    fn arithmetic() -> Option<Arithmetic<Self>>;

    /// Arithmetic for this type, or `UnsupportedOperation` naming `operation`
    fn require_arithmetic(operation: &str) -> McResult<Arithmetic<Self>> {
        Self::arithmetic().ok_or_else(|| McError::UnsupportedOperation {
            operation: operation.to_string(),
            element_type: std::any::type_name::<Self>().to_string(),
        })
    }

    /// Error for a kernel that returned `None` during `operation`
    fn arithmetic_error(operation: &str) -> McError {
        McError::ArithmeticFailure {
            operation: operation.to_string(),
            element_type: std::any::type_name::<Self>().to_string(),
        }
    }
}

macro_rules! float_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn arithmetic() -> Option<Arithmetic<Self>> {
                    Some(Arithmetic {
                        add: |a, b| Some(a + b),
                        sub: |a, b| Some(a - b),
                        mul: |a, b| Some(a * b),
                        div: |a, b| Some(a / b),
                        to_f64: |a| a as f64,
                    })
                }
            }
        )*
    };
}

float_element!(f64, f32);

macro_rules! integer_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn arithmetic() -> Option<Arithmetic<Self>> {
                    Some(Arithmetic {
                        add: <$t>::checked_add,
                        sub: <$t>::checked_sub,
                        mul: <$t>::checked_mul,
                        div: <$t>::checked_div,
                        to_f64: |a| a as f64,
                    })
                }
            }
        )*
    };
}

integer_element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! opaque_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn arithmetic() -> Option<Arithmetic<Self>> {
                    None
                }
            }
        )*
    };
}

opaque_element!(bool, char);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types_have_arithmetic() {
        let ops = f64::require_arithmetic("add").unwrap();
        assert_eq!((ops.add)(1.5, 2.0), Some(3.5));
        assert_eq!((ops.div)(1.0, 4.0), Some(0.25));
        assert_eq!((ops.div)(1.0, 0.0), Some(f64::INFINITY));

        let ops = i32::require_arithmetic("mul").unwrap();
        assert_eq!((ops.mul)(6, 7), Some(42));
        assert_eq!((ops.to_f64)(-3), -3.0);
    }

    #[test]
    fn test_integer_kernels_are_checked() {
        let ops = i8::require_arithmetic("div").unwrap();
        assert_eq!((ops.div)(i8::MIN, -1), None);
        assert_eq!((ops.div)(7, 0), None);
        assert_eq!((ops.add)(i8::MAX, 1), None);
        assert_eq!((ops.sub)(i8::MIN, 1), None);

        let ops = u32::require_arithmetic("sub").unwrap();
        assert_eq!((ops.sub)(0, 1), None);
        assert_eq!((ops.mul)(u32::MAX, 2), None);

        assert!(matches!(
            i32::arithmetic_error("scalar division"),
            McError::ArithmeticFailure { .. }
        ));
    }

    #[test]
    fn test_opaque_types_are_rejected() {
        match bool::require_arithmetic("scalar addition") {
            Err(McError::UnsupportedOperation {
                operation,
                element_type,
            }) => {
                assert_eq!(operation, "scalar addition");
                assert_eq!(element_type, "bool");
            }
            other => panic!("expected UnsupportedOperation, got {:?}", other.is_ok()),
        }
        assert!(char::arithmetic().is_none());
    }
}
