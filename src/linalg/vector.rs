//! Fixed-length numeric vector
//!
//! A thin value type over [`ndarray::Array1`] whose length never changes after
//! construction. Every binary operation checks lengths and reports
//! [`McError::DimensionMismatch`] rather than truncating or padding.
//!
//! # Statistics
//!
//! ```text
//! mean = (1/N) Σ xᵢ
//! var  = 1/(N-1) Σ (xᵢ - mean)²      (Bessel's correction)
//! ```

use super::element::{Arithmetic, Element};
use crate::error::{McError, McResult};
use ndarray::{Array1, Zip};
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T> {
    data: Array1<T>,
}

impl<T: Element> Vector<T> {
    /// Vector of `len` copies of `value`
    pub fn new(len: usize, value: T) -> Self {
        Vector {
            data: Array1::from_elem(len, value),
        }
    }

    /// Vector of `len` default values (zero for numeric types)
    pub fn zeros(len: usize) -> Self {
        Self::new(len, T::default())
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Vector {
            data: Array1::from(values),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked element access
    pub fn get(&self, i: usize) -> McResult<T> {
        self.data
            .get(i)
            .copied()
            .ok_or_else(|| McError::index_out_of_range("vector", i, self.len()))
    }

    /// Checked element update
    pub fn set(&mut self, i: usize, value: T) -> McResult<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(i)
            .ok_or_else(|| McError::index_out_of_range("vector", i, len))?;
        *slot = value;
        Ok(())
    }

    pub fn last(&self) -> Option<T> {
        self.data.iter().last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }

    /// Apply `f` to every element; needs no arithmetic on `T`
    pub fn map<U: Element>(&self, f: impl Fn(T) -> U) -> Vector<U> {
        Vector {
            data: self.data.mapv(f),
        }
    }

    fn ensure_same_len(&self, other: &Self, operation: &str) -> McResult<()> {
        if self.len() != other.len() {
            return Err(McError::dimension_mismatch(
                operation,
                self.len(),
                other.len(),
            ));
        }
        Ok(())
    }

    fn scalar_op(
        &self,
        operation: &str,
        f: impl Fn(Arithmetic<T>, T) -> Option<T>,
    ) -> McResult<Self> {
        let ops = T::require_arithmetic(operation)?;
        self.data
            .iter()
            .map(|&x| f(ops, x).ok_or_else(|| T::arithmetic_error(operation)))
            .collect()
    }

    fn vector_op(
        &self,
        other: &Self,
        operation: &str,
        f: impl Fn(Arithmetic<T>, T, T) -> Option<T>,
    ) -> McResult<Self> {
        let ops = T::require_arithmetic(operation)?;
        self.ensure_same_len(other, operation)?;
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(ops, a, b).ok_or_else(|| T::arithmetic_error(operation)))
            .collect()
    }

    // lengths are checked by callers
    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        Vector {
            data: Zip::from(&self.data)
                .and(&other.data)
                .map_collect(|&a, &b| f(a, b)),
        }
    }

    pub fn add_scalar(&self, s: T) -> McResult<Self> {
        self.scalar_op("scalar addition", |ops, x| (ops.add)(x, s))
    }

    pub fn sub_scalar(&self, s: T) -> McResult<Self> {
        self.scalar_op("scalar subtraction", |ops, x| (ops.sub)(x, s))
    }

    /// `s - v[i]` for every element
    pub fn rsub_scalar(&self, s: T) -> McResult<Self> {
        self.scalar_op("scalar subtraction", |ops, x| (ops.sub)(s, x))
    }

    pub fn mul_scalar(&self, s: T) -> McResult<Self> {
        self.scalar_op("scalar multiplication", |ops, x| (ops.mul)(x, s))
    }

    /// Float division by zero gives ±inf or NaN; integer division by zero
    /// and integer overflow give `ArithmeticFailure`
    pub fn div_scalar(&self, s: T) -> McResult<Self> {
        self.scalar_op("scalar division", |ops, x| (ops.div)(x, s))
    }

    pub fn add_vector(&self, other: &Self) -> McResult<Self> {
        self.vector_op(other, "vector addition", |ops, a, b| (ops.add)(a, b))
    }

    pub fn sub_vector(&self, other: &Self) -> McResult<Self> {
        self.vector_op(other, "vector subtraction", |ops, a, b| (ops.sub)(a, b))
    }

    /// Elementwise (Hadamard) product
    pub fn mul_vector(&self, other: &Self) -> McResult<Self> {
        self.vector_op(other, "elementwise multiplication", |ops, a, b| {
            (ops.mul)(a, b)
        })
    }

    pub fn dot(&self, other: &Self) -> McResult<T> {
        let ops = T::require_arithmetic("dot product")?;
        self.ensure_same_len(other, "dot product")?;
        self.data
            .iter()
            .zip(other.data.iter())
            .try_fold(T::default(), |acc, (&a, &b)| {
                (ops.mul)(a, b)
                    .and_then(|p| (ops.add)(acc, p))
                    .ok_or_else(|| T::arithmetic_error("dot product"))
            })
    }

    /// Elementwise `max(v[i], s)`
    pub fn max_scalar(&self, s: T) -> Self {
        self.map(|x| if s > x { s } else { x })
    }

    /// Elementwise `min(v[i], s)`
    pub fn min_scalar(&self, s: T) -> Self {
        self.map(|x| if s < x { s } else { x })
    }

    pub fn max_vector(&self, other: &Self) -> McResult<Self> {
        self.ensure_same_len(other, "elementwise max")?;
        Ok(self.zip_with(other, |a, b| if b > a { b } else { a }))
    }

    pub fn min_vector(&self, other: &Self) -> McResult<Self> {
        self.ensure_same_len(other, "elementwise min")?;
        Ok(self.zip_with(other, |a, b| if b < a { b } else { a }))
    }

    pub fn sum(&self) -> McResult<T> {
        let ops = T::require_arithmetic("sum")?;
        self.data.iter().try_fold(T::default(), |acc, &x| {
            (ops.add)(acc, x).ok_or_else(|| T::arithmetic_error("sum"))
        })
    }

    /// Arithmetic mean, accumulated in `f64`
    pub fn mean(&self) -> McResult<f64> {
        let ops = T::require_arithmetic("mean")?;
        if self.is_empty() {
            return Err(McError::insufficient_data("mean", 1, 0));
        }
        let total: f64 = self.data.iter().map(|&x| (ops.to_f64)(x)).sum();
        Ok(total / self.len() as f64)
    }

    /// Sample variance with Bessel's correction
    pub fn var(&self) -> McResult<f64> {
        let ops = T::require_arithmetic("variance")?;
        let n = self.len();
        if n < 2 {
            return Err(McError::insufficient_data("sample variance", 2, n));
        }
        let mean = self.mean()?;
        let sum_squared_diff: f64 = self
            .data
            .iter()
            .map(|&x| {
                let dev = (ops.to_f64)(x) - mean;
                dev * dev
            })
            .sum();
        Ok(sum_squared_diff / (n - 1) as f64)
    }

    pub fn std_dev(&self) -> McResult<f64> {
        Ok(self.var()?.sqrt())
    }
}

impl<T: Element> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Vector::from_vec(values)
    }
}

impl<T: Element> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector {
            data: iter.into_iter().collect(),
        }
    }
}

/// Unchecked access; panics out of range like a slice. Prefer [`Vector::get`].
impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}
