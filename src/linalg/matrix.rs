//! Dense column-major matrix
//!
//! Stored as `columns` [`Vector`]s of length `rows`. In the path matrix each
//! row is one simulated path and each column one time step, so the engine
//! fills it a column (a whole cross-section) at a time.
//!
//! Row and column extraction return copies. The only in-place mutations are
//! [`Matrix::insert_col`], [`Matrix::insert_row`] and [`Matrix::set`].

use super::element::Element;
use super::vector::Vector;
use crate::error::{McError, McResult};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    columns: usize,
    data: Vec<Vector<T>>,
}

impl<T: Element> Matrix<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        Matrix {
            rows,
            columns,
            data: vec![Vector::new(rows, value); columns],
        }
    }

    /// Build from explicit columns, each of length `rows`
    pub fn from_columns(rows: usize, columns: usize, data: Vec<Vector<T>>) -> McResult<Self> {
        let total: usize = data.iter().map(Vector::len).sum();
        let expected = element_count(rows, columns, total)?;
        if total != expected {
            return Err(McError::dimension_mismatch(
                "matrix construction (element count)",
                expected,
                total,
            ));
        }
        if data.len() != columns {
            return Err(McError::dimension_mismatch(
                "matrix construction (column count)",
                columns,
                data.len(),
            ));
        }
        if let Some(bad) = data.iter().find(|c| c.len() != rows) {
            return Err(McError::dimension_mismatch(
                "matrix construction (column length)",
                rows,
                bad.len(),
            ));
        }
        Ok(Matrix {
            rows,
            columns,
            data,
        })
    }

    /// Build from row-major data of length `rows * columns`
    pub fn from_row_major(rows: usize, columns: usize, values: &[T]) -> McResult<Self> {
        let expected = element_count(rows, columns, values.len())?;
        if values.len() != expected {
            return Err(McError::dimension_mismatch(
                "matrix construction (element count)",
                expected,
                values.len(),
            ));
        }
        let data = (0..columns)
            .map(|j| (0..rows).map(|i| values[i * columns + j]).collect::<Vector<T>>())
            .collect();
        Ok(Matrix {
            rows,
            columns,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    fn check_row(&self, i: usize) -> McResult<()> {
        if i >= self.rows {
            return Err(McError::index_out_of_range("matrix rows", i, self.rows));
        }
        Ok(())
    }

    fn check_col(&self, j: usize) -> McResult<()> {
        if j >= self.columns {
            return Err(McError::index_out_of_range(
                "matrix columns",
                j,
                self.columns,
            ));
        }
        Ok(())
    }

    pub fn get(&self, i: usize, j: usize) -> McResult<T> {
        self.check_row(i)?;
        self.check_col(j)?;
        Ok(self.data[j][i])
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> McResult<()> {
        self.check_row(i)?;
        self.check_col(j)?;
        self.data[j][i] = value;
        Ok(())
    }

    /// Copy of column `j`
    pub fn col(&self, j: usize) -> McResult<Vector<T>> {
        Ok(self.col_ref(j)?.clone())
    }

    /// Read-only view of column `j`
    pub fn col_ref(&self, j: usize) -> McResult<&Vector<T>> {
        self.check_col(j)?;
        Ok(&self.data[j])
    }

    /// Row `i` gathered from every column
    pub fn row(&self, i: usize) -> McResult<Vector<T>> {
        self.check_row(i)?;
        Ok(self.data.iter().map(|c| c[i]).collect())
    }

    /// Replace column `j`
    pub fn insert_col(&mut self, j: usize, data: Vector<T>) -> McResult<()> {
        self.check_col(j)?;
        if data.len() != self.rows {
            return Err(McError::dimension_mismatch(
                "column insertion",
                self.rows,
                data.len(),
            ));
        }
        self.data[j] = data;
        Ok(())
    }

    /// Replace row `i`
    pub fn insert_row(&mut self, i: usize, data: &Vector<T>) -> McResult<()> {
        self.check_row(i)?;
        if data.len() != self.columns {
            return Err(McError::dimension_mismatch(
                "row insertion",
                self.columns,
                data.len(),
            ));
        }
        for (column, &value) in self.data.iter_mut().zip(data.iter()) {
            column[i] = value;
        }
        Ok(())
    }

    /// Every row, in order
    pub fn row_iter(&self) -> impl Iterator<Item = Vector<T>> + '_ {
        (0..self.rows).map(move |i| self.data.iter().map(|c| c[i]).collect::<Vector<T>>())
    }

    pub fn transposed(&self) -> Matrix<T> {
        Matrix {
            rows: self.columns,
            columns: self.rows,
            data: (0..self.rows)
                .map(|i| self.data.iter().map(|c| c[i]).collect::<Vector<T>>())
                .collect(),
        }
    }

    /// Standard matrix product `self * other`
    pub fn multiply(&self, other: &Matrix<T>) -> McResult<Matrix<T>> {
        let ops = T::require_arithmetic("matrix multiplication")?;
        if self.columns != other.rows {
            return Err(McError::dimension_mismatch(
                "matrix multiplication",
                self.columns,
                other.rows,
            ));
        }
        let data = other
            .data
            .iter()
            .map(|b_col| {
                (0..self.rows)
                    .map(|i| {
                        self.data
                            .iter()
                            .zip(b_col.iter())
                            .try_fold(T::default(), |acc, (a_col, &b)| {
                                (ops.mul)(a_col[i], b)
                                    .and_then(|p| (ops.add)(acc, p))
                                    .ok_or_else(|| T::arithmetic_error("matrix multiplication"))
                            })
                    })
                    .collect::<McResult<Vector<T>>>()
            })
            .collect::<McResult<Vec<_>>>()?;
        Ok(Matrix {
            rows: self.rows,
            columns: other.columns,
            data,
        })
    }
}

/// `rows * columns`, or a mismatch against `found` when the product overflows
fn element_count(rows: usize, columns: usize, found: usize) -> McResult<usize> {
    rows.checked_mul(columns).ok_or_else(|| {
        McError::dimension_mismatch("matrix construction (element count overflow)", usize::MAX, found)
    })
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for (j, column) in self.data.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", column[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
