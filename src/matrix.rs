//! Dense row-major `f32` matrix.
//!
//! Only what batched forward propagation needs: bias-column prepend, shape-checked
//! products (plain and against a transposed right operand) and element-wise maps.
//! Products never broadcast; any inner-dimension disagreement is an
//! [`Error::ShapeMismatch`] carrying both operand shapes.

use crate::error::Shape;
use crate::matmul::{Strided, gemm};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a matrix whose entry `(r, c)` is `f(r, c)`, filled row by row.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    /// Wrap a row-major buffer of shape `(rows, cols)`.
    pub fn from_flat(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::data(format!(
                "buffer length {} does not match {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Copy per-row vectors into contiguous storage.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::data("matrix must have at least one row"));
        };
        let cols = first.len();

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::data_at(
                    i,
                    format!("row has len {}, expected {cols}", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    /// Row-major backing buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Panics if `r >= rows` or `c >= cols`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f32 {
        assert!(c < self.cols, "column {c} out of range for {} cols", self.cols);
        self.data[r * self.cols + c]
    }

    /// Panics if `r >= rows`.
    #[inline]
    pub fn row(&self, r: usize) -> &[f32] {
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Panics if `c >= cols`.
    pub fn column(&self, c: usize) -> impl Iterator<Item = f32> + '_ {
        assert!(c < self.cols, "column {c} out of range for {} cols", self.cols);
        (0..self.rows).map(move |r| self.data[r * self.cols + c])
    }

    /// Copy of `self` with a column of ones prepended: `[1 | self]`.
    pub fn with_bias_column(&self) -> Matrix {
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for r in 0..self.rows {
            data.push(1.0);
            data.extend_from_slice(self.row(r));
        }
        Matrix {
            data,
            rows: self.rows,
            cols,
        }
    }

    pub fn map_inplace(&mut self, f: impl Fn(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// `self * rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        self.product(rhs, false, "matmul")
    }

    /// `self * rhs^T`, without materializing the transpose.
    pub fn matmul_transposed(&self, rhs: &Matrix) -> Result<Matrix> {
        self.product(rhs, true, "matmul_transposed")
    }

    pub(crate) fn product(&self, rhs: &Matrix, rhs_transposed: bool, op: &str) -> Result<Matrix> {
        let (inner, n, rs, cs) = if rhs_transposed {
            (rhs.cols, rhs.rows, 1, rhs.cols)
        } else {
            (rhs.rows, rhs.cols, rhs.cols, 1)
        };

        if self.cols != inner {
            return Err(Error::ShapeMismatch {
                op: op.to_owned(),
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let a = Strided {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            rs: self.cols,
            cs: 1,
        };
        let b = Strided {
            data: &rhs.data,
            rows: inner,
            cols: n,
            rs,
            cs,
        };

        let mut out = Matrix::zeros(self.rows, n);
        gemm(a, b, &mut out.data);
        Ok(out)
    }
}
