use std::ops::AddAssign;

use crate::error::{Error, Result};
use crate::random::RandomSource;

/// A dense matrix of `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Mat {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns a matrix with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Mat {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut mat = Mat::zeros(size, size);
        for i in 0..size {
            mat.data[i * size + i] = 1.0;
        }
        mat
    }

    /// Builds a matrix from explicit rows. All rows must share one width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in &rows {
            if row.len() != width {
                return Err(Error::ShapeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Mat {
            rows: rows.len(),
            cols: width,
            data,
        })
    }

    /// Fills a matrix with draws from `source`, row by row, each draw
    /// multiplied by `scale`.
    pub fn random(
        source: &mut dyn RandomSource,
        scale: f64,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        let mut data = Vec::with_capacity(rows * cols);
        for _ in 0..(rows * cols) {
            data.push(scale * source.next()?);
        }
        Ok(Mat { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Computes the matrix-vector product `self · v`.
    pub fn dot(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.cols {
            return Err(Error::ShapeMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }
        Ok(self
            .data
            .chunks(self.cols)
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect())
    }

    /// Computes the transposed product `selfᵀ · v`.
    pub fn transpose_dot(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.rows {
            return Err(Error::ShapeMismatch {
                expected: self.rows,
                actual: v.len(),
            });
        }
        let mut out = vec![0.0; self.cols];
        for (row, &e) in self.data.chunks(self.cols).zip(v) {
            for (o, &w) in out.iter_mut().zip(row) {
                *o += w * e;
            }
        }
        Ok(out)
    }
}

impl<'a> AddAssign<&'a Mat> for Mat {
    fn add_assign(&mut self, other: &Mat) {
        for (l, r) in self.data.iter_mut().zip(other.data.iter()) {
            *l += *r;
        }
    }
}
