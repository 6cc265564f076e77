use crate::backend::MatmulBackend;
use crate::error::{Result, TensorError};
use crate::grid::checked_len;

fn cells(n: usize) -> usize {
    match checked_len(n) {
        Ok(len) => len,
        Err(e) => panic!("{}", e),
    }
}

/// A square `n x n` matrix of f32 values.
///
/// Data is stored contiguously in row-major order: element (row, col) lives
/// at `row * n + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    n: usize,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Panics
    /// Panics if `data.len() != n * n`.
    pub fn new(data: Vec<f32>, n: usize) -> Self {
        match Self::try_new(data, n) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible counterpart of [`Matrix::new`].
    ///
    /// # Errors
    /// Returns `TooLarge` if `n * n` is not addressable and `LengthMismatch`
    /// if `data` has the wrong length.
    pub fn try_new(data: Vec<f32>, n: usize) -> Result<Self> {
        let expected = checked_len(n)?;
        if data.len() != expected {
            return Err(TensorError::LengthMismatch {
                what: "matrix data",
                n,
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { data, n })
    }

    /// Create a zero-filled `n x n` matrix.
    ///
    /// # Panics
    /// Panics if `n * n` is not addressable.
    pub fn zeros(n: usize) -> Self {
        Matrix {
            data: vec![0.0; cells(n)],
            n,
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, |row, col| if row == col { 1.0 } else { 0.0 })
    }

    /// Create a matrix whose element (row, col) is `f(row, col)`.
    ///
    /// # Panics
    /// Panics if `n * n` is not addressable.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(cells(n));
        for row in 0..n {
            for col in 0..n {
                data.push(f(row, col));
            }
        }
        Matrix { data, n }
    }

    /// Side length of the matrix.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Total number of elements (`n * n`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for the 0x0 matrix.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at (row, col).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.n && col < self.n,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.n,
            self.n
        );
        self.data[row * self.n + col]
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    /// Row-major data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable row-major data.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the matrix, returning its row-major data.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Returns an error unless `other` has the same dimension as `self`.
    pub fn check_same_dim(&self, other: &Matrix) -> Result<()> {
        if self.n != other.n {
            return Err(TensorError::DimensionMismatch {
                expected: self.n,
                got: other.n,
            });
        }
        Ok(())
    }

    /// Matrix product `self @ other` computed by the given backend.
    pub fn matmul(&self, other: &Matrix, backend: &dyn MatmulBackend) -> Result<Matrix> {
        backend.matmul(self, other)
    }
}
