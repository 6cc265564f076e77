use std::fmt::Debug;

use crate::error::Result;
use crate::matrix::Matrix;

/// Trait for pluggable matrix multiplication backends (serial, tiled, etc.).
///
/// All matrices are square and share one dimension. Backends accumulate into
/// a caller-owned output so the caller decides how it is initialized.
pub trait MatmulBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "serial", "tiled").
    fn name(&self) -> &str;

    /// Accumulates `a @ b` into `c`: `c[row][col] += sum_k a[row][k] * b[k][col]`.
    ///
    /// Callers wanting the plain product pass a zero-initialized `c`.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` unless `a`, `b` and `c` share a dimension,
    /// plus any backend-specific precondition failure.
    fn matmul_into(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()>;

    /// Matrix product `a @ b` into a freshly zeroed output.
    fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.check_same_dim(b)?;
        let mut c = Matrix::zeros(a.dim());
        self.matmul_into(a, b, &mut c)?;
        Ok(c)
    }
}
