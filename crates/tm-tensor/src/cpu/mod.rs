pub mod dispatch;
pub mod matmul;

pub use matmul::{tiled_matmul_into, TiledBackend};

use crate::backend::MatmulBackend;
use crate::error::Result;
use crate::matrix::Matrix;

/// Serial reference matmul.
///
/// A plain i-j-k triple loop optimized for clarity rather than speed. Used
/// as the oracle that the tiled kernel is verified against.
#[derive(Debug, Clone)]
pub struct SerialBackend;

impl SerialBackend {
    pub fn new() -> Self {
        SerialBackend
    }
}

impl Default for SerialBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MatmulBackend for SerialBackend {
    fn name(&self) -> &str {
        "serial"
    }

    fn matmul_into(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        a.check_same_dim(b)?;
        a.check_same_dim(c)?;

        let n = a.dim();
        let (a, b) = (a.data(), b.data());
        let c = c.data_mut();
        for row in 0..n {
            for col in 0..n {
                let mut sum = 0.0f32;
                for k in 0..n {
                    sum += a[row * n + k] * b[k * n + col];
                }
                c[row * n + col] += sum;
            }
        }
        Ok(())
    }
}
