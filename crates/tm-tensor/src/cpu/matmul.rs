//! Tiled matrix multiplication.
//!
//! The output is split into `block x block` tiles. Each tile is one
//! work-group, and each cell inside it is one work-item that runs the full
//! dot product over the shared dimension.

use tracing::debug;

use super::dispatch::parallel_for_work_group;
use crate::backend::MatmulBackend;
use crate::error::{Result, TensorError};
use crate::grid::TileGrid;
use crate::matrix::Matrix;

/// Work-group side length used by the reference driver.
pub const DEFAULT_BLOCK: usize = 8;

/// Accumulates `a @ b` into `c` using the tile decomposition in `grid`.
///
/// All three slices are row-major `n x n` with `n = grid.dim()`. Every cell
/// of `c` is written exactly once, by the work-item that owns it. `a` and `b`
/// are only read.
///
/// # Errors
/// Returns `LengthMismatch` if any slice is not `n * n` long.
pub fn tiled_matmul_into(a: &[f32], b: &[f32], c: &mut [f32], grid: &TileGrid) -> Result<()> {
    let n = grid.dim();
    for (what, len) in [("lhs", a.len()), ("rhs", b.len()), ("output", c.len())] {
        if len != n * n {
            return Err(TensorError::LengthMismatch {
                what,
                n,
                expected: n * n,
                got: len,
            });
        }
    }

    parallel_for_work_group(grid, c, |group| {
        group.parallel_for_work_item(|mut item| {
            let (row, col) = item.global();
            let lhs = &a[row * n..(row + 1) * n];
            let mut sum = 0.0f32;
            for (k, &x) in lhs.iter().enumerate() {
                sum += x * b[k * n + col];
            }
            *item.cell() += sum;
        });
    });
    Ok(())
}

/// Tiled CPU backend: one rayon task per tile, one per element within it.
#[derive(Debug, Clone)]
pub struct TiledBackend {
    block: usize,
}

impl TiledBackend {
    /// Create a backend that decomposes the output into `block x block` tiles.
    ///
    /// The block is checked against the matrix dimension on each call.
    pub fn new(block: usize) -> Self {
        TiledBackend { block }
    }

    pub fn block(&self) -> usize {
        self.block
    }
}

impl Default for TiledBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK)
    }
}

impl MatmulBackend for TiledBackend {
    fn name(&self) -> &str {
        "tiled"
    }

    fn matmul_into(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        a.check_same_dim(b)?;
        a.check_same_dim(c)?;

        let grid = TileGrid::new(a.dim(), self.block)?;
        debug!(backend = self.name(), %grid, "matmul");
        tiled_matmul_into(a.data(), b.data(), c.data_mut(), &grid)
    }
}
