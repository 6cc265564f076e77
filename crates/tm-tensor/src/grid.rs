use crate::error::{Result, TensorError};
use std::fmt;

/// Number of cells in an `n x n` f32 matrix.
///
/// # Errors
/// Returns `TooLarge` if `n * n` overflows or the buffer would exceed
/// `isize::MAX` bytes.
pub fn checked_len(n: usize) -> Result<usize> {
    let len = n.checked_mul(n).ok_or(TensorError::TooLarge { n })?;
    match len.checked_mul(std::mem::size_of::<f32>()) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(len),
        _ => Err(TensorError::TooLarge { n }),
    }
}

/// Position of a tile (work-group) within the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub row: usize,
    pub col: usize,
}

/// Position of an element (work-item) within its tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalCoord {
    pub row: usize,
    pub col: usize,
}

/// Decomposition of an `n x n` index space into square tiles of side `block`.
///
/// The grid is only constructible when `block` evenly divides `n`, so every
/// tile is full and every global coordinate derived from a tile and local
/// coordinate lies inside the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGrid {
    n: usize,
    block: usize,
}

impl TileGrid {
    /// Create a grid for an `n x n` matrix split into `block x block` tiles.
    ///
    /// # Errors
    /// Returns `ZeroBlock` if `block == 0`, `IndivisibleTile` if
    /// `n % block != 0` and `TooLarge` if `n * n` cells cannot be addressed.
    pub fn new(n: usize, block: usize) -> Result<Self> {
        checked_len(n)?;
        if block == 0 {
            return Err(TensorError::ZeroBlock);
        }
        if n % block != 0 {
            return Err(TensorError::IndivisibleTile { n, block });
        }
        Ok(TileGrid { n, block })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Tile side length.
    pub fn block(&self) -> usize {
        self.block
    }

    /// Number of tiles along each axis (`n / block`).
    pub fn tiles_per_side(&self) -> usize {
        self.n / self.block
    }

    /// Total number of tiles.
    pub fn num_tiles(&self) -> usize {
        self.tiles_per_side() * self.tiles_per_side()
    }

    /// Global (row, col) of `local` inside tile `tile`.
    pub fn global(&self, tile: TileCoord, local: LocalCoord) -> (usize, usize) {
        debug_assert!(tile.row < self.tiles_per_side() && tile.col < self.tiles_per_side());
        debug_assert!(local.row < self.block && local.col < self.block);
        (
            tile.row * self.block + local.row,
            tile.col * self.block + local.col,
        )
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.tiles_per_side();
        write!(
            f,
            "{}x{} matrix as {}x{} tiles of {}x{}",
            self.n, self.n, side, side, self.block, self.block
        )
    }
}
