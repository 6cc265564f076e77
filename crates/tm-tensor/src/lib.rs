//! `tm-tensor` - Square matrices and tiled matmul kernels for tiled-matmul.
//!
//! This crate provides:
//! - A row-major square `Matrix` type
//! - `TileGrid`, the decomposition of an `n x n` index space into tiles
//! - A grouped parallel-for (work-groups of work-items) built on rayon
//! - A `MatmulBackend` trait with a serial reference and a tiled backend
//! - Relative-error verification of a result against a reference

pub mod backend;
pub mod cpu;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod verify;

// Re-export primary types at the crate root for convenience.
pub use backend::MatmulBackend;
pub use cpu::{SerialBackend, TiledBackend};
pub use error::{Result, TensorError};
pub use grid::{LocalCoord, TileCoord, TileGrid};
pub use matrix::Matrix;
pub use verify::{verify, VerifyReport, DEFAULT_RELATIVE_TOLERANCE};
