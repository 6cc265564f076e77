use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensorError {
    #[error("dimension mismatch: expected {expected}x{expected}, got {got}x{got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("{what}: length {got} does not match {n}x{n} = {expected}")]
    LengthMismatch {
        what: &'static str,
        n: usize,
        expected: usize,
        got: usize,
    },
    #[error("tile size {block} does not divide matrix dimension {n}")]
    IndivisibleTile { n: usize, block: usize },
    #[error("tile size must be > 0")]
    ZeroBlock,
    #[error("{n}x{n} matrix is too large to address")]
    TooLarge { n: usize },
}

pub type Result<T> = std::result::Result<T, TensorError>;
