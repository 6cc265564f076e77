use clap::Parser;
use tm_fill::{FillKind, DEFAULT_SEED};
use tm_tensor::cpu::matmul::DEFAULT_BLOCK;
use tm_tensor::{TileGrid, DEFAULT_RELATIVE_TOLERANCE};

use crate::error::{CliError, Result};

/// Matrix dimension used by the reference driver.
pub const DEFAULT_SIZE: usize = 256;

/// Multiply two square matrices with a tiled parallel kernel and check the
/// result against a serial reference.
///
/// Prints SUCCESS or FAILURE on stdout. Set RUST_LOG for diagnostics.
#[derive(Parser, Debug)]
#[command(name = "tiled-matmul", version)]
pub struct Args {
    /// Matrix dimension N.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Tile side length B. Must divide N.
    #[arg(short, long, default_value_t = DEFAULT_BLOCK)]
    pub block: usize,

    /// Seed for the uniform generator.
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum relative error per element.
    #[arg(short, long, default_value_t = DEFAULT_RELATIVE_TOLERANCE)]
    pub tolerance: f32,

    /// Worker threads (defaults to rayon's choice).
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Generator for the left operand: uniform, zeros, identity or index-sum.
    #[arg(long, default_value_t = FillKind::Uniform)]
    pub fill_a: FillKind,

    /// Generator for the right operand: uniform, zeros, identity or index-sum.
    #[arg(long, default_value_t = FillKind::Uniform)]
    pub fill_b: FillKind,

    /// Log at info level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub grid: TileGrid,
    pub seed: u64,
    pub tolerance: f32,
    pub threads: Option<usize>,
    pub fill_a: FillKind,
    pub fill_b: FillKind,
}

impl Default for RunConfig {
    /// The reference run: 256x256 uniform operands, 8x8 tiles, seed 42.
    fn default() -> Self {
        let grid = TileGrid::new(DEFAULT_SIZE, DEFAULT_BLOCK)
            .expect("default size is a multiple of the default block");
        RunConfig {
            grid,
            seed: DEFAULT_SEED,
            tolerance: DEFAULT_RELATIVE_TOLERANCE,
            threads: None,
            fill_a: FillKind::Uniform,
            fill_b: FillKind::Uniform,
        }
    }
}

impl RunConfig {
    /// Build a config for an `n x n` run with `block x block` tiles and the
    /// reference defaults for everything else.
    pub fn new(n: usize, block: usize) -> Result<Self> {
        Ok(RunConfig {
            grid: TileGrid::new(n, block)?,
            ..Default::default()
        })
    }

    pub fn with_fills(mut self, a: FillKind, b: FillKind) -> Self {
        self.fill_a = a;
        self.fill_b = b;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl TryFrom<&Args> for RunConfig {
    type Error = CliError;

    fn try_from(args: &Args) -> Result<Self> {
        if !(args.tolerance.is_finite() && args.tolerance > 0.0) {
            return Err(CliError::InvalidConfig(format!(
                "tolerance must be finite and > 0, got {}",
                args.tolerance
            )));
        }
        if args.threads == Some(0) {
            return Err(CliError::InvalidConfig(
                "threads must be > 0".to_string(),
            ));
        }

        Ok(RunConfig {
            grid: TileGrid::new(args.size, args.block)?,
            seed: args.seed,
            tolerance: args.tolerance,
            threads: args.threads,
            fill_a: args.fill_a,
            fill_b: args.fill_b,
        })
    }
}
