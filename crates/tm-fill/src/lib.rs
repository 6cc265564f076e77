pub mod deterministic;
pub mod fill;
pub mod uniform;

pub use deterministic::{IdentityFill, IndexSumFill, ZeroFill};
pub use fill::{operands, Fill, FillKind};
pub use uniform::{UniformFill, DEFAULT_SEED};
