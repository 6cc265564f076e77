use std::fmt;
use std::str::FromStr;

use tm_tensor::Matrix;

use crate::deterministic::{IdentityFill, IndexSumFill, ZeroFill};
use crate::uniform::UniformFill;

/// Trait for generators that produce square input matrices.
pub trait Fill: Send {
    /// Returns the name of this fill.
    fn name(&self) -> &str;

    /// Produce the next `n x n` matrix.
    ///
    /// Stateful fills (e.g. seeded random) continue their stream across calls.
    fn fill(&mut self, n: usize) -> Matrix;
}

/// Selects a fill by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillKind {
    /// Uniform floats in [0, 1) from a seeded generator.
    #[default]
    Uniform,
    /// All zeros.
    Zeros,
    /// The identity matrix.
    Identity,
    /// Element (i, j) is `i + j`.
    IndexSum,
}

impl FillKind {
    pub const ALL: [FillKind; 4] = [
        FillKind::Uniform,
        FillKind::Zeros,
        FillKind::Identity,
        FillKind::IndexSum,
    ];

    /// Build the fill. `seed` is only used by [`FillKind::Uniform`].
    pub fn build(self, seed: u64) -> Box<dyn Fill> {
        match self {
            FillKind::Uniform => Box::new(UniformFill::new(seed)),
            FillKind::Zeros => Box::new(ZeroFill),
            FillKind::Identity => Box::new(IdentityFill),
            FillKind::IndexSum => Box::new(IndexSumFill),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FillKind::Uniform => "uniform",
            FillKind::Zeros => "zeros",
            FillKind::Identity => "identity",
            FillKind::IndexSum => "index-sum",
        }
    }
}

impl fmt::Display for FillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FillKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown fill '{}'", s))
    }
}

/// Produce the (A, B) operand pair.
///
/// When both sides use the same kind they share one generator, so A and B
/// are consecutive draws from the same stream.
pub fn operands(a: FillKind, b: FillKind, seed: u64, n: usize) -> (Matrix, Matrix) {
    if a == b {
        let mut fill = a.build(seed);
        let lhs = fill.fill(n);
        let rhs = fill.fill(n);
        (lhs, rhs)
    } else {
        (a.build(seed).fill(n), b.build(seed).fill(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for kind in FillKind::ALL {
            assert_eq!(kind.as_str().parse::<FillKind>().unwrap(), kind);
        }
        assert!("gaussian".parse::<FillKind>().is_err());
    }

    #[test]
    fn test_build_names() {
        assert_eq!(FillKind::Uniform.build(0).name(), "uniform");
        assert_eq!(FillKind::IndexSum.build(0).name(), "index-sum");
    }

    #[test]
    fn test_shared_stream_gives_distinct_operands() {
        let (a, b) = operands(FillKind::Uniform, FillKind::Uniform, 42, 8);
        assert_eq!(a.dim(), 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_mixed_operands() {
        let (a, b) = operands(FillKind::IndexSum, FillKind::Identity, 42, 4);
        assert_eq!(a.get(2, 3), 5.0);
        assert_eq!(b, Matrix::identity(4));
    }
}
