use tm_tensor::Matrix;

use crate::fill::Fill;

/// All-zero matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFill;

impl Fill for ZeroFill {
    fn name(&self) -> &str {
        "zeros"
    }

    fn fill(&mut self, n: usize) -> Matrix {
        Matrix::zeros(n)
    }
}

/// Identity matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFill;

impl Fill for IdentityFill {
    fn name(&self) -> &str {
        "identity"
    }

    fn fill(&mut self, n: usize) -> Matrix {
        Matrix::identity(n)
    }
}

/// Element (i, j) is `i + j`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexSumFill;

impl Fill for IndexSumFill {
    fn name(&self) -> &str {
        "index-sum"
    }

    fn fill(&mut self, n: usize) -> Matrix {
        Matrix::from_fn(n, |i, j| (i + j) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_fill() {
        assert!(ZeroFill.fill(3).data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_identity_fill() {
        let m = IdentityFill.fill(3);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn test_index_sum_fill() {
        let m = IndexSumFill.fill(4);
        assert_eq!(m.row(0), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(m.row(3), &[3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_stateless_fills_repeat() {
        let mut fill = IndexSumFill;
        assert_eq!(fill.fill(2), fill.fill(2));
    }
}
