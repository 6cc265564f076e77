use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tm_tensor::Matrix;

use crate::fill::Fill;

/// Seed used by the reference driver.
pub const DEFAULT_SEED: u64 = 42;

/// Uniform [0, 1) floats from a seeded `StdRng`.
///
/// The generator persists across [`Fill::fill`] calls, so successive matrices
/// are consecutive draws from one stream. Output is deterministic for a given
/// seed and `rand` version.
pub struct UniformFill {
    rng: StdRng,
    dist: Uniform<f32>,
}

impl UniformFill {
    /// Create a uniform fill seeded for reproducibility.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            dist: Uniform::new(0.0f32, 1.0f32),
        }
    }
}

impl Default for UniformFill {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Fill for UniformFill {
    fn name(&self) -> &str {
        "uniform"
    }

    fn fill(&mut self, n: usize) -> Matrix {
        let data: Vec<f32> = (0..n * n).map(|_| self.dist.sample(&mut self.rng)).collect();
        Matrix::new(data, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_in_unit_interval() {
        let m = UniformFill::new(7).fill(32);
        assert!(m.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = UniformFill::new(42).fill(16);
        let b = UniformFill::new(42).fill(16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = UniformFill::new(1).fill(16);
        let b = UniformFill::new(2).fill(16);
        assert_ne!(a, b);
    }

    #[test]
    fn test_stream_continues_across_calls() {
        let mut fill = UniformFill::default();
        let first = fill.fill(4);
        let second = fill.fill(4);
        assert_ne!(first, second);

        // The two draws are one contiguous stream of 32 values.
        let whole = UniformFill::default().fill(8);
        let mut stream = first.into_vec();
        stream.extend(second.into_vec());
        assert_eq!(&whole.data()[..32], &stream[..]);
    }

    #[test]
    fn test_mean_near_half() {
        let m = UniformFill::new(3).fill(64);
        let mean = m.data().iter().sum::<f32>() / m.len() as f32;
        assert!((mean - 0.5).abs() < 0.05, "mean {}", mean);
    }
}
