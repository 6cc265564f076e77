//! Element-wise comparison of a computed matrix against a reference.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::matrix::Matrix;

/// Relative error threshold used by the reference driver.
pub const DEFAULT_RELATIVE_TOLERANCE: f32 = 1.0e-5;

/// `|computed - reference| / |reference|`.
///
/// A zero reference has no meaningful relative scale, so the absolute
/// difference is returned instead.
pub fn relative_error(computed: f32, reference: f32) -> f32 {
    let diff = (computed - reference).abs();
    if reference == 0.0 {
        diff
    } else {
        diff / reference.abs()
    }
}

/// First cell found outside tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub computed: f32,
    pub reference: f32,
    pub relative_error: f32,
}

/// Outcome of comparing every cell of two matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyReport {
    pub checked: usize,
    pub mismatches: usize,
    pub max_relative_error: f32,
    pub first_mismatch: Option<Mismatch>,
    pub tolerance: f32,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} cells within {:e} (max relative error {:e})",
            self.checked - self.mismatches,
            self.checked,
            self.tolerance,
            self.max_relative_error
        )?;
        if let Some(m) = &self.first_mismatch {
            write!(
                f,
                "; first mismatch at ({}, {}): {} vs {}",
                m.row, m.col, m.computed, m.reference
            )?;
        }
        Ok(())
    }
}

/// Compares `computed` against `reference` cell by cell.
///
/// Every cell is checked; a mismatch only flips the verdict. NaN in either
/// matrix always counts as a mismatch.
///
/// # Errors
/// Returns `DimensionMismatch` if the matrices differ in size.
pub fn verify(computed: &Matrix, reference: &Matrix, tolerance: f32) -> Result<VerifyReport> {
    reference.check_same_dim(computed)?;

    let n = reference.dim();
    let mut report = VerifyReport {
        checked: 0,
        mismatches: 0,
        max_relative_error: 0.0,
        first_mismatch: None,
        tolerance,
    };

    for (idx, (&got, &want)) in computed.data().iter().zip(reference.data()).enumerate() {
        report.checked += 1;
        let err = relative_error(got, want);
        // `!(err <= tol)` so NaN lands on the failing side.
        if !(err <= tolerance) {
            report.mismatches += 1;
            if report.first_mismatch.is_none() {
                report.first_mismatch = Some(Mismatch {
                    row: idx / n,
                    col: idx % n,
                    computed: got,
                    reference: want,
                    relative_error: err,
                });
            }
        }
        if err > report.max_relative_error || err.is_nan() {
            report.max_relative_error = err;
        }
    }

    debug!(
        checked = report.checked,
        mismatches = report.mismatches,
        max_relative_error = report.max_relative_error,
        "verification finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_error() {
        assert_relative_eq!(relative_error(1.01, 1.0), 0.01, max_relative = 1e-4);
        assert_relative_eq!(relative_error(-2.2, -2.0), 0.1, max_relative = 1e-4);
        assert_eq!(relative_error(3.0, 3.0), 0.0);
    }

    #[test]
    fn test_relative_error_zero_reference() {
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert_eq!(relative_error(0.5, 0.0), 0.5);
    }

    #[test]
    fn test_identical_matrices_pass() {
        let m = Matrix::from_fn(4, |r, c| (r * 4 + c) as f32 + 1.0);
        let report = verify(&m, &m, DEFAULT_RELATIVE_TOLERANCE).unwrap();
        assert!(report.passed());
        assert_eq!(report.checked, 16);
        assert_eq!(report.max_relative_error, 0.0);
        assert!(report.first_mismatch.is_none());
    }

    #[test]
    fn test_all_zero_passes() {
        let z = Matrix::zeros(3);
        assert!(verify(&z, &z, DEFAULT_RELATIVE_TOLERANCE).unwrap().passed());
    }

    #[test]
    fn test_small_rounding_tolerated() {
        let reference = Matrix::new(vec![100.0; 4], 2);
        let computed = Matrix::new(vec![100.0005; 4], 2);
        assert!(verify(&computed, &reference, DEFAULT_RELATIVE_TOLERANCE)
            .unwrap()
            .passed());
    }

    #[test]
    fn test_mismatch_recorded_without_stopping() {
        let reference = Matrix::new(vec![1.0, 2.0, 3.0, 4.0], 2);
        let computed = Matrix::new(vec![1.0, 2.5, 3.0, 5.0], 2);
        let report = verify(&computed, &reference, DEFAULT_RELATIVE_TOLERANCE).unwrap();
        assert!(!report.passed());
        assert_eq!(report.checked, 4);
        assert_eq!(report.mismatches, 2);
        let first = report.first_mismatch.unwrap();
        assert_eq!((first.row, first.col), (0, 1));
        assert_relative_eq!(first.relative_error, 0.25);
        assert_relative_eq!(report.max_relative_error, 0.25);
    }

    #[test]
    fn test_nan_fails() {
        let reference = Matrix::new(vec![1.0], 1);
        let computed = Matrix::new(vec![f32::NAN], 1);
        assert!(!verify(&computed, &reference, 1.0).unwrap().passed());
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(verify(&Matrix::zeros(2), &Matrix::zeros(3), 1e-5).is_err());
    }

    #[test]
    fn test_display() {
        let m = Matrix::identity(2);
        let report = verify(&m, &m, 1e-5).unwrap();
        assert!(report.to_string().starts_with("4/4 cells within"));
    }
}
