//! Eigenvalue methods for small dense matrices.
//!
//! - [`power_iteration`]: dominant eigenpair of any square matrix
//! - [`jacobi_rotation`]: all eigenvalues of a symmetric matrix
//! - [`eigenvectors_for`]: eigenvectors for known eigenvalues, by
//!   eliminating `A - λI`
//! - [`symmetric_eigen`]: rotation followed by vector recovery

mod characteristic;
mod power;
mod rotation;

pub use characteristic::{eigenvectors_for, symmetric_eigen};
pub use power::power_iteration;
pub use rotation::{jacobi_rotation, RotationResult};

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// An eigenvalue with a unit eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair {
    /// Eigenvalue.
    pub value: f64,
    /// Eigenvector, normalised to unit Euclidean length.
    pub vector: DVector<f64>,
}

impl EigenPair {
    /// Euclidean norm of `A v - λ v`.
    pub fn residual(&self, a: &DMatrix<f64>) -> f64 {
        (a * &self.vector - &self.vector * self.value).norm()
    }
}

/// Configuration for [`power_iteration`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerIterationConfig {
    /// Stop once successive unit vectors differ by less than this.
    pub tolerance: f64,
    /// Maximum number of matrix-vector products.
    pub max_iterations: u32,
    /// Return the last estimate instead of failing when the budget runs out.
    pub allow_unconverged: bool,
}

impl Default for PowerIterationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            allow_unconverged: true,
        }
    }
}

impl PowerIterationConfig {
    /// Creates a configuration that fails when the budget runs out.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            allow_unconverged: false,
        }
    }

    /// Sets whether an unconverged estimate may be returned.
    #[must_use]
    pub fn with_allow_unconverged(mut self, allow: bool) -> Self {
        self.allow_unconverged = allow;
        self
    }
}

/// Configuration for [`jacobi_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Stop once the largest off-diagonal magnitude is below this.
    pub tolerance: f64,
    /// Maximum number of rotations.
    pub max_iterations: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 1000,
        }
    }
}

impl RotationConfig {
    /// Creates a new rotation configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

fn check_square(a: &DMatrix<f64>) -> MathResult<usize> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MathError::invalid_input(format!(
            "Matrix must be square, got {}x{}",
            n,
            a.ncols()
        )));
    }
    if n == 0 {
        return Err(MathError::invalid_input("Matrix is empty"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_power_and_rotation_agree_on_dominant_value() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, -2.0, 2.0, -2.0, 2.0, -2.0, 2.0, -2.0, 3.0]);

        let dominant = power_iteration(&a, &PowerIterationConfig::new(1e-10, 1000)).unwrap();
        let rotated = jacobi_rotation(&a, &RotationConfig::default()).unwrap();

        assert_relative_eq!(dominant.value, rotated.eigenvalues.max(), epsilon = 1e-8);
    }

    #[test]
    fn test_residual() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 1.0]);
        let exact = EigenPair {
            value: 2.0,
            vector: DVector::from_vec(vec![1.0, 0.0]),
        };
        let wrong = EigenPair {
            value: 1.0,
            vector: DVector::from_vec(vec![1.0, 0.0]),
        };

        assert_relative_eq!(exact.residual(&a), 0.0);
        assert_relative_eq!(wrong.residual(&a), 1.0);
    }

    #[test]
    fn test_config_defaults() {
        let power = PowerIterationConfig::default();
        assert_relative_eq!(power.tolerance, 1e-6);
        assert_eq!(power.max_iterations, 100);
        assert!(power.allow_unconverged);

        let rotation = RotationConfig::default();
        assert_relative_eq!(rotation.tolerance, 1e-10);
        assert_eq!(rotation.max_iterations, 1000);
    }

    #[test]
    fn test_non_square_rejected() {
        assert!(check_square(&DMatrix::zeros(2, 3)).is_err());
        assert!(check_square(&DMatrix::zeros(0, 0)).is_err());
    }
}
