//! Dense linear systems.
//!
//! Direct solvers ([`gaussian_elimination`],
//! [`gaussian_elimination_partial_pivot`]) and stationary iterations
//! ([`jacobi`], [`gauss_seidel`]) on `nalgebra` matrices.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::{DMatrix, DVector};
//! use numerica_math::linear_algebra::{gauss_seidel, gaussian_elimination, IterationConfig};
//!
//! let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0]);
//! let b = DVector::from_vec(vec![15.0, 10.0, 10.0]);
//!
//! let direct = gaussian_elimination(&a, &b).unwrap();
//! let iterative = gauss_seidel(&a, &b, &IterationConfig::default()).unwrap();
//!
//! assert!((direct - iterative.solution).norm() < 1e-9);
//! ```

mod gauss;
mod iterative;

pub use gauss::{gaussian_elimination, gaussian_elimination_partial_pivot};
pub use iterative::{gauss_seidel, is_diagonally_dominant, jacobi, IterationResult};

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Pivots smaller than this are treated as zero.
pub(crate) const PIVOT_FLOOR: f64 = 1e-15;

/// Default tolerance for iterative solvers.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum sweeps for iterative solvers.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Configuration for [`jacobi`] and [`gauss_seidel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationConfig {
    /// Stop once successive iterates differ by less than this (Euclidean norm).
    pub tolerance: f64,
    /// Maximum number of sweeps.
    pub max_iterations: u32,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterationConfig {
    /// Creates a new iteration configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

/// Checks that `a` is square and matches `b`, returning the dimension.
pub(crate) fn check_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<usize> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MathError::invalid_input(format!(
            "Matrix must be square, got {}x{}",
            n,
            a.ncols()
        )));
    }
    if n == 0 {
        return Err(MathError::invalid_input("System is empty"));
    }
    if b.len() != n {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }
    Ok(n)
}
