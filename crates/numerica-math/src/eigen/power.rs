//! Power iteration for the dominant eigenpair.

use nalgebra::{DMatrix, DVector};

use crate::eigen::{check_square, EigenPair, PowerIterationConfig};
use crate::error::{MathError, MathResult};

/// Dominant eigenpair by power iteration.
///
/// Starts from the unit vector `(1, ..., 1) / sqrt(n)` and repeatedly
/// normalises `A b`. Stops when successive vectors differ by less than
/// `config.tolerance`; the eigenvalue is the Rayleigh quotient `bᵀ A b`.
///
/// A dominant eigenvalue that is negative flips the vector's sign every
/// step, so it never meets the stopping test; with
/// `allow_unconverged` the estimate is still returned.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] if `A b` vanishes
/// - [`MathError::ConvergenceFailure`] on exhaustion, unless
///   `config.allow_unconverged` is set
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use numerica_math::eigen::{power_iteration, PowerIterationConfig};
///
/// let a = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 3.0]);
/// let pair = power_iteration(&a, &PowerIterationConfig::default()).unwrap();
///
/// assert!((pair.value - (7.0 + 17f64.sqrt()) / 2.0).abs() < 1e-6);
/// ```
pub fn power_iteration(a: &DMatrix<f64>, config: &PowerIterationConfig) -> MathResult<EigenPair> {
    let n = check_square(a)?;

    let mut b = DVector::from_element(n, 1.0 / (n as f64).sqrt());
    let mut change = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        let w = a * &b;
        let norm = w.norm();
        if norm == 0.0 {
            return Err(MathError::DivisionByZero { value: norm });
        }

        let next = w / norm;
        change = (&next - &b).norm();
        b = next;

        if change < config.tolerance {
            log::debug!("power iteration converged after {} steps", iteration + 1);
            return Ok(rayleigh(a, b));
        }
    }

    if config.allow_unconverged {
        log::warn!(
            "power iteration stopped after {} steps without converging (last change {:.3e})",
            config.max_iterations,
            change
        );
        Ok(rayleigh(a, b))
    } else {
        Err(MathError::convergence_failed(config.max_iterations, change))
    }
}

fn rayleigh(a: &DMatrix<f64>, vector: DVector<f64>) -> EigenPair {
    let value = vector.dot(&(a * &vector));
    EigenPair { value, vector }
}
