//! Jacobi and Gauss-Seidel iteration.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{check_system, IterationConfig, PIVOT_FLOOR};

/// Components larger than this mean the iteration has blown up.
const DIVERGENCE_THRESHOLD: f64 = 1e50;

/// Outcome of a converged stationary iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationResult {
    /// Final iterate.
    pub solution: DVector<f64>,
    /// Number of sweeps performed.
    pub iterations: u32,
    /// Euclidean norm of the last update.
    pub change: f64,
}

/// Returns true if every row's diagonal entry strictly outweighs the sum of
/// the other entries' magnitudes in that row.
///
/// Strict row dominance is sufficient for both [`jacobi`] and
/// [`gauss_seidel`] to converge.
pub fn is_diagonally_dominant(a: &DMatrix<f64>) -> bool {
    a.row_iter().enumerate().all(|(i, row)| {
        let off_diagonal: f64 = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, v)| v.abs())
            .sum();
        row[i].abs() > off_diagonal
    })
}

/// Jacobi iteration from the zero vector.
///
/// Each sweep computes every component from the previous iterate only:
///
/// ```text
/// x_i' = (b_i - sum_{j != i} a_ij x_j) / a_ii
/// ```
///
/// A matrix that is not diagonally dominant is still attempted, with a
/// warning logged.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] if a diagonal entry vanishes
/// - [`MathError::Diverged`] once a component exceeds `1e50`
/// - [`MathError::ConvergenceFailure`] when the budget runs out
pub fn jacobi(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &IterationConfig,
) -> MathResult<IterationResult> {
    iterate(a, b, config, "Jacobi", |x, next| {
        let n = x.len();
        for i in 0..n {
            let off: f64 = (0..n).filter(|&j| j != i).map(|j| a[(i, j)] * x[j]).sum();
            next[i] = (b[i] - off) / a[(i, i)];
        }
    })
}

/// Gauss-Seidel iteration from the zero vector.
///
/// Like [`jacobi`], but components updated earlier in a sweep are used
/// immediately.
///
/// # Errors
///
/// Same as [`jacobi`].
pub fn gauss_seidel(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &IterationConfig,
) -> MathResult<IterationResult> {
    iterate(a, b, config, "Gauss-Seidel", |x, next| {
        let n = x.len();
        for i in 0..n {
            let updated: f64 = (0..i).map(|j| a[(i, j)] * next[j]).sum();
            let previous: f64 = (i + 1..n).map(|j| a[(i, j)] * x[j]).sum();
            next[i] = (b[i] - updated - previous) / a[(i, i)];
        }
    })
}

fn iterate<S>(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &IterationConfig,
    method: &str,
    sweep: S,
) -> MathResult<IterationResult>
where
    S: Fn(&DVector<f64>, &mut DVector<f64>),
{
    let n = check_system(a, b)?;

    if let Some(i) = (0..n).find(|&i| a[(i, i)].abs() < PIVOT_FLOOR) {
        return Err(MathError::DivisionByZero { value: a[(i, i)] });
    }
    if !is_diagonally_dominant(a) {
        log::warn!(
            "{} iteration on a matrix that is not diagonally dominant; convergence is not guaranteed",
            method
        );
    }

    let mut x = DVector::zeros(n);
    let mut next = DVector::zeros(n);
    let mut change = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        sweep(&x, &mut next);
        change = (&next - &x).norm();

        let magnitude = next.amax();
        if !(magnitude <= DIVERGENCE_THRESHOLD) {
            log::warn!("{} iteration diverged after {} sweeps", method, iteration + 1);
            return Err(MathError::Diverged {
                iterations: iteration + 1,
                magnitude,
            });
        }

        std::mem::swap(&mut x, &mut next);

        if change < config.tolerance {
            log::debug!("{} converged after {} sweeps", method, iteration + 1);
            return Ok(IterationResult {
                solution: x,
                iterations: iteration + 1,
                change,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, change))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dominant_system() -> (DMatrix<f64>, DVector<f64>) {
        (
            DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0]),
            DVector::from_vec(vec![15.0, 10.0, 10.0]),
        )
    }

    #[test]
    fn test_diagonal_dominance() {
        let (a, _) = dominant_system();
        assert!(is_diagonally_dominant(&a));

        // Row 0: |2| <= |1| + |3|
        let b = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 3.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0]);
        assert!(!is_diagonally_dominant(&b));

        // Equality is not strict dominance
        let c = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 0.0, 1.0]);
        assert!(!is_diagonally_dominant(&c));
    }

    #[test]
    fn test_jacobi_reference() {
        let (a, b) = dominant_system();

        let result = jacobi(&a, &b, &IterationConfig::default()).unwrap();

        assert_relative_eq!(result.solution[0], 3.375, epsilon = 1e-9);
        assert_relative_eq!(result.solution[1], 1.5, epsilon = 1e-9);
        assert_relative_eq!(result.solution[2], 2.125, epsilon = 1e-9);
        assert!(result.change < 1e-10);
    }

    #[test]
    fn test_gauss_seidel_needs_fewer_sweeps() {
        let (a, b) = dominant_system();
        let config = IterationConfig::default();

        let jac = jacobi(&a, &b, &config).unwrap();
        let gs = gauss_seidel(&a, &b, &config).unwrap();

        assert!(gs.iterations < jac.iterations);
        assert_relative_eq!((&a * &gs.solution - &b).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_jacobi_diverges() {
        // Spectral radius of the Jacobi matrix is well above one
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 5.0, 5.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);

        let result = jacobi(&a, &b, &IterationConfig::default());

        assert!(matches!(result, Err(MathError::Diverged { .. })));
    }

    #[test]
    fn test_budget_exhausted() {
        let (a, b) = dominant_system();

        let result = jacobi(&a, &b, &IterationConfig::new(1e-14, 3));

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailure { iterations: 3, .. })
        ));
    }

    #[test]
    fn test_zero_diagonal() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);

        assert!(matches!(
            gauss_seidel(&a, &b, &IterationConfig::default()),
            Err(MathError::DivisionByZero { .. })
        ));
    }
}
