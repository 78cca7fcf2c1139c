//! Jacobi rotation method for symmetric matrices.

use std::f64::consts::FRAC_PI_4;

use nalgebra::{DMatrix, DVector};

use crate::eigen::{check_square, RotationConfig};
use crate::error::{MathError, MathResult};

/// Relative asymmetry tolerated by [`jacobi_rotation`].
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Outcome of [`jacobi_rotation`].
#[derive(Debug, Clone, PartialEq)]
pub struct RotationResult {
    /// Diagonal of the rotated matrix, in the original index order.
    pub eigenvalues: DVector<f64>,
    /// The matrix after the final rotation (diagonal up to `tolerance`).
    pub matrix: DMatrix<f64>,
    /// Product of all rotations; column `k` pairs with `eigenvalues[k]`.
    pub eigenvectors: DMatrix<f64>,
    /// Number of rotations applied.
    pub iterations: u32,
}

/// Diagonalises a symmetric matrix by plane rotations.
///
/// Each step finds the largest off-diagonal entry `a_pq` and applies the
/// rotation `A <- Jᵀ A J` that zeroes it, with angle
///
/// ```text
/// phi = atan(2 a_pq / (a_pp - a_qq)) / 2     (pi/4 when a_pp == a_qq)
/// ```
///
/// Stops once every off-diagonal magnitude is below `config.tolerance`.
///
/// # Errors
///
/// Returns an error if the matrix is not square and symmetric, or a
/// convergence failure when the rotation budget runs out.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use numerica_math::eigen::{jacobi_rotation, RotationConfig};
///
/// let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
/// let result = jacobi_rotation(&a, &RotationConfig::default()).unwrap();
///
/// let mut values: Vec<f64> = result.eigenvalues.iter().copied().collect();
/// values.sort_by(f64::total_cmp);
/// assert!((values[0] - 1.0).abs() < 1e-10);
/// assert!((values[1] - 3.0).abs() < 1e-10);
/// ```
pub fn jacobi_rotation(a: &DMatrix<f64>, config: &RotationConfig) -> MathResult<RotationResult> {
    let n = check_square(a)?;

    let scale = a.amax().max(1.0);
    if (a - a.transpose()).amax() > SYMMETRY_TOLERANCE * scale {
        return Err(MathError::invalid_input(
            "Jacobi rotation requires a symmetric matrix",
        ));
    }

    let mut matrix = a.clone();
    let mut eigenvectors = DMatrix::identity(n, n);

    let mut iterations = 0;
    loop {
        let (p, q, largest) = largest_off_diagonal(&matrix);

        if largest < config.tolerance {
            log::debug!("Jacobi rotation converged after {} rotations", iterations);
            return Ok(RotationResult {
                eigenvalues: matrix.diagonal(),
                matrix,
                eigenvectors,
                iterations,
            });
        }
        if iterations == config.max_iterations {
            return Err(MathError::convergence_failed(iterations, largest));
        }

        let (app, aqq, apq) = (matrix[(p, p)], matrix[(q, q)], matrix[(p, q)]);
        let phi = if app == aqq {
            FRAC_PI_4
        } else {
            0.5 * (2.0 * apq / (app - aqq)).atan()
        };

        let rotation = plane_rotation(n, p, q, phi);
        matrix = rotation.transpose() * &matrix * &rotation;
        eigenvectors *= &rotation;
        iterations += 1;
        log::trace!("rotation {}: zeroed ({}, {}) with phi = {}", iterations, p, q, phi);
    }
}

/// Row, column and magnitude of the largest entry above the diagonal.
fn largest_off_diagonal(m: &DMatrix<f64>) -> (usize, usize, f64) {
    let n = m.nrows();
    let mut best = (0, 0, 0.0);

    for i in 0..n {
        for j in i + 1..n {
            let magnitude = m[(i, j)].abs();
            if magnitude > best.2 {
                best = (i, j, magnitude);
            }
        }
    }

    best
}

fn plane_rotation(n: usize, p: usize, q: usize, phi: f64) -> DMatrix<f64> {
    let (sin, cos) = phi.sin_cos();
    let mut rotation = DMatrix::identity(n, n);
    rotation[(p, p)] = cos;
    rotation[(q, q)] = cos;
    rotation[(p, q)] = -sin;
    rotation[(q, p)] = sin;
    rotation
}
