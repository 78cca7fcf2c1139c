//! Eigenvectors from known eigenvalues.

use nalgebra::{DMatrix, DVector};

use crate::eigen::{check_square, jacobi_rotation, EigenPair, RotationConfig};
use crate::error::{MathError, MathResult};

/// Pivots below this fraction of the largest entry count as zero.
const RELATIVE_PIVOT_FLOOR: f64 = 1e-8;

/// Recovers a unit eigenvector for each eigenvalue.
///
/// For every `λ` the singular system `(A - λI) v = 0` is reduced to row
/// echelon form with partial pivoting. Columns without a usable pivot are
/// free variables and set to one; the pivot variables follow by back
/// substitution. If rounding leaves no free column, the column with the
/// smallest pivot is freed instead.
///
/// A repeated eigenvalue yields a single vector from its eigenspace.
///
/// # Errors
///
/// Returns an error if `a` is not square or an eigenvalue is not finite.
pub fn eigenvectors_for(a: &DMatrix<f64>, eigenvalues: &[f64]) -> MathResult<Vec<EigenPair>> {
    let n = check_square(a)?;

    eigenvalues
        .iter()
        .map(|&value| {
            if !value.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "eigenvalue {} is not finite",
                    value
                )));
            }
            let shifted = a - DMatrix::identity(n, n) * value;
            Ok(EigenPair {
                value,
                vector: null_vector(shifted),
            })
        })
        .collect()
}

/// All eigenpairs of a symmetric matrix, largest eigenvalue first.
///
/// Eigenvalues come from [`jacobi_rotation`]; vectors from
/// [`eigenvectors_for`].
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use numerica_math::eigen::{symmetric_eigen, RotationConfig};
///
/// let a = DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
/// let pairs = symmetric_eigen(&a, &RotationConfig::default()).unwrap();
///
/// assert!((pairs[0].value - (2.0 + 2f64.sqrt())).abs() < 1e-9);
/// assert!(pairs.iter().all(|pair| pair.residual(&a) < 1e-6));
/// ```
pub fn symmetric_eigen(a: &DMatrix<f64>, config: &RotationConfig) -> MathResult<Vec<EigenPair>> {
    let rotated = jacobi_rotation(a, config)?;

    let mut values: Vec<f64> = rotated.eigenvalues.iter().copied().collect();
    values.sort_by(|x, y| y.total_cmp(x));

    eigenvectors_for(a, &values)
}

/// A unit vector in the (numerical) null space of `m`.
fn null_vector(mut m: DMatrix<f64>) -> DVector<f64> {
    let n = m.nrows();
    let floor = RELATIVE_PIVOT_FLOOR * m.amax().max(f64::MIN_POSITIVE);

    // (row, column) of each pivot, in elimination order
    let mut pivots: Vec<(usize, usize)> = Vec::with_capacity(n);
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        let best = (row..n)
            .max_by(|&r, &s| m[(r, col)].abs().total_cmp(&m[(s, col)].abs()))
            .unwrap_or(row);
        if m[(best, col)].abs() <= floor {
            continue;
        }
        m.swap_rows(row, best);

        for r in row + 1..n {
            let factor = m[(r, col)] / m[(row, col)];
            for c in col..n {
                m[(r, c)] -= factor * m[(row, c)];
            }
        }

        pivots.push((row, col));
        row += 1;
    }

    if pivots.len() == n {
        let weakest = (0..n)
            .min_by(|&i, &j| {
                let (ri, ci) = pivots[i];
                let (rj, cj) = pivots[j];
                m[(ri, ci)].abs().total_cmp(&m[(rj, cj)].abs())
            })
            .unwrap_or(n - 1);
        pivots.remove(weakest);
    }

    let mut v = DVector::from_element(n, 1.0);
    for &(r, c) in pivots.iter().rev() {
        let tail: f64 = (c + 1..n).map(|j| m[(r, j)] * v[j]).sum();
        v[c] = -tail / m[(r, c)];
    }

    v.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::SQRT_2;

    fn tridiagonal() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0])
    }

    /// Equal up to sign.
    fn assert_parallel(v: &DVector<f64>, expected: &[f64]) {
        let e = DVector::from_column_slice(expected).normalize();
        assert_relative_eq!(v.dot(&e).abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_eigenvalues() {
        let a = tridiagonal();
        let values = [2.0 - SQRT_2, 2.0, 2.0 + SQRT_2];

        let pairs = eigenvectors_for(&a, &values).unwrap();

        assert_parallel(&pairs[0].vector, &[1.0, SQRT_2, 1.0]);
        assert_parallel(&pairs[1].vector, &[1.0, 0.0, -1.0]);
        assert_parallel(&pairs[2].vector, &[1.0, -SQRT_2, 1.0]);
        for pair in &pairs {
            assert_relative_eq!(pair.vector.norm(), 1.0, epsilon = 1e-12);
            assert!(pair.residual(&a) < 1e-9);
        }
    }

    #[test]
    fn test_symmetric_eigen_sorted() {
        let a = tridiagonal();

        let pairs = symmetric_eigen(&a, &RotationConfig::default()).unwrap();

        assert_eq!(pairs.len(), 3);
        assert_relative_eq!(pairs[0].value, 2.0 + SQRT_2, epsilon = 1e-9);
        assert_relative_eq!(pairs[1].value, 2.0, epsilon = 1e-9);
        assert_relative_eq!(pairs[2].value, 2.0 - SQRT_2, epsilon = 1e-9);
        for pair in &pairs {
            assert!(pair.residual(&a) < 1e-6);
        }
    }

    #[test]
    fn test_repeated_eigenvalue() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![3.0, 3.0, 1.0]));

        let pairs = eigenvectors_for(&a, &[3.0]).unwrap();

        assert_relative_eq!(pairs[0].vector[2], 0.0, epsilon = 1e-12);
        assert!(pairs[0].residual(&a) < 1e-12);
    }

    #[test]
    fn test_non_finite_eigenvalue() {
        assert!(eigenvectors_for(&tridiagonal(), &[f64::NAN]).is_err());
    }
}
