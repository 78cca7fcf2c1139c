//! Gaussian elimination.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{check_system, PIVOT_FLOOR};

/// Solves `Ax = b` by Gaussian elimination without row exchanges.
///
/// Fails on the first vanishing pivot even when the system is solvable
/// after reordering; use [`gaussian_elimination_partial_pivot`] for such
/// systems.
///
/// # Example
///
/// ```rust
/// use nalgebra::{DMatrix, DVector};
/// use numerica_math::linear_algebra::gaussian_elimination;
///
/// let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 3.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0]);
/// let b = DVector::from_vec(vec![1.0, 12.0, 0.0]);
///
/// let x = gaussian_elimination(&a, &b).unwrap();
/// assert!((x[0] - 8.0).abs() < 1e-10);
/// assert!((x[1] - 6.0).abs() < 1e-10);
/// assert!((x[2] + 7.0).abs() < 1e-10);
/// ```
pub fn gaussian_elimination(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    solve(a, b, false)
}

/// Solves `Ax = b` by Gaussian elimination with partial pivoting.
///
/// At every column the row with the largest magnitude entry is swapped
/// into the pivot position.
pub fn gaussian_elimination_partial_pivot(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> MathResult<DVector<f64>> {
    solve(a, b, true)
}

fn solve(a: &DMatrix<f64>, b: &DVector<f64>, pivoting: bool) -> MathResult<DVector<f64>> {
    let n = check_system(a, b)?;

    let mut u = a.clone();
    let mut y = b.clone();
    eliminate(&mut u, &mut y, pivoting)?;

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let tail: f64 = (i + 1..n).map(|j| u[(i, j)] * x[j]).sum();
        x[i] = (y[i] - tail) / u[(i, i)];
    }

    Ok(x)
}

/// Reduces `m` to upper-triangular form in place, applying the same row
/// operations to `rhs`.
fn eliminate(
    m: &mut DMatrix<f64>,
    rhs: &mut DVector<f64>,
    pivoting: bool,
) -> MathResult<()> {
    let n = m.nrows();

    for k in 0..n {
        if pivoting {
            let pivot_row = (k..n)
                .max_by(|&r, &s| m[(r, k)].abs().total_cmp(&m[(s, k)].abs()))
                .unwrap_or(k);
            if pivot_row != k {
                m.swap_rows(k, pivot_row);
                rhs.swap_rows(k, pivot_row);
            }
        }

        let pivot = m[(k, k)];
        if pivot.abs() < PIVOT_FLOOR {
            return Err(MathError::SingularMatrix);
        }

        for i in k + 1..n {
            let factor = m[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in k..n {
                m[(i, j)] -= factor * m[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    Ok(())
}
