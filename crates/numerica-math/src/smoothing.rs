//! Least-squares polynomial smoothing.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::linear_algebra::gaussian_elimination_partial_pivot;

/// Polynomial `c_0 + c_1 x + ... + c_m x^m` fitted by least squares.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Coefficients in ascending powers of `x`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree of the fitted polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluates the polynomial by Horner's rule.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Fits a polynomial of the given degree to `(xs[i], ys[i])` by least squares.
///
/// Builds and solves the normal equations
///
/// ```text
/// sum_j (sum_k x_k^(i+j)) c_j = sum_k y_k x_k^i,   i = 0..=degree
/// ```
///
/// # Errors
///
/// Returns an error if the lengths differ, if there are fewer than
/// `degree + 1` points, or if the normal matrix is singular (too few
/// distinct abscissae).
///
/// # Example
///
/// ```rust
/// use numerica_math::smoothing::least_squares;
///
/// let fit = least_squares(&[0.0, 1.0, 2.0, 3.0], &[2.0, 3.0, 5.0, 4.0], 1).unwrap();
/// assert!((fit.evaluate(1.5) - 3.5).abs() < 1e-12);
/// ```
pub fn least_squares(xs: &[f64], ys: &[f64], degree: usize) -> MathResult<PolynomialFit> {
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    let size = degree + 1;
    if xs.len() < size {
        return Err(MathError::insufficient_data(size, xs.len()));
    }

    // Power sums sum x^p for p = 0..=2*degree
    let power_sums: Vec<f64> = (0..2 * size - 1)
        .map(|p| xs.iter().map(|x| x.powi(p as i32)).sum())
        .collect();

    let normal = DMatrix::from_fn(size, size, |i, j| power_sums[i + j]);
    let rhs = DVector::from_fn(size, |i, _| {
        xs.iter()
            .zip(ys)
            .map(|(x, y)| y * x.powi(i as i32))
            .sum::<f64>()
    });

    let coefficients = gaussian_elimination_partial_pivot(&normal, &rhs)?;
    log::trace!("least-squares fit of degree {}: {:?}", degree, coefficients);

    Ok(PolynomialFit {
        coefficients: coefficients.iter().copied().collect(),
    })
}

/// Value at `x` of the degree-`degree` least-squares polynomial.
///
/// # Errors
///
/// Same as [`least_squares`].
pub fn smooth(xs: &[f64], ys: &[f64], degree: usize, x: f64) -> MathResult<f64> {
    least_squares(xs, ys, degree).map(|fit| fit.evaluate(x))
}
