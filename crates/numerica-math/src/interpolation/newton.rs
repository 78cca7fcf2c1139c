//! Newton divided-difference interpolation.

use crate::error::MathResult;
use crate::interpolation::{
    chebyshev_nodes, node_range, validate_nodes, Interpolator, LinearInterpolator,
};

/// Divided-difference table.
///
/// `table[k][i]` holds `f[x_i, ..., x_{i+k}]`, so row `k` has `n - k`
/// entries and the first entry of every row is a Newton coefficient.
///
/// # Errors
///
/// Returns an error if the lengths differ, the data is empty, or two nodes
/// coincide.
pub fn divided_differences(xs: &[f64], ys: &[f64]) -> MathResult<Vec<Vec<f64>>> {
    validate_nodes(xs, ys, 1)?;

    let n = xs.len();
    let mut table: Vec<Vec<f64>> = Vec::with_capacity(n);
    table.push(ys.to_vec());

    for k in 1..n {
        let prev = &table[k - 1];
        let row = (0..n - k)
            .map(|i| (prev[i + 1] - prev[i]) / (xs[i + k] - xs[i]))
            .collect();
        table.push(row);
    }

    Ok(table)
}

/// Interpolating polynomial in Newton form.
///
/// ```text
/// P(x) = c_0 + c_1 (x - x_0) + c_2 (x - x_0)(x - x_1) + ...
/// ```
///
/// Evaluated by nested multiplication.
///
/// # Example
///
/// ```rust
/// use numerica_math::interpolation::{Interpolator, NewtonPolynomial};
///
/// let poly = NewtonPolynomial::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 4.0, 1.0]).unwrap();
///
/// assert_eq!(poly.coefficients(), &[1.0, 1.0, 0.5, -1.0]);
/// assert!((poly.interpolate(1.5).unwrap() - 3.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonPolynomial {
    nodes: Vec<f64>,
    coefficients: Vec<f64>,
    range: (f64, f64),
    allow_extrapolation: bool,
}

impl NewtonPolynomial {
    /// Builds the Newton form through `(xs[i], ys[i])`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if two nodes coincide.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_nodes(&xs, &ys, 2)?;
        let range = node_range(&xs);
        Self::from_nodes(xs, &ys, range)
    }

    /// Resamples the data at Chebyshev nodes and interpolates those.
    ///
    /// The data is first read off a piecewise linear interpolant at
    /// `xs.len()` Chebyshev nodes over `[min(xs), max(xs)]`. The returned
    /// polynomial accepts the whole original range.
    ///
    /// # Errors
    ///
    /// Returns an error if `xs` is not strictly increasing or the data is
    /// otherwise unusable.
    pub fn on_chebyshev_nodes(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let n = xs.len();
        let linear = LinearInterpolator::new(xs, ys)?;
        let range = (linear.min_x(), linear.max_x());

        let nodes = chebyshev_nodes(n, range.0, range.1)?;
        let values = nodes
            .iter()
            .map(|&x| linear.interpolate(x))
            .collect::<MathResult<Vec<f64>>>()?;

        log::debug!("resampled {} points at Chebyshev nodes", n);
        Self::from_nodes(nodes, &values, range)
    }

    fn from_nodes(nodes: Vec<f64>, ys: &[f64], range: (f64, f64)) -> MathResult<Self> {
        let coefficients = divided_differences(&nodes, ys)?
            .into_iter()
            .map(|row| row[0])
            .collect();

        Ok(Self {
            nodes,
            coefficients,
            range,
            allow_extrapolation: false,
        })
    }

    /// Enables evaluation outside the node range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Newton coefficients `f[x_0], f[x_0, x_1], ...`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Interpolation nodes in construction order.
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Value and first derivative by nested multiplication.
    fn evaluate(&self, x: f64) -> (f64, f64) {
        let n = self.coefficients.len();
        let mut value = self.coefficients[n - 1];
        let mut slope = 0.0;

        for k in (0..n - 1).rev() {
            let dx = x - self.nodes[k];
            slope = slope * dx + value;
            value = value * dx + self.coefficients[k];
        }

        (value, slope)
    }
}

impl Interpolator for NewtonPolynomial {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self.evaluate(x).0)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self.evaluate(x).1)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.range.0
    }

    fn max_x(&self) -> f64 {
        self.range.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_divided_difference_table() {
        let table = divided_differences(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 4.0, 1.0]).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table[0], vec![1.0, 2.0, 4.0, 1.0]);
        assert_eq!(table[1], vec![1.0, 2.0, -3.0]);
        assert_eq!(table[2], vec![0.5, -2.5]);
        assert_eq!(table[3], vec![-1.0]);
    }

    #[test]
    fn test_evenly_spaced_nodes() {
        let poly =
            NewtonPolynomial::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 4.0, 1.0]).unwrap();

        assert_eq!(poly.coefficients(), &[1.0, 1.0, 0.5, -1.0]);
        assert_relative_eq!(poly.interpolate(1.5).unwrap(), 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_chebyshev_resampling() {
        let poly = NewtonPolynomial::on_chebyshev_nodes(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 2.0, 4.0, 1.0],
        )
        .unwrap();

        assert_relative_eq!(poly.nodes()[0], 2.885_819_298_766_93, epsilon = 1e-12);
        assert_relative_eq!(poly.coefficients()[0], 1.342_542_103_699_21, epsilon = 1e-10);
        assert_relative_eq!(poly.coefficients()[1], -3.0, epsilon = 1e-10);
        assert_relative_eq!(poly.interpolate(1.5).unwrap(), 3.188_205_849_780_704, epsilon = 1e-9);
        // Original range stays valid even though the nodes lie inside it
        assert!(poly.interpolate(0.0).is_ok());
        assert!(poly.interpolate(3.0).is_ok());
    }

    #[test]
    fn test_derivative_of_quadratic() {
        let f = |x: f64| x * x - 3.0 * x;
        let xs = vec![-1.0, 2.0, 4.0];
        let ys = xs.iter().map(|&x| f(x)).collect();

        let poly = NewtonPolynomial::new(xs, ys).unwrap();

        assert_relative_eq!(poly.derivative(0.5).unwrap(), -2.0, epsilon = 1e-12);
        assert_relative_eq!(poly.derivative(3.0).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_chebyshev_requires_sorted_data() {
        assert!(NewtonPolynomial::on_chebyshev_nodes(vec![2.0, 1.0, 3.0], vec![0.0; 3]).is_err());
    }
}
