//! Global Lagrange interpolation.

use crate::error::MathResult;
use crate::interpolation::{node_range, validate_nodes, Interpolator};

/// Interpolating polynomial in Lagrange form.
///
/// ```text
/// P(x) = sum_i y_i * prod_{j != i} (x - x_j) / (x_i - x_j)
/// ```
///
/// Nodes must be distinct but need not be sorted. Evaluation is `O(n^2)`.
#[derive(Debug, Clone)]
pub struct LagrangePolynomial {
    xs: Vec<f64>,
    ys: Vec<f64>,
    range: (f64, f64),
    allow_extrapolation: bool,
}

impl LagrangePolynomial {
    /// Creates the polynomial through `(xs[i], ys[i])`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if two nodes coincide.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_nodes(&xs, &ys, 2)?;
        let range = node_range(&xs);

        Ok(Self {
            xs,
            ys,
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

    /// Degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.xs.len() - 1
    }

    /// Basis polynomial `L_i(x)`.
    fn basis(&self, i: usize, x: f64) -> f64 {
        let xi = self.xs[i];
        self.xs
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &xj)| (x - xj) / (xi - xj))
            .product()
    }

    /// Derivative of the basis polynomial `L_i'(x)`, by the product rule.
    fn basis_derivative(&self, i: usize, x: f64) -> f64 {
        let xi = self.xs[i];
        let n = self.xs.len();

        (0..n)
            .filter(|&k| k != i)
            .map(|k| {
                let rest: f64 = (0..n)
                    .filter(|&j| j != i && j != k)
                    .map(|j| (x - self.xs[j]) / (xi - self.xs[j]))
                    .product();
                rest / (xi - self.xs[k])
            })
            .sum()
    }
}

impl Interpolator for LagrangePolynomial {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self
            .ys
            .iter()
            .enumerate()
            .map(|(i, y)| y * self.basis(i, x))
            .sum())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self
            .ys
            .iter()
            .enumerate()
            .map(|(i, y)| y * self.basis_derivative(i, x))
            .sum())
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
