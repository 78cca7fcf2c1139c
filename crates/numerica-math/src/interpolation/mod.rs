//! Interpolation through tabulated points.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: piecewise linear, sorted nodes
//! - [`LagrangePolynomial`]: global polynomial in Lagrange form
//! - [`NewtonPolynomial`]: global polynomial from divided differences,
//!   optionally resampled at [`chebyshev_nodes`]
//! - [`linear_between`], [`parabolic`], [`averaged_parabolic`]: local
//!   two- and three-point formulas
//!
//! Global polynomials through many equally spaced nodes oscillate near the
//! ends of the range (Runge's phenomenon). Resampling at Chebyshev nodes
//! spreads the error more evenly.
//!
//! # Example
//!
//! ```rust
//! use numerica_math::interpolation::{Interpolator, LagrangePolynomial, LinearInterpolator};
//!
//! let xs = vec![3.0, 4.0, 5.0, 6.0];
//! let ys = vec![1.0, 0.0, 4.0, 2.0];
//!
//! let global = LagrangePolynomial::new(xs.clone(), ys.clone()).unwrap();
//! let linear = LinearInterpolator::new(xs, ys).unwrap();
//!
//! assert!((global.interpolate(4.5).unwrap() - 2.0625).abs() < 1e-12);
//! assert!((linear.interpolate(4.5).unwrap() - 2.0).abs() < 1e-12);
//! ```

mod chebyshev;
mod lagrange;
mod linear;
mod newton;
mod parabolic;

pub use chebyshev::chebyshev_nodes;
pub use lagrange::LagrangePolynomial;
pub use linear::{linear_between, LinearInterpolator};
pub use newton::{divided_differences, NewtonPolynomial};
pub use parabolic::{averaged_parabolic, parabolic};

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
///
/// All interpolators share this interface so they can be swapped and
/// compared on the same data.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }

    /// Fails with [`MathError::ExtrapolationNotAllowed`] when `x` is out of
    /// range and extrapolation is off.
    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.allows_extrapolation() || self.in_range(x) {
            Ok(())
        } else {
            Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            })
        }
    }
}

/// Checks lengths, finiteness, and node distinctness.
pub(crate) fn validate_nodes(xs: &[f64], ys: &[f64], required: usize) -> MathResult<()> {
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < required {
        return Err(MathError::insufficient_data(required, xs.len()));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("data points must be finite"));
    }

    for (i, a) in xs.iter().enumerate() {
        if xs[i + 1..].contains(a) {
            return Err(MathError::invalid_input(format!(
                "duplicate interpolation node {}",
                a
            )));
        }
    }

    Ok(())
}

/// Smallest and largest node.
pub(crate) fn node_range(xs: &[f64]) -> (f64, f64) {
    xs.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
}
