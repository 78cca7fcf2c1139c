//! Piecewise linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{validate_nodes, Interpolator};

/// Straight line through `(x0, y0)` and `(x1, y1)`, evaluated at `x`.
///
/// # Errors
///
/// Returns an error if the two abscissae coincide.
pub fn linear_between(p0: (f64, f64), p1: (f64, f64), x: f64) -> MathResult<f64> {
    let ((x0, y0), (x1, y1)) = (p0, p1);
    if x0 == x1 {
        return Err(MathError::invalid_input(format!(
            "linear interpolation needs distinct abscissae, got {} twice",
            x0
        )));
    }
    Ok(((x - x1) * y0 + (x0 - x) * y1) / (x0 - x1))
}

/// Linear interpolation between consecutive data points.
///
/// # Example
///
/// ```rust
/// use numerica_math::interpolation::{LinearInterpolator, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_nodes(&xs, &ys, 2)?;

        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Index `i` of the segment `[xs[i], xs[i + 1]]` used for `x`.
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        self.xs.partition_point(|&node| node <= x).saturating_sub(1).min(last)
    }

    fn segment(&self, x: f64) -> ((f64, f64), (f64, f64)) {
        let i = self.find_segment(x);
        ((self.xs[i], self.ys[i]), (self.xs[i + 1], self.ys[i + 1]))
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (p0, p1) = self.segment(x);
        linear_between(p0, p1, x)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let ((x0, y0), (x1, y1)) = self.segment(x);
        Ok((y1 - y0) / (x1 - x0))
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_interpolation() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![0.0, 2.0, 4.0];

        let interp = LinearInterpolator::new(xs, ys).unwrap();

        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kinked_data() {
        let interp = LinearInterpolator::new(vec![3.0, 4.0, 5.0, 6.0], vec![1.0, 0.0, 4.0, 2.0])
            .unwrap();

        assert_relative_eq!(interp.interpolate(3.5).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(4.5).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(interp.derivative(4.5).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(interp.derivative(5.5).unwrap(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolation_disabled() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();

        assert!(interp.interpolate(-0.5).is_err());
        assert!(interp.derivative(2.5).is_err());
    }

    #[test]
    fn test_extrapolation_enabled() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 3.0])
            .unwrap()
            .with_extrapolation();

        assert_relative_eq!(interp.interpolate(-1.0).unwrap(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_error() {
        assert!(LinearInterpolator::new(vec![1.0, 0.0, 2.0], vec![1.0, 0.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![0.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_linear_between() {
        assert_relative_eq!(
            linear_between((4.0, 0.0), (5.0, 4.0), 4.5).unwrap(),
            2.0,
            epsilon = 1e-12
        );
        // Order of the two points does not matter
        assert_relative_eq!(
            linear_between((5.0, 4.0), (4.0, 0.0), 4.25).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        assert!(linear_between((1.0, 0.0), (1.0, 2.0), 1.0).is_err());
    }
}
