//! Local quadratic interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::validate_nodes;

/// Quadratic through three points, in Newton form.
///
/// # Errors
///
/// Returns an error if two abscissae coincide.
pub fn parabolic(points: [(f64, f64); 3], x: f64) -> MathResult<f64> {
    let [(x0, y0), (x1, y1), (x2, y2)] = points;
    validate_nodes(&[x0, x1, x2], &[y0, y1, y2], 3)?;

    let b1 = (y1 - y0) / (x1 - x0);
    let b2 = ((y2 - y1) / (x2 - x1) - b1) / (x2 - x0);

    Ok(y0 + b1 * (x - x0) + b2 * (x - x0) * (x - x1))
}

/// Mean of the two parabolas through four consecutive points around `x`.
///
/// Picks the window of four sorted nodes that centres the segment
/// containing `x` (clamped at the ends of the data), then averages the
/// parabola through the first three with the one through the last three.
///
/// # Errors
///
/// Returns an error if fewer than four points are given, if `xs` is not
/// strictly increasing, or if `x` lies outside the data.
///
/// # Example
///
/// ```rust
/// use numerica_math::interpolation::averaged_parabolic;
///
/// let y = averaged_parabolic(&[3.0, 4.0, 5.0, 6.0], &[1.0, 0.0, 4.0, 2.0], 4.5).unwrap();
/// assert!((y - 2.0625).abs() < 1e-12);
/// ```
pub fn averaged_parabolic(xs: &[f64], ys: &[f64], x: f64) -> MathResult<f64> {
    validate_nodes(xs, ys, 4)?;
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }

    let n = xs.len();
    if x < xs[0] || x > xs[n - 1] {
        return Err(MathError::ExtrapolationNotAllowed {
            x,
            min: xs[0],
            max: xs[n - 1],
        });
    }

    let segment = xs.partition_point(|&node| node <= x).saturating_sub(1);
    let start = segment.saturating_sub(1).min(n - 4);
    let point = |i: usize| (xs[start + i], ys[start + i]);

    let left = parabolic([point(0), point(1), point(2)], x)?;
    let right = parabolic([point(1), point(2), point(3)], x)?;

    Ok(0.5 * (left + right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parabolas_of_reference_data() {
        assert_relative_eq!(
            parabolic([(3.0, 1.0), (4.0, 0.0), (5.0, 4.0)], 4.5).unwrap(),
            1.375,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            parabolic([(4.0, 0.0), (5.0, 4.0), (6.0, 2.0)], 4.5).unwrap(),
            2.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parabola_is_exact_for_quadratics() {
        let f = |x: f64| 0.5 * x * x - x + 2.0;
        let points = [(-1.0, f(-1.0)), (0.5, f(0.5)), (4.0, f(4.0))];

        assert_relative_eq!(parabolic(points, 2.2).unwrap(), f(2.2), epsilon = 1e-12);
    }

    #[test]
    fn test_parabola_rejects_repeated_nodes() {
        assert!(parabolic([(1.0, 0.0), (1.0, 1.0), (2.0, 0.0)], 1.5).is_err());
    }

    #[test]
    fn test_window_follows_x() {
        // Quadratic data: every window reproduces it exactly
        let xs: Vec<f64> = (0..8).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();

        for x in [0.2, 3.5, 6.9, 7.0] {
            assert_relative_eq!(averaged_parabolic(&xs, &ys, x).unwrap(), x * x, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_averaged_parabolic_errors() {
        let xs = [3.0, 4.0, 5.0, 6.0];
        let ys = [1.0, 0.0, 4.0, 2.0];

        assert!(averaged_parabolic(&xs[..3], &ys[..3], 4.5).is_err());
        assert!(averaged_parabolic(&xs, &ys, 6.5).is_err());
        assert!(averaged_parabolic(&[3.0, 5.0, 4.0, 6.0], &ys, 4.5).is_err());
    }
}
