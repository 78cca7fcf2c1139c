//! Chord (false position with a fixed endpoint) root finding.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, DERIVATIVE_FLOOR};

/// Chord method on a sign-changing bracket.
///
/// The endpoint where `f` is positive stays fixed; the other end moves to
/// where the chord through the fixed point and the current iterate crosses
/// zero:
///
/// ```text
/// x_{n+1} = x_n - f(x_n) * (c - x_n) / (f(c) - f(x_n))
/// ```
///
/// Converges linearly. Stops when `|f(x)|` or the step drops below
/// `config.tolerance`.
///
/// # Errors
///
/// Returns [`MathError::InvalidBracket`] if `f(a)` and `f(b)` share a sign,
/// or a convergence failure when the budget runs out.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{chord, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = chord(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn chord<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);

    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    if fa.abs() < config.tolerance {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fb.abs() < config.tolerance {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }

    let (fixed, f_fixed, mut x) = if fa > 0.0 { (a, fa, b) } else { (b, fb, a) };
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        let denom = f_fixed - fx;
        if denom.abs() < DERIVATIVE_FLOOR {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x - fx * (fixed - x) / denom;
        let step = (x_next - x).abs();
        x = x_next;
        fx = f(x);

        if fx.abs() < config.tolerance || step < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = chord(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_endpoint_on_either_side() {
        // Decreasing function: the positive end is the left one
        let f = |x: f64| 2.0 - x * x;

        let result = chord(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_endpoint_root() {
        // (x - 1)(x - 2)(x - 3) vanishes at both ends of [2, 3]
        let f = |x: f64| x.powi(3) - 6.0 * x.powi(2) + 11.0 * x - 6.0;

        let result = chord(f, 2.0, 3.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.root, 2.0);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;

        let result = chord(f, -1.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }
}
