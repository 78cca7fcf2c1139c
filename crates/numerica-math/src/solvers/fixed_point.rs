//! Fixed-point iteration.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Iterates `x_{n+1} = g(x_n)` until successive iterates agree.
///
/// Converges when `g` is a contraction near the fixed point. The
/// `residual` of the result is the final change `|x_{n+1} - x_n|`.
///
/// # Errors
///
/// Returns [`MathError::Diverged`] if an iterate stops being finite, or a
/// convergence failure when the budget runs out.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{fixed_point, SolverConfig};
///
/// let result = fixed_point(f64::cos, 1.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - result.root.cos()).abs() < 1e-9);
/// ```
pub fn fixed_point<G>(g: G, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    G: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut change = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        let next = g(x);
        if !next.is_finite() {
            return Err(MathError::Diverged {
                iterations: iteration + 1,
                magnitude: next.abs(),
            });
        }

        change = (next - x).abs();
        x = next;

        if change < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: change,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, change))
}

/// Square root by Heron's iteration `x = (x + a / x) / 2`.
///
/// # Errors
///
/// Returns an error for negative or non-finite `a`.
pub fn heron_sqrt(a: f64, config: &SolverConfig) -> MathResult<f64> {
    if !(a.is_finite() && a >= 0.0) {
        return Err(MathError::invalid_input(format!(
            "Cannot take the square root of {}",
            a
        )));
    }
    if a == 0.0 {
        return Ok(0.0);
    }

    let start = a.max(1.0);
    fixed_point(|x| 0.5 * (x + a / x), start, config).map(|result| result.root)
}
