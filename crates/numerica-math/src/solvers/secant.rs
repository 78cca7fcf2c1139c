//! Secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, DERIVATIVE_FLOOR};

/// Secant root-finding algorithm.
///
/// Replaces the derivative in Newton's step by the slope through the two
/// most recent iterates:
///
/// ```text
/// x_{n+1} = x_n - f(x_n) * (x_n - x_{n-1}) / (f(x_n) - f(x_{n-1}))
/// ```
///
/// No derivative and no bracket is needed. Convergence is superlinear
/// (order ~1.618) near a simple root.
///
/// # Errors
///
/// Returns an error if the starting points coincide, if the secant line
/// becomes horizontal, or if the iteration budget is exhausted.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{secant, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if x0 == x1 {
        return Err(MathError::invalid_input(format!(
            "Secant method needs two distinct starting points, got {} twice",
            x0
        )));
    }

    let (mut x_prev, mut x_curr) = (x0, x1);
    let (mut f_prev, mut f_curr) = (f(x_prev), f(x_curr));

    for iteration in 0..config.max_iterations {
        if f_curr.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        let denom = f_curr - f_prev;
        if denom.abs() < DERIVATIVE_FLOOR {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
        log::trace!("secant iteration {}: x = {}", iteration, x_next);

        if (x_next - x_curr).abs() < config.tolerance {
            return Ok(SolverResult {
                root: x_next,
                iterations: iteration + 1,
                residual: f(x_next),
            });
        }

        (x_prev, f_prev) = (x_curr, f_curr);
        x_curr = x_next;
        f_curr = f(x_curr);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
    ))
}
