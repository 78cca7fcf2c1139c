//! Newton-Raphson and its variants.

use crate::differentiation::FiniteDifference;
use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, DERIVATIVE_FLOOR};

/// Step used to estimate derivatives in [`newton_raphson_numerical`].
const NUMERICAL_DERIVATIVE_STEP: f64 = 1e-8;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Quadratic convergence near a simple root. Stops when `|f(x)|` or the
/// step size drops below `config.tolerance`.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    damped_newton(f, df, initial_guess, 1.0, config)
}

/// Newton-Raphson with a central-difference derivative.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let fd = FiniteDifference::new(NUMERICAL_DERIVATIVE_STEP)?;
    let df = |x: f64| fd.central(&f, x);

    newton_raphson(&f, df, initial_guess, config)
}

/// Newton iteration with the derivative frozen at the starting point.
///
/// `x_{n+1} = x_n - f(x_n) / f'(x_0)`
///
/// Converges linearly, but only evaluates the derivative once.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] if `f'(x_0)` vanishes.
pub fn simplified_newton<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let slope = df(initial_guess);
    if slope.abs() < DERIVATIVE_FLOOR {
        return Err(MathError::DivisionByZero { value: slope });
    }

    newton_iterate(f, |_: f64| slope, initial_guess, 1.0, config)
}

/// Newton iteration with every step scaled by `damping`.
///
/// `x_{n+1} = x_n - damping * f(x_n) / f'(x_n)`
///
/// A damping of `1.0` is plain Newton-Raphson. Values below one trade
/// speed for a wider basin of attraction.
///
/// # Errors
///
/// Returns an error if `damping` is not finite and positive, if the
/// derivative vanishes, or if the iteration budget is exhausted.
pub fn damped_newton<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    damping: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !(damping.is_finite() && damping > 0.0) {
        return Err(MathError::invalid_input(format!(
            "Damping factor must be finite and positive, got {}",
            damping
        )));
    }

    newton_iterate(f, df, initial_guess, damping, config)
}

fn newton_iterate<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    damping: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.abs() < DERIVATIVE_FLOOR {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = damping * fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::Diverged {
                iterations: iteration + 1,
                magnitude: x.abs(),
            });
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
