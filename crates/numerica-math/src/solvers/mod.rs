//! Root-finding algorithms.
//!
//! This module provides numerical solvers for scalar equations `f(x) = 0`:
//!
//! - [`bisection`]: halves a sign-changing bracket
//! - [`find_roots`]: scans a range for sign changes and bisects each one
//! - [`newton_raphson`]: quadratic convergence with an analytical derivative
//! - [`simplified_newton`]: Newton with the derivative frozen at the start point
//! - [`damped_newton`]: Newton with a fixed step multiplier
//! - [`secant`]: derivative-free, two starting points
//! - [`chord`]: secant through a fixed bracket endpoint
//! - [`fixed_point`]: plain iteration `x = g(x)`, and [`heron_sqrt`] built on it
//!
//! # Choosing a Solver
//!
//! | Solver | Convergence | Requires |
//! |--------|-------------|----------|
//! | Newton-Raphson | Quadratic | Derivative |
//! | Simplified Newton | Linear | Derivative at start |
//! | Secant | Superlinear | Two guesses |
//! | Chord | Linear | Bracket |
//! | Bisection | Linear, guaranteed | Bracket |
//!
//! # Example
//!
//! ```rust
//! use numerica_math::solvers::{newton_raphson, SolverConfig};
//!
//! // x^3 - 6x^2 + 11x - 6 = (x - 1)(x - 2)(x - 3)
//! let f = |x: f64| x.powi(3) - 6.0 * x.powi(2) + 11.0 * x - 6.0;
//! let df = |x: f64| 3.0 * x.powi(2) - 12.0 * x + 11.0;
//!
//! let result = newton_raphson(f, df, 3.5, &SolverConfig::default()).unwrap();
//! assert!((result.root - 3.0).abs() < 1e-10);
//! ```

mod bisection;
mod chord;
mod fixed_point;
mod newton;
mod secant;

pub use bisection::{bisection, find_roots};
pub use chord::chord;
pub use fixed_point::{fixed_point, heron_sqrt};
pub use newton::{damped_newton, newton_raphson, newton_raphson_numerical, simplified_newton};
pub use secant::secant;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivatives smaller than this are treated as zero.
pub(crate) const DERIVATIVE_FLOOR: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Trait for root-finding solvers with optional derivative.
///
/// Gives every method the same call shape so callers can swap solvers
/// without changing how they pass the problem.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{Solver, NewtonSolver, SolverConfig};
///
/// let solver = NewtonSolver;
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = solver.solve(f, Some(df), 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of the given function.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `derivative` - Optional derivative function (used if available)
    /// * `initial_guess` - Starting point for the search
    /// * `bounds` - Optional bracketing interval (a, b)
    /// * `config` - Solver configuration
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Newton-Raphson solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl Solver for NewtonSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        _bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => newton_raphson(f, df, initial_guess, config),
            None => newton_raphson_numerical(f, initial_guess, config),
        }
    }

    fn name(&self) -> &'static str {
        "Newton-Raphson"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) = bounds.unwrap_or((initial_guess - 1.0, initial_guess + 1.0));
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Secant method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver;

impl Solver for SecantSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (x0, x1) = bounds.unwrap_or((initial_guess - 0.1, initial_guess + 0.1));
        secant(f, x0, x1, config)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}

/// Chord method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordSolver;

impl Solver for ChordSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) = bounds.unwrap_or((initial_guess - 1.0, initial_guess + 1.0));
        chord(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Chord"
    }
}
