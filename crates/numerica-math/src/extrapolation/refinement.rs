//! Iterative Richardson refinement.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for iterative refinement.
pub const DEFAULT_TOLERANCE: f64 = 1e-11;

/// Default iteration budget for iterative refinement.
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Configuration for [`improve_approximation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrapolationConfig {
    /// Stop once the improvement over the coarse value is below this.
    pub tolerance: f64,
    /// Maximum number of refinement steps.
    pub max_iterations: u32,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ExtrapolationConfig {
    /// Creates a new refinement configuration.
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

/// Combines a coarse and a fine approximation to cancel the leading error term.
///
/// `coarse = A(h)`, `fine = A(h/ratio)`, and the error is assumed to be
/// `O(h^order)`:
///
/// ```text
/// (ratio^order * fine - coarse) / (ratio^order - 1)
/// ```
pub fn richardson_combine(coarse: f64, fine: f64, ratio: f64, order: f64) -> MathResult<f64> {
    let factor = ratio.powf(order);
    let denom = factor - 1.0;
    if !factor.is_finite() || denom.abs() <= f64::EPSILON * factor.abs().max(1.0) {
        return Err(MathError::degenerate(
            factor,
            "refinement ratio raised to the order is one",
        ));
    }
    Ok((factor * fine - coarse) / denom)
}

/// Repeatedly refines `func(h)` towards its `h -> 0` limit.
///
/// Each iteration evaluates `A0 = func(h)` and `A1 = func(h / ratio)` and
/// forms `(ratio^order0 * A1 - A0) / (ratio^order0 - 1)`. The improved value
/// is returned once it differs from `A0` by less than `config.tolerance`;
/// otherwise the step is halved and the process repeats.
///
/// # Example
///
/// ```rust
/// use numerica_math::extrapolation::{improve_approximation, ExtrapolationConfig};
///
/// let approx = |h: f64| 3.0 * h * h + 2.0 * h + 1.0;
/// let limit = improve_approximation(approx, 1.0, 2.0, 2.0, &ExtrapolationConfig::default()).unwrap();
/// assert!((limit - 1.0).abs() < 1e-5);
/// ```
pub fn improve_approximation<F>(
    func: F,
    h: f64,
    ratio: f64,
    order0: f64,
    config: &ExtrapolationConfig,
) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    if !(h.is_finite() && h > 0.0) {
        return Err(MathError::invalid_input(format!(
            "Initial step must be finite and positive, got {}",
            h
        )));
    }
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(MathError::invalid_input(format!(
            "Refinement ratio must be finite and positive, got {}",
            ratio
        )));
    }
    if config.max_iterations == 0 {
        return Err(MathError::invalid_input(
            "Refinement needs at least one iteration",
        ));
    }

    let mut current_h = h;
    let mut difference = f64::NAN;

    for iteration in 0..config.max_iterations {
        let coarse = func(current_h);
        let fine = func(current_h / ratio);
        let improved = richardson_combine(coarse, fine, ratio, order0)?;

        difference = (improved - coarse).abs();
        log::trace!(
            "refinement iteration {}: h = {:.3e}, improved = {}, difference = {:.3e}",
            iteration,
            current_h,
            improved,
            difference
        );

        if difference < config.tolerance {
            log::debug!(
                "Richardson refinement converged after {} iterations",
                iteration + 1
            );
            return Ok(improved);
        }

        // Halves regardless of `ratio`. Unverified whether the step decay was
        // meant to follow the refinement ratio.
        current_h /= 2.0;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        difference,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quadratic(h: f64) -> f64 {
        3.0 * h * h + 2.0 * h + 1.0
    }

    #[test]
    fn test_quadratic_converges_to_limit() {
        let limit =
            improve_approximation(quadratic, 1.0, 2.0, 2.0, &ExtrapolationConfig::default())
                .unwrap();

        assert_relative_eq!(limit, quadratic(0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_pure_power_recovers_limit() {
        // Error is exactly c*h^2, so every combination is already exact
        let approx = |h: f64| 7.0 + 0.5 * h * h;
        let limit =
            improve_approximation(approx, 0.5, 2.0, 2.0, &ExtrapolationConfig::default()).unwrap();

        assert_relative_eq!(limit, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_budget_exhausted() {
        let config = ExtrapolationConfig::new(1e-11, 3);
        let result = improve_approximation(quadratic, 1.0, 2.0, 2.0, &config);

        match result {
            Err(MathError::ConvergenceFailure {
                iterations,
                residual,
            }) => {
                assert_eq!(iterations, 3);
                assert!(residual > 1e-11);
            }
            other => panic!("expected convergence failure, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = ExtrapolationConfig::new(1e-11, 0);
        let result = improve_approximation(quadratic, 1.0, 2.0, 2.0, &config);

        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    #[test]
    fn test_unit_ratio_is_degenerate() {
        let result =
            improve_approximation(quadratic, 1.0, 1.0, 2.0, &ExtrapolationConfig::default());
        assert!(matches!(
            result,
            Err(MathError::DegenerateExtrapolation { .. })
        ));
    }

    #[test]
    fn test_invalid_step() {
        let config = ExtrapolationConfig::default();
        assert!(improve_approximation(quadratic, 0.0, 2.0, 2.0, &config).is_err());
        assert!(improve_approximation(quadratic, 1.0, -2.0, 2.0, &config).is_err());
    }

    #[test]
    fn test_combine() {
        // Central difference of exp at 0 with h = 0.1 and 0.05
        let d = |h: f64| ((h).exp() - (-h).exp()) / (2.0 * h);
        let combined = richardson_combine(d(0.1), d(0.05), 2.0, 2.0).unwrap();

        assert!((combined - 1.0).abs() < (d(0.05) - 1.0).abs());
        assert_relative_eq!(combined, 1.0, epsilon = 1e-6);
    }
}
