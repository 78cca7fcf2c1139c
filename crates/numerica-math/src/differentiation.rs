//! Finite-difference derivative approximations.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::extrapolation::richardson_combine;

/// Default finite-difference step.
pub const DEFAULT_STEP: f64 = 1e-5;

/// Finite-difference differentiator with a fixed step size.
///
/// # Example
///
/// ```rust
/// use numerica_math::differentiation::FiniteDifference;
///
/// let fd = FiniteDifference::new(1e-4).unwrap();
/// let x = std::f64::consts::FRAC_PI_4;
///
/// let d = fd.five_point_stencil(f64::sin, x);
/// assert!((d - x.cos()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiniteDifference {
    step: f64,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

impl FiniteDifference {
    /// Creates a differentiator with step `h`.
    ///
    /// # Errors
    ///
    /// Returns an error if `h` is not finite and positive.
    pub fn new(h: f64) -> MathResult<Self> {
        if !(h.is_finite() && h > 0.0) {
            return Err(MathError::invalid_input(format!(
                "Finite-difference step must be finite and positive, got {}",
                h
            )));
        }
        Ok(Self { step: h })
    }

    /// Returns the step size.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// `(f(x + h) - f(x)) / h`, first order.
    pub fn forward<F>(&self, f: F, x: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let h = self.step;
        (f(x + h) - f(x)) / h
    }

    /// `(f(x) - f(x - h)) / h`, first order.
    pub fn backward<F>(&self, f: F, x: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let h = self.step;
        (f(x) - f(x - h)) / h
    }

    /// `(f(x + h) - f(x - h)) / 2h`, second order.
    pub fn central<F>(&self, f: F, x: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        central_difference(&f, x, self.step)
    }

    /// Five-point stencil, fourth order.
    pub fn five_point_stencil<F>(&self, f: F, x: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let h = self.step;
        (-f(x + 2.0 * h) + 8.0 * f(x + h) - 8.0 * f(x - h) + f(x - 2.0 * h)) / (12.0 * h)
    }

    /// Central difference improved by one Richardson step.
    ///
    /// Combines the central differences at `h` and `h/2` (error `O(h^2)`),
    /// giving a fourth-order estimate.
    pub fn richardson<F>(&self, f: F, x: f64) -> MathResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        let coarse = central_difference(&f, x, self.step);
        let fine = central_difference(&f, x, self.step / 2.0);
        richardson_combine(coarse, fine, 2.0, 2.0)
    }
}

fn central_difference<F>(f: &F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}
