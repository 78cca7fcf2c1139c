//! Two-term Richardson extrapolation.
//!
//! Models an approximation `A(h)` as `A(h) = value + constant * h^order` and
//! solves for the two unknown parameters from evaluations at two step sizes.

use std::ops::Deref;

use crate::error::{MathError, MathResult};

/// Step-size input: a single initial step or an explicit schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum StepSize {
    /// Initial step, halved to produce the schedule.
    Initial(f64),
    /// Explicit schedule, used as given.
    Schedule(Vec<f64>),
}

impl From<f64> for StepSize {
    fn from(h: f64) -> Self {
        StepSize::Initial(h)
    }
}

impl From<Vec<f64>> for StepSize {
    fn from(steps: Vec<f64>) -> Self {
        StepSize::Schedule(steps)
    }
}

impl From<&[f64]> for StepSize {
    fn from(steps: &[f64]) -> Self {
        StepSize::Schedule(steps.to_vec())
    }
}

/// Ordered step sizes at which the approximation is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchedule(Vec<f64>);

impl StepSchedule {
    /// Returns the steps as a slice.
    pub fn steps(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the schedule, returning the underlying steps.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for StepSchedule {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Which model parameters the caller already knows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Knowns {
    /// Nothing known: value, order and constant are all unknown.
    Neither,
    /// The convergence order is known; solve for value and constant.
    Order(f64),
    /// The limiting value is known; solve for order and constant.
    Value(f64),
    /// Both known; only the constant would remain, which is not supported.
    Both {
        /// Known convergence order.
        order: f64,
        /// Known limiting value.
        value: f64,
    },
}

impl Knowns {
    /// Number of model parameters left to determine, constant included.
    pub fn unknown_count(&self) -> usize {
        match self {
            Knowns::Neither => 3,
            Knowns::Order(_) | Knowns::Value(_) => 2,
            Knowns::Both { .. } => 1,
        }
    }
}

/// Parameters of the fitted error model `A(h) = value + constant * h^order`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrapolationResult {
    /// Limiting value as `h -> 0`.
    pub value: f64,
    /// Power of the leading error term.
    pub order: f64,
    /// Coefficient of the leading error term.
    pub constant: f64,
}

/// Builds the step schedule for `num_unknowns` unknowns.
///
/// An explicit schedule must have exactly `num_unknowns` entries and is
/// returned as-is. An initial step `h` produces `[h, h/2, ..., h/2^(n-1)]`.
///
/// # Example
///
/// ```rust
/// use numerica_math::extrapolation::select_stepsize;
///
/// let schedule = select_stepsize(4.0, 3).unwrap();
/// assert_eq!(schedule.steps(), &[4.0, 2.0, 1.0]);
///
/// assert!(select_stepsize(vec![1.0, 0.5, 0.25], 2).is_err());
/// ```
pub fn select_stepsize(h: impl Into<StepSize>, num_unknowns: usize) -> MathResult<StepSchedule> {
    if num_unknowns == 0 {
        return Err(MathError::invalid_input(
            "Step schedule needs at least one unknown",
        ));
    }

    match h.into() {
        StepSize::Schedule(steps) => {
            if steps.len() != num_unknowns {
                return Err(MathError::SizeMismatch {
                    expected: num_unknowns,
                    actual: steps.len(),
                });
            }
            check_schedule(&steps)?;
            Ok(StepSchedule(steps))
        }
        StepSize::Initial(h) => {
            if !(h.is_finite() && h > 0.0) {
                return Err(MathError::invalid_input(format!(
                    "Initial step must be finite and positive, got {}",
                    h
                )));
            }

            let mut steps = Vec::with_capacity(num_unknowns);
            let mut current = h;
            steps.push(current);
            for _ in 1..num_unknowns {
                current /= 2.0;
                steps.push(current);
            }
            Ok(StepSchedule(steps))
        }
    }
}

/// Explicit schedules must be finite, positive and strictly decreasing.
fn check_schedule(steps: &[f64]) -> MathResult<()> {
    if let Some(bad) = steps.iter().find(|h| !(h.is_finite() && **h > 0.0)) {
        return Err(MathError::invalid_input(format!(
            "Step sizes must be finite and positive, got {}",
            bad
        )));
    }
    if let Some(pair) = steps.windows(2).find(|pair| pair[1] >= pair[0]) {
        return Err(MathError::invalid_input(format!(
            "Step sizes must be strictly decreasing, got {} followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Extracts `(h0, h1)` from a two-step schedule.
///
/// Equal steps pass through so the formulas can report them as degenerate.
fn step_pair(h: &[f64]) -> MathResult<(f64, f64)> {
    if h.len() != 2 {
        return Err(MathError::SizeMismatch {
            expected: 2,
            actual: h.len(),
        });
    }

    let (h0, h1) = (h[0], h[1]);
    if !(h0.is_finite() && h0 > 0.0 && h1.is_finite() && h1 > 0.0) {
        return Err(MathError::invalid_input(format!(
            "Step sizes must be finite and positive, got [{}, {}]",
            h0, h1
        )));
    }
    if h0 < h1 {
        return Err(MathError::invalid_input(format!(
            "Step sizes must be decreasing, got [{}, {}]",
            h0, h1
        )));
    }
    Ok((h0, h1))
}

/// Solves for the limiting value and error constant given a known order.
///
/// With `r = (h0/h1)^order`:
/// `value = (A(h0) - A(h1) * r) / (1 - r)` and
/// `constant = (A(h0) - value) / h0^order`.
///
/// # Errors
///
/// `DegenerateExtrapolation` when `r == 1` (zero order or equal steps) or the
/// result is not finite.
pub fn calculate_value_and_constant<F>(
    func: F,
    order: f64,
    h: &[f64],
) -> MathResult<ExtrapolationResult>
where
    F: Fn(f64) -> f64,
{
    let (h0, h1) = step_pair(h)?;

    let f0 = func(h0);
    let f1 = func(h1);

    let ratio = (h0 / h1).powf(order);
    let denom = 1.0 - ratio;
    if !ratio.is_finite() || denom.abs() <= f64::EPSILON * ratio.abs().max(1.0) {
        return Err(MathError::degenerate(
            ratio,
            "step ratio raised to the order is one",
        ));
    }

    let value = (f0 - f1 * ratio) / denom;
    let constant = (f0 - value) / h0.powf(order);

    if !(value.is_finite() && constant.is_finite()) {
        return Err(MathError::degenerate(
            ratio,
            "extrapolated value or constant is not finite",
        ));
    }

    Ok(ExtrapolationResult {
        value,
        order,
        constant,
    })
}

/// Solves for the convergence order and error constant given a known value.
///
/// `order = ln((A(h0) - value) / (A(h1) - value)) / ln(h0/h1)` and
/// `constant = (A(h0) - value) / h0^order`.
///
/// # Errors
///
/// `DegenerateExtrapolation` when the steps coincide, when either evaluation
/// equals `value`, or when the error ratio is not positive.
pub fn calculate_order_and_constant<F>(
    func: F,
    value: f64,
    h: &[f64],
) -> MathResult<ExtrapolationResult>
where
    F: Fn(f64) -> f64,
{
    let (h0, h1) = step_pair(h)?;

    let step_ratio = h0 / h1;
    if (step_ratio - 1.0).abs() <= f64::EPSILON {
        return Err(MathError::degenerate(step_ratio, "step sizes coincide"));
    }

    let e0 = func(h0) - value;
    let e1 = func(h1) - value;

    let error_ratio = e0 / e1;
    if !(error_ratio.is_finite() && error_ratio > 0.0) {
        return Err(MathError::degenerate(
            error_ratio,
            "error ratio is not positive, logarithm undefined",
        ));
    }

    let order = error_ratio.ln() / step_ratio.ln();
    let constant = e0 / h0.powf(order);

    if !(order.is_finite() && constant.is_finite()) {
        return Err(MathError::degenerate(
            error_ratio,
            "recovered order or constant is not finite",
        ));
    }

    Ok(ExtrapolationResult {
        value,
        order,
        constant,
    })
}

/// Richardson extrapolation dispatched on what is already known.
///
/// | knowns | behaviour |
/// |--------|-----------|
/// | `Neither` | `NotImplemented` |
/// | `Order(n)` | [`calculate_value_and_constant`] |
/// | `Value(f)` | [`calculate_order_and_constant`] |
/// | `Both` | `InvalidKnownsSet` |
///
/// # Example
///
/// ```rust
/// use numerica_math::extrapolation::{richardson, Knowns};
///
/// let approx = |h: f64| 5.5 + 1.2 * h.powf(3.8);
///
/// let result = richardson(approx, 1.0, Knowns::Value(5.5)).unwrap();
/// assert!((result.order - 3.8).abs() < 1e-10);
/// assert!((result.constant - 1.2).abs() < 1e-10);
/// ```
pub fn richardson<F>(
    func: F,
    h: impl Into<StepSize>,
    knowns: Knowns,
) -> MathResult<ExtrapolationResult>
where
    F: Fn(f64) -> f64,
{
    match knowns {
        Knowns::Neither => Err(MathError::not_implemented(
            "solving for order, value and constant simultaneously",
        )),
        Knowns::Both { .. } => Err(MathError::InvalidKnownsSet),
        Knowns::Order(order) => {
            let schedule = select_stepsize(h, knowns.unknown_count())?;
            calculate_value_and_constant(func, order, &schedule)
        }
        Knowns::Value(value) => {
            let schedule = select_stepsize(h, knowns.unknown_count())?;
            calculate_order_and_constant(func, value, &schedule)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const VALUE: f64 = 5.5;
    const ORDER: f64 = 3.8;
    const CONSTANT: f64 = 1.2;

    fn model(h: f64) -> f64 {
        VALUE + CONSTANT * h.powf(ORDER)
    }

    #[test]
    fn test_select_stepsize_halving() {
        assert_eq!(select_stepsize(4.0, 3).unwrap().steps(), &[4.0, 2.0, 1.0]);
        assert_eq!(select_stepsize(4.0, 2).unwrap().steps(), &[4.0, 2.0]);
        assert_eq!(select_stepsize(4.0, 1).unwrap().steps(), &[4.0]);
    }

    #[test]
    fn test_select_stepsize_explicit() {
        let steps = vec![1.0, 0.5, 0.25];
        let schedule = select_stepsize(steps.clone(), 3).unwrap();
        assert_eq!(schedule.into_inner(), steps);

        let err = select_stepsize(steps, 2).unwrap_err();
        assert_eq!(
            err,
            MathError::SizeMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_select_stepsize_rejects_bad_input() {
        assert!(select_stepsize(0.0, 2).is_err());
        assert!(select_stepsize(-1.0, 2).is_err());
        assert!(select_stepsize(f64::NAN, 2).is_err());
        assert!(select_stepsize(1.0, 0).is_err());
    }

    #[test]
    fn test_order_and_constant_recovered() {
        let result = calculate_order_and_constant(model, VALUE, &[1.0, 0.5]).unwrap();

        assert_relative_eq!(result.order, ORDER, epsilon = 1e-5);
        assert_relative_eq!(result.constant, CONSTANT, epsilon = 1e-5);
        assert_eq!(result.value, VALUE);
    }

    #[test]
    fn test_value_and_constant_recovered() {
        let result = calculate_value_and_constant(model, ORDER, &[1.0, 0.5]).unwrap();

        assert_relative_eq!(result.value, VALUE, epsilon = 1e-5);
        assert_relative_eq!(result.constant, CONSTANT, epsilon = 1e-5);
        assert_eq!(result.order, ORDER);
    }

    #[test]
    fn test_richardson_dispatch() {
        let by_value = richardson(model, vec![1.0, 0.5], Knowns::Value(VALUE)).unwrap();
        assert_relative_eq!(by_value.order, ORDER, epsilon = 1e-5);
        assert_relative_eq!(by_value.constant, CONSTANT, epsilon = 1e-5);

        let by_order = richardson(model, vec![1.0, 0.5], Knowns::Order(ORDER)).unwrap();
        assert_relative_eq!(by_order.value, VALUE, epsilon = 1e-5);
        assert_relative_eq!(by_order.constant, CONSTANT, epsilon = 1e-5);

        // Scalar step halves to the same schedule
        let scalar = richardson(model, 1.0, Knowns::Value(VALUE)).unwrap();
        assert_eq!(scalar, by_value);
        let scalar = richardson(model, 1.0, Knowns::Order(ORDER)).unwrap();
        assert_eq!(scalar, by_order);
    }

    #[test]
    fn test_richardson_unsupported_knowns() {
        assert!(matches!(
            richardson(model, 1.0, Knowns::Neither),
            Err(MathError::NotImplemented { .. })
        ));
        assert_eq!(
            richardson(
                model,
                1.0,
                Knowns::Both {
                    order: ORDER,
                    value: VALUE
                }
            ),
            Err(MathError::InvalidKnownsSet)
        );
    }

    #[test]
    fn test_select_stepsize_rejects_bad_schedule() {
        for steps in [
            vec![-1.0, 0.5],
            vec![1.0, 0.0],
            vec![f64::INFINITY, 0.5],
            vec![0.5, 1.0],
            vec![0.5, 0.5],
            vec![1.0, 0.25, 0.5],
        ] {
            let len = steps.len();
            assert!(matches!(
                select_stepsize(steps, len),
                Err(MathError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_increasing_steps_rejected() {
        assert!(matches!(
            richardson(model, vec![0.5, 1.0], Knowns::Value(VALUE)),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            calculate_order_and_constant(model, VALUE, &[0.5, 1.0]),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            calculate_value_and_constant(model, ORDER, &[0.5, 1.0]),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_richardson_schedule_length_checked() {
        let result = richardson(model, vec![1.0, 0.5, 0.25], Knowns::Order(ORDER));
        assert_eq!(
            result,
            Err(MathError::SizeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_zero_order_is_degenerate() {
        let result = calculate_value_and_constant(model, 0.0, &[1.0, 0.5]);
        assert!(matches!(
            result,
            Err(MathError::DegenerateExtrapolation { .. })
        ));
    }

    #[test]
    fn test_equal_steps_are_degenerate() {
        assert!(matches!(
            calculate_value_and_constant(model, ORDER, &[0.5, 0.5]),
            Err(MathError::DegenerateExtrapolation { .. })
        ));
        assert!(matches!(
            calculate_order_and_constant(model, VALUE, &[0.5, 0.5]),
            Err(MathError::DegenerateExtrapolation { .. })
        ));
    }

    #[test]
    fn test_exact_evaluation_is_degenerate() {
        // Constant function: both evaluations equal the known value
        let flat = |_h: f64| VALUE;
        assert!(matches!(
            calculate_order_and_constant(flat, VALUE, &[1.0, 0.5]),
            Err(MathError::DegenerateExtrapolation { .. })
        ));
    }

    #[test]
    fn test_opposite_sign_errors_are_degenerate() {
        // Errors straddle the known value, so the log argument is negative
        let oscillating = |h: f64| if h > 0.75 { VALUE + 1.0 } else { VALUE - 1.0 };
        assert!(matches!(
            calculate_order_and_constant(oscillating, VALUE, &[1.0, 0.5]),
            Err(MathError::DegenerateExtrapolation { .. })
        ));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let first = richardson(model, 1.0, Knowns::Value(VALUE)).unwrap();
        let second = richardson(model, 1.0, Knowns::Value(VALUE)).unwrap();
        assert_eq!(first.order.to_bits(), second.order.to_bits());
        assert_eq!(first.constant.to_bits(), second.constant.to_bits());
    }

    #[test]
    fn test_unknown_count() {
        assert_eq!(Knowns::Neither.unknown_count(), 3);
        assert_eq!(Knowns::Order(2.0).unknown_count(), 2);
        assert_eq!(Knowns::Value(1.0).unknown_count(), 2);
        assert_eq!(
            Knowns::Both {
                order: 2.0,
                value: 1.0
            }
            .unknown_count(),
            1
        );
    }
}
