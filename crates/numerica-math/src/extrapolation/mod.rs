//! Richardson extrapolation.
//!
//! An approximation `A(h)` computed with step size `h` is modelled as
//!
//! ```text
//! A(h) = value + constant * h^order
//! ```
//!
//! Evaluating `A` at two step sizes determines two of the three parameters
//! once the third is known:
//!
//! - [`calculate_value_and_constant`]: order known, solve for the limit
//! - [`calculate_order_and_constant`]: limit known, measure the order
//! - [`richardson`]: dispatches on [`Knowns`]
//! - [`improve_approximation`]: repeated two-point refinement until the
//!   improvement falls below tolerance
//!
//! # Example
//!
//! ```rust
//! use numerica_math::extrapolation::{richardson, Knowns};
//!
//! // Trapezoid-like approximation with an h^2 error term
//! let approx = |h: f64| 2.0 + 0.3 * h * h;
//!
//! let result = richardson(approx, 0.1, Knowns::Order(2.0)).unwrap();
//! assert!((result.value - 2.0).abs() < 1e-12);
//! assert!((result.constant - 0.3).abs() < 1e-8);
//! ```

mod refinement;
mod richardson;

pub use refinement::{
    improve_approximation, richardson_combine, ExtrapolationConfig, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};
pub use richardson::{
    calculate_order_and_constant, calculate_value_and_constant, richardson, select_stepsize,
    ExtrapolationResult, Knowns, StepSchedule, StepSize,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_measured_order_feeds_value_solve() {
        // Measure the order with a known reference, then reuse it to
        // extrapolate a shifted problem with the same error behaviour.
        let reference = |h: f64| 1.0 + 0.7 * h.powf(2.5);
        let measured = richardson(reference, 0.8, Knowns::Value(1.0)).unwrap();
        assert_relative_eq!(measured.order, 2.5, epsilon = 1e-9);

        let shifted = |h: f64| 4.0 + 0.7 * h.powf(2.5);
        let result = richardson(shifted, 0.8, Knowns::Order(measured.order)).unwrap();
        assert_relative_eq!(result.value, 4.0, epsilon = 1e-9);
        assert_relative_eq!(result.constant, 0.7, epsilon = 1e-9);
    }

    #[test]
    fn test_central_difference_order_is_two() {
        let x = 0.3_f64;
        let central = |h: f64| ((x + h).sin() - (x - h).sin()) / (2.0 * h);

        let measured = calculate_order_and_constant(central, x.cos(), &[0.1, 0.05]).unwrap();
        assert_relative_eq!(measured.order, 2.0, epsilon = 1e-2);

        let refined = richardson_combine(central(0.1), central(0.05), 2.0, measured.order).unwrap();
        assert!((refined - x.cos()).abs() < (central(0.05) - x.cos()).abs());
    }
}
