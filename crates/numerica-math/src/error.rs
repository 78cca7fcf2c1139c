//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// An explicit step schedule does not match the number of unknowns.
    #[error("Step schedule has {actual} entries but {expected} unknowns were requested")]
    SizeMismatch {
        /// Number of entries required.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },

    /// The requested combination of unknowns is not supported.
    #[error("Not implemented: {reason}")]
    NotImplemented {
        /// What was requested.
        reason: String,
    },

    /// Both order and limiting value were supplied to the extrapolation engine.
    #[error("Invalid set of knowns: order and value were both supplied, nothing to extrapolate")]
    InvalidKnownsSet,

    /// Extrapolation hit a zero denominator or an undefined logarithm.
    #[error("Degenerate extrapolation (ratio {ratio:.6e}): {reason}")]
    DegenerateExtrapolation {
        /// The offending step or value ratio.
        ratio: f64,
        /// What went wrong.
        reason: String,
    },

    /// An iterative method exhausted its iteration budget.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last achieved difference or residual.
        residual: f64,
    },

    /// An iterative method blew up.
    #[error("Iteration diverged after {iterations} iterations (magnitude: {magnitude:.2e})")]
    Diverged {
        /// Number of iterations performed before the blow-up was detected.
        iterations: u32,
        /// Largest component magnitude observed.
        magnitude: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Division by zero or near-zero value.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// Matrix is singular.
    #[error("Singular matrix: zero pivot encountered")]
    SingularMatrix,

    /// Matrix dimensions are incompatible.
    #[error("Incompatible matrix dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first operand.
        rows1: usize,
        /// Columns in first operand.
        cols1: usize,
        /// Rows in second operand.
        rows2: usize,
        /// Columns in second operand.
        cols2: usize,
    },

    /// Evaluation point is outside the node range.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// Minimum valid value.
        min: f64,
        /// Maximum valid value.
        max: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailure {
            iterations,
            residual,
        }
    }

    /// Creates a degenerate extrapolation error.
    #[must_use]
    pub fn degenerate(ratio: f64, reason: impl Into<String>) -> Self {
        Self::DegenerateExtrapolation {
            ratio,
            reason: reason.into(),
        }
    }

    /// Creates a not-implemented error.
    #[must_use]
    pub fn not_implemented(reason: impl Into<String>) -> Self {
        Self::NotImplemented {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(200, 1e-6);
        assert!(err.to_string().contains("200 iterations"));

        let err = MathError::SizeMismatch {
            expected: 2,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 entries"));
        assert!(msg.contains("2 unknowns"));
    }

    #[test]
    fn test_degenerate_carries_ratio() {
        let err = MathError::degenerate(1.0, "step ratio is one");
        match err {
            MathError::DegenerateExtrapolation { ratio, ref reason } => {
                assert!((ratio - 1.0).abs() < f64::EPSILON);
                assert_eq!(reason, "step ratio is one");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
