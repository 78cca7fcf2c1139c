//! Configuration for the numerical routines.
//!
//! Each module owns the configuration struct its routines take
//! ([`SolverConfig`], [`IterationConfig`], [`ExtrapolationConfig`],
//! [`PowerIterationConfig`], [`RotationConfig`], [`FiniteDifference`]).
//! [`NumericsConfig`] gathers them so a whole set of tolerances and budgets
//! can be loaded from TOML and validated in one go.
//!
//! # Example
//!
//! ```rust
//! use numerica_math::config::{NumericsConfig, Validate};
//!
//! let config = NumericsConfig::from_toml_str(
//!     r#"
//!     [extrapolation]
//!     tolerance = 1e-9
//!
//!     [solver]
//!     max_iterations = 50
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.solver.max_iterations, 50);
//! assert_eq!(config.extrapolation.max_iterations, 200);
//! assert!(config.is_valid());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::differentiation::FiniteDifference;
use crate::eigen::{PowerIterationConfig, RotationConfig};
use crate::extrapolation::ExtrapolationConfig;
use crate::linear_algebra::IterationConfig;
use crate::solvers::SolverConfig;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }

    fn prefixed(mut self, prefix: &str) -> Self {
        self.field = format!("{}.{}", prefix, self.field);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

const MAX_ITERATION_BUDGET: u32 = 1_000_000;

fn check_tolerance(tolerance: f64, errors: &mut Vec<ValidationError>) {
    if !(tolerance > 0.0 && tolerance < 1.0) {
        errors.push(ValidationError::with_rule(
            "tolerance",
            format!("Tolerance {} must lie strictly between 0 and 1", tolerance),
            "valid_tolerance",
        ));
    }
}

fn check_iterations(max_iterations: u32, errors: &mut Vec<ValidationError>) {
    if max_iterations == 0 || max_iterations > MAX_ITERATION_BUDGET {
        errors.push(ValidationError::with_rule(
            "max_iterations",
            format!(
                "Max iterations must be between 1 and {}",
                MAX_ITERATION_BUDGET
            ),
            "valid_iterations",
        ));
    }
}

impl Validate for SolverConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_tolerance(self.tolerance, &mut errors);
        check_iterations(self.max_iterations, &mut errors);
        errors
    }
}

impl Validate for IterationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_tolerance(self.tolerance, &mut errors);
        check_iterations(self.max_iterations, &mut errors);
        errors
    }
}

impl Validate for ExtrapolationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_tolerance(self.tolerance, &mut errors);
        check_iterations(self.max_iterations, &mut errors);
        errors
    }
}

impl Validate for PowerIterationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_tolerance(self.tolerance, &mut errors);
        check_iterations(self.max_iterations, &mut errors);
        errors
    }
}

impl Validate for RotationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_tolerance(self.tolerance, &mut errors);
        check_iterations(self.max_iterations, &mut errors);
        errors
    }
}

impl Validate for FiniteDifference {
    fn validate(&self) -> Vec<ValidationError> {
        let step = self.step();
        if step.is_finite() && step > 0.0 {
            Vec::new()
        } else {
            vec![ValidationError::with_rule(
                "step",
                format!("Step size {} must be finite and positive", step),
                "positive_step",
            )]
        }
    }
}

// =============================================================================
// AGGREGATE CONFIGURATION
// =============================================================================

/// Every tunable tolerance and budget in the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericsConfig {
    /// Scalar root finding.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Jacobi and Gauss-Seidel iteration.
    #[serde(default)]
    pub iteration: IterationConfig,

    /// Iterative Richardson refinement.
    #[serde(default)]
    pub extrapolation: ExtrapolationConfig,

    /// Finite-difference step.
    #[serde(default)]
    pub differentiation: FiniteDifference,

    /// Power iteration.
    #[serde(default)]
    pub power_iteration: PowerIterationConfig,

    /// Jacobi rotation.
    #[serde(default)]
    pub rotation: RotationConfig,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            iteration: IterationConfig::default(),
            extrapolation: ExtrapolationConfig::default(),
            differentiation: FiniteDifference::default(),
            power_iteration: PowerIterationConfig::default(),
            rotation: RotationConfig::default(),
        }
    }
}

impl NumericsConfig {
    /// Parses and validates a configuration from TOML.
    ///
    /// Missing tables and fields fall back to their defaults.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate_or_error()?;
        log::debug!("Loaded numerics configuration: {:?}", config);
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

impl Validate for NumericsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let sections: [(&str, Vec<ValidationError>); 6] = [
            ("solver", self.solver.validate()),
            ("iteration", self.iteration.validate()),
            ("extrapolation", self.extrapolation.validate()),
            ("differentiation", self.differentiation.validate()),
            ("power_iteration", self.power_iteration.validate()),
            ("rotation", self.rotation.validate()),
        ];

        sections
            .into_iter()
            .flat_map(|(prefix, errors)| errors.into_iter().map(move |e| e.prefixed(prefix)))
            .collect()
    }
}
