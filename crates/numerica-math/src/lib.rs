//! # Numerica Math
//!
//! Numerical analysis routines built around Richardson extrapolation.
//!
//! This crate provides:
//!
//! - **Extrapolation**: Richardson extrapolation from an order or a limit,
//!   and iterative refinement towards the `h -> 0` limit
//! - **Differentiation**: Finite-difference derivatives
//! - **Solvers**: Scalar root finding (bisection, Newton, secant, chord,
//!   fixed point)
//! - **Interpolation**: Lagrange, Newton, Chebyshev, linear and parabolic
//! - **Linear Algebra**: Gaussian elimination, Jacobi and Gauss-Seidel
//! - **Smoothing**: Least-squares polynomial fits
//! - **Eigen**: Power iteration, Jacobi rotation, eigenvector recovery
//! - **Config**: TOML-loadable tolerances and iteration budgets
//!
//! ## Design Philosophy
//!
//! - **Explicit failure**: degenerate input returns a typed [`MathError`]
//!   instead of NaN or infinity
//! - **Plain functions**: every routine is a pure function of its inputs
//!   and a config struct; nothing is cached or shared
//!
//! ## Example
//!
//! ```rust
//! use numerica_math::prelude::*;
//!
//! // A(h) = 5.5 + 3.8 h^1.2
//! let approx = |h: f64| 5.5 + 3.8 * h.powf(1.2);
//!
//! let result = richardson(approx, 1.0, Knowns::Order(1.2)).unwrap();
//! assert!((result.value - 5.5).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::derivable_impls)]

pub mod config;
pub mod differentiation;
pub mod eigen;
pub mod error;
pub mod extrapolation;
pub mod interpolation;
pub mod linear_algebra;
pub mod smoothing;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{NumericsConfig, Validate};
    pub use crate::differentiation::FiniteDifference;
    pub use crate::eigen::{
        eigenvectors_for, jacobi_rotation, power_iteration, symmetric_eigen, EigenPair,
        PowerIterationConfig, RotationConfig,
    };
    pub use crate::error::{MathError, MathResult};
    pub use crate::extrapolation::{
        calculate_order_and_constant, calculate_value_and_constant, improve_approximation,
        richardson, richardson_combine, select_stepsize, ExtrapolationConfig,
        ExtrapolationResult, Knowns, StepSchedule, StepSize,
    };
    pub use crate::interpolation::{
        averaged_parabolic, chebyshev_nodes, linear_between, parabolic, Interpolator,
        LagrangePolynomial, LinearInterpolator, NewtonPolynomial,
    };
    pub use crate::linear_algebra::{
        gauss_seidel, gaussian_elimination, gaussian_elimination_partial_pivot, jacobi,
        IterationConfig,
    };
    pub use crate::smoothing::{least_squares, smooth, PolynomialFit};
    pub use crate::solvers::{
        bisection, chord, find_roots, newton_raphson, secant, BisectionSolver, ChordSolver,
        NewtonSolver, SecantSolver, Solver, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
