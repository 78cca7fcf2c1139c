//! Bisection and bracketed root scanning.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves `[a, b]`, keeping the half on which `f` changes sign.
/// Stops when `|f(mid)|` or the half-width drops below `config.tolerance`.
///
/// Requires `f(a) * f(b) <= 0`. An endpoint that is already a root (within
/// tolerance) is returned without iterating.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = 0.5 * (lo + hi);
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

/// Finds every sign-changing root of `f` in `[lo, hi]`.
///
/// The range is cut into `subintervals` equal pieces; each piece whose
/// endpoints have opposite signs is handed to [`bisection`]. Grid points
/// where `f` is exactly zero are reported as roots. Roots are returned in
/// ascending order.
///
/// Roots of even multiplicity (no sign change) and pairs of roots closer
/// together than one subinterval are not detected.
///
/// # Errors
///
/// Returns an error if the range is empty or `subintervals` is zero, or if
/// a bisection fails to converge.
///
/// # Example
///
/// ```rust
/// use numerica_math::solvers::{find_roots, SolverConfig};
///
/// let f = |x: f64| (x - 1.0) * (x + 2.0);
/// let roots = find_roots(f, -10.0, 10.0, 64, &SolverConfig::default()).unwrap();
///
/// assert_eq!(roots.len(), 2);
/// assert!((roots[0] + 2.0).abs() < 1e-9);
/// assert!((roots[1] - 1.0).abs() < 1e-9);
/// ```
pub fn find_roots<F>(
    f: F,
    lo: f64,
    hi: f64,
    subintervals: usize,
    config: &SolverConfig,
) -> MathResult<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    if !(lo < hi) {
        return Err(MathError::invalid_input(format!(
            "Search range [{}, {}] is empty",
            lo, hi
        )));
    }
    if subintervals == 0 {
        return Err(MathError::invalid_input(
            "At least one subinterval is required",
        ));
    }

    let width = (hi - lo) / subintervals as f64;
    let grid = |i: usize| if i == subintervals { hi } else { lo + i as f64 * width };

    let mut roots = Vec::new();
    let mut left = lo;
    let mut f_left = f(left);

    for i in 1..=subintervals {
        let right = grid(i);
        let f_right = f(right);

        if f_left == 0.0 {
            roots.push(left);
        } else if f_left * f_right < 0.0 {
            let result = bisection(&f, left, right, config)?;
            log::trace!(
                "root {} bracketed in [{}, {}] after {} iterations",
                result.root,
                left,
                right,
                result.iterations
            );
            roots.push(result.root);
        }

        left = right;
        f_left = f_right;
    }
    if f_left == 0.0 {
        roots.push(left);
    }

    roots.dedup_by(|a, b| (*a - *b).abs() < config.tolerance);
    log::debug!("found {} roots in [{}, {}]", roots.len(), lo, hi);

    Ok(roots)
}
