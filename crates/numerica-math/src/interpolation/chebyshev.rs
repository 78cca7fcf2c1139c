use std::f64::consts::PI;

use crate::error::{MathError, MathResult};

/// Chebyshev nodes of the first kind mapped onto `[a, b]`.
///
/// ```text
/// x_k = (a + b)/2 + (b - a)/2 * cos((2k - 1) * pi / 2n),  k = 1..=n
/// ```
///
/// Nodes come out in descending order.
///
/// # Errors
///
/// Returns an error if `n` is zero or the interval is empty.
pub fn chebyshev_nodes(n: usize, a: f64, b: f64) -> MathResult<Vec<f64>> {
    if n == 0 {
        return Err(MathError::invalid_input("at least one node is required"));
    }
    if !(a < b) {
        return Err(MathError::invalid_input(format!(
            "interval [{}, {}] is empty",
            a, b
        )));
    }

    let mid = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let denom = 2.0 * n as f64;

    Ok((1..=n)
        .map(|k| mid + half * ((2 * k - 1) as f64 * PI / denom).cos())
        .collect())
}
