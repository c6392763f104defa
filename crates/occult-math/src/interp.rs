//! Newton-form polynomial interpolation on small node sets.
//!
//! The transform driver fits the stationary phase at a handful of nodes
//! across each window and evaluates the fit at every sample in between.
//! Divided differences keep the fit stable on the nearly uniform node
//! layouts used there.

/// Divided-difference coefficients for the Newton form through
/// (xs[i], ys[i]). Nodes must be pairwise distinct.
pub fn divided_differences(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xs.len(), ys.len(), "node/value count mismatch");
    let n = xs.len();
    let mut table = ys.to_vec();
    for level in 1..n {
        for i in (level..n).rev() {
            table[i] = (table[i] - table[i - 1]) / (xs[i] - xs[i - level]);
        }
    }
    table
}

/// Evaluate the Newton form with coefficients from
/// [`divided_differences`] at `x`.
pub fn newton_eval(coeffs: &[f64], xs: &[f64], x: f64) -> f64 {
    let n = coeffs.len();
    if n == 0 {
        return 0.0;
    }
    let mut acc = coeffs[n - 1];
    for i in (0..n - 1).rev() {
        acc = acc * (x - xs[i]) + coeffs[i];
    }
    acc
}
