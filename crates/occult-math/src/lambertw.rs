// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Lambert W
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Principal branch of the Lambert W function, the inverse of t e^t,
//! and the window-width resolution inverse built on it.
//!
//! W is defined for x >= -1/e. The starting guess is log(x / log x) for
//! x > 2, the branch-point series in p = sqrt(2(ex + 1)) near -1/e, and
//! the identity elsewhere; Halley iteration polishes to a tolerance that
//! scales with the working precision. Generic over the float type: the
//! same code path serves f32 and f64.
//!
//! # References
//!
//! - Corless et al. (1996). "On the Lambert W function."
//!   *Adv. Comput. Math.* 5.

use num_traits::Float;

/// Halley steps before giving up and returning the current iterate.
const MAX_HALLEY_STEPS: usize = 100;

/// Distance from the branch point under which the series start is used.
const BRANCH_NEIGHBORHOOD: f64 = 1.0e-3;

/// Distance from the branch point under which the series alone is
/// already at working precision.
const BRANCH_SERIES_ONLY: f64 = 1.0e-9;

fn cst<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

/// Branch-point series W(x) = -1 + p - p^2/3 + ... with
/// p = sqrt(2(ex + 1)).
fn branch_point_series<T: Float>(p: T) -> T {
    let c2 = cst::<T>(-1.0 / 3.0);
    let c3 = cst::<T>(11.0 / 72.0);
    let c4 = cst::<T>(-43.0 / 540.0);
    let c5 = cst::<T>(769.0 / 17280.0);
    let c6 = cst::<T>(-221.0 / 8505.0);
    -T::one() + p * (T::one() + p * (c2 + p * (c3 + p * (c4 + p * (c5 + p * c6)))))
}

/// Principal branch W(x).
///
/// Returns NaN for x < -1/e (outside the real domain) and for NaN input,
/// -1 exactly at the branch point, and +infinity at +infinity. Callers
/// that must fail loudly map the NaN to their own domain error.
pub fn lambertw<T: Float>(x: T) -> T {
    if x.is_nan() {
        return T::nan();
    }
    let rcpr_e = cst::<T>(0.36787944117144233);
    if x < -rcpr_e {
        return T::nan();
    }
    if x == -rcpr_e {
        return -T::one();
    }
    if x.is_infinite() {
        return T::infinity();
    }

    let two = cst::<T>(2.0);
    let offset = x + rcpr_e;
    let near_branch = offset < cst::<T>(BRANCH_NEIGHBORHOOD);

    let mut w = if near_branch {
        let p = (two * cst::<T>(std::f64::consts::E) * offset).sqrt();
        let series = branch_point_series(p);
        if offset < cst::<T>(BRANCH_SERIES_ONLY) {
            return series;
        }
        series
    } else if x > two {
        (x / x.ln()).ln()
    } else {
        x
    };

    let tol = T::epsilon().sqrt();
    for _ in 0..MAX_HALLEY_STEPS {
        let ew = w.exp();
        let diff = w * ew - x;
        if diff == T::zero() {
            return w;
        }
        let denom = ew * (w + T::one()) - (w + two) * diff / (two * w + two);
        let dw = diff / denom;
        w = w - dw;
        if dw.abs() <= tol {
            break;
        }
    }
    w
}

/// Inverse of y = x / (e^-x + x - 1), the map between window width and
/// effective resolution under the b-factor correction.
///
/// Substituting P = y/(1-y) gives x = W(P e^P) - P on the principal
/// branch. Undefined (NaN) for y <= 1.
///
/// Returns 0 at y = +infinity, although the surrounding calculus
/// suggests the limit should be +infinity; kept as-is pending a ruling
/// from the scientific owner (see DESIGN.md).
pub fn resolution_inverse<T: Float>(y: T) -> T {
    if y.is_nan() {
        return T::nan();
    }
    if y <= T::one() {
        return T::nan();
    }
    if y.is_infinite() {
        return T::zero();
    }
    let p = y / (T::one() - y);
    lambertw(p * p.exp()) - p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambertw_of_one() {
        // The omega constant.
        let w: f64 = lambertw(1.0);
        assert!(
            (w - 0.5671432904097838).abs() < 1e-12,
            "W(1) = {w}"
        );
    }

    #[test]
    fn test_lambertw_reference_values() {
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (std::f64::consts::E, 1.0),
            (2.0 * (2.0f64).exp(), 2.0),
            (10.0 * (10.0f64).exp(), 10.0),
        ];
        for &(x, expected) in cases {
            let got: f64 = lambertw(x);
            assert!(
                (got - expected).abs() < 1e-12,
                "W({x}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_lambertw_branch_point() {
        let x = -(-1.0f64).exp(); // -1/e to the last bit
        assert_eq!(lambertw(x), -1.0, "W(-1/e) must be exactly -1");
    }

    #[test]
    fn test_lambertw_below_branch_is_nan() {
        assert!(lambertw(-0.4f64).is_nan());
        assert!(lambertw(f64::NAN).is_nan());
    }

    #[test]
    fn test_lambertw_at_infinity() {
        assert_eq!(lambertw(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_lambertw_f32_path() {
        let w: f32 = lambertw(1.0f32);
        assert!(
            (w - 0.567_143_3).abs() < 1e-6,
            "single-precision W(1) = {w}"
        );
    }

    #[test]
    fn test_resolution_inverse_roundtrip() {
        // Forward map x -> x / (e^-x + x - 1), then invert.
        for x in [0.5, 1.0, 2.0, 5.0, 20.0] {
            let y = x / ((-x as f64).exp() + x - 1.0);
            let back: f64 = resolution_inverse(y);
            assert!(
                (back - x).abs() < 1e-10 * x.max(1.0),
                "resolution_inverse({y}) = {back}, expected {x}"
            );
        }
    }

    #[test]
    fn test_resolution_inverse_domain() {
        assert!(resolution_inverse(1.0f64).is_nan());
        assert!(resolution_inverse(0.5f64).is_nan());
        assert!(resolution_inverse(-3.0f64).is_nan());
        assert_eq!(resolution_inverse(f64::INFINITY), 0.0);
    }
}
