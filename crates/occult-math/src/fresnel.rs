// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Fresnel Integrals
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fresnel cosine and sine integrals, cos(pi t^2 / 2) convention:
//!
//!   C(x) = integral_0^x cos(pi t^2 / 2) dt
//!   S(x) = integral_0^x sin(pi t^2 / 2) dt
//!
//! Three-region evaluation: Maclaurin series for |x| <= 4, the auxiliary
//! f,g expansion with six terms for 4 < |x| <= 6, and a short asymptotic
//! tail beyond. Both functions are odd and tend to 1/2 at +infinity.
//!
//! # References
//!
//! - DLMF 7.2, 7.12; Abramowitz & Stegun 7.3.

use std::f64::consts::PI;

/// Series / auxiliary crossover.
const SERIES_LIMIT: f64 = 4.0;

/// Auxiliary / short-asymptotic crossover.
const AUXILIARY_LIMIT: f64 = 6.0;

const MAX_SERIES_TERMS: usize = 100;

/// Odd double factorials (4m-1)!! entering the f auxiliary series.
const F_NUMERATORS: [f64; 6] = [1.0, 3.0, 105.0, 10395.0, 2027025.0, 654729075.0];

/// Odd double factorials (4m+1)!! entering the g auxiliary series.
const G_NUMERATORS: [f64; 6] = [1.0, 15.0, 945.0, 135135.0, 34459425.0, 13749310575.0];

/// Fresnel cosine integral C(x).
pub fn fresnel_cos(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 0.5_f64.copysign(x);
    }

    let ax = x.abs();
    let value = if ax <= SERIES_LIMIT {
        cos_series(ax)
    } else {
        let terms = if ax <= AUXILIARY_LIMIT { 6 } else { 3 };
        let (f, g) = auxiliary_fg(ax, terms);
        let t = 0.5 * PI * ax * ax;
        0.5 + f * t.sin() - g * t.cos()
    };
    value.copysign(x)
}

/// Fresnel sine integral S(x).
pub fn fresnel_sin(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 0.5_f64.copysign(x);
    }

    let ax = x.abs();
    let value = if ax <= SERIES_LIMIT {
        sin_series(ax)
    } else {
        let terms = if ax <= AUXILIARY_LIMIT { 6 } else { 3 };
        let (f, g) = auxiliary_fg(ax, terms);
        let t = 0.5 * PI * ax * ax;
        0.5 - f * t.cos() - g * t.sin()
    };
    value.copysign(x)
}

/// C(x) = x sum_n (-1)^n t^(2n) / ((2n)! (4n+1)), t = pi x^2 / 2.
fn cos_series(x: f64) -> f64 {
    let t = 0.5 * PI * x * x;
    let mut term = x;
    let mut sum = term;
    for n in 1..MAX_SERIES_TERMS {
        let n2 = (2 * n) as f64;
        let n4 = (4 * n) as f64;
        term *= -t * t / ((n2 - 1.0) * n2);
        term *= (n4 - 3.0) / (n4 + 1.0);
        sum += term;
        if term.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}

/// S(x) = x sum_n (-1)^n t^(2n+1) / ((2n+1)! (4n+3)), t = pi x^2 / 2.
fn sin_series(x: f64) -> f64 {
    let t = 0.5 * PI * x * x;
    let mut term = x * t / 3.0;
    let mut sum = term;
    for n in 1..MAX_SERIES_TERMS {
        let n2 = (2 * n) as f64;
        let n4 = (4 * n) as f64;
        term *= -t * t / (n2 * (n2 + 1.0));
        term *= (n4 - 1.0) / (n4 + 3.0);
        sum += term;
        if term.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}

/// Auxiliary functions for the large-argument forms:
///
///   f(x) = (1/(pi x))   sum_m (-1)^m (4m-1)!! / (pi x^2)^(2m)
///   g(x) = (1/(pi^2 x^3)) sum_m (-1)^m (4m+1)!! / (pi x^2)^(2m)
fn auxiliary_fg(x: f64, terms: usize) -> (f64, f64) {
    let pix2 = PI * x * x;
    let w = 1.0 / (pix2 * pix2);

    let mut f_sum = 0.0;
    let mut g_sum = 0.0;
    let mut power = 1.0;
    let mut sign = 1.0;
    for m in 0..terms {
        f_sum += sign * F_NUMERATORS[m] * power;
        g_sum += sign * G_NUMERATORS[m] * power;
        power *= w;
        sign = -sign;
    }

    let f = f_sum / (PI * x);
    let g = g_sum / (PI * pix2 * x);
    (f, g)
}
