// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Bessel Functions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bessel J0 and modified Bessel I0 of the first kind.
//!
//! Both use the Maclaurin series inside a transition radius (8 for J0,
//! 50 for I0) and the Stokes / large-argument asymptotic expansions
//! beyond it. The series region is carried until the running term drops
//! below the working epsilon relative to the partial sum, so accuracy
//! there is near machine level; the asymptotic tails are good to a few
//! parts in 1e7.
//!
//! # References
//!
//! - Abramowitz & Stegun, Handbook of Mathematical Functions, 9.1, 9.2,
//!   9.6, 9.7.

/// Series/asymptotic crossover for J0.
const J0_TRANSITION: f64 = 8.0;

/// Series/asymptotic crossover for I0.
const I0_TRANSITION: f64 = 50.0;

/// Hard cap on series terms; the relative-epsilon stop fires far earlier.
const MAX_SERIES_TERMS: usize = 200;

/// Bessel function of the first kind, order zero.
pub fn besselj0(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax.is_infinite() {
        return 0.0;
    }

    if ax <= J0_TRANSITION {
        // J0(x) = sum_k (-1)^k (x^2/4)^k / (k!)^2
        let q = 0.25 * ax * ax;
        let mut term = 1.0_f64;
        let mut sum = 1.0_f64;
        for k in 1..MAX_SERIES_TERMS {
            term *= -q / ((k * k) as f64);
            sum += term;
            if term.abs() < f64::EPSILON * sum.abs() {
                break;
            }
        }
        sum
    } else {
        // J0(x) ~ sqrt(2/(pi x)) [P0(x) cos(x - pi/4) + Q0(x) sin(x - pi/4)]
        let z = 1.0 / (ax * ax);
        let p0 = 1.0 + z * (-9.0 / 128.0 + z * (3675.0 / 32768.0));
        let q0 = (-1.0 / (8.0 * ax)) * (1.0 + z * (-75.0 / 128.0));
        let chi = ax - std::f64::consts::FRAC_PI_4;
        (2.0 / (std::f64::consts::PI * ax)).sqrt() * (p0 * chi.cos() - q0 * chi.sin())
    }
}

/// Modified Bessel function of the first kind, order zero.
pub fn besseli0(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax.is_infinite() {
        return f64::INFINITY;
    }

    if ax <= I0_TRANSITION {
        // I0(x) = sum_k (x^2/4)^k / (k!)^2
        let q = 0.25 * ax * ax;
        let mut term = 1.0_f64;
        let mut sum = 1.0_f64;
        for k in 1..MAX_SERIES_TERMS {
            term *= q / ((k * k) as f64);
            sum += term;
            if term < f64::EPSILON * sum {
                break;
            }
        }
        sum
    } else {
        // I0(x) ~ e^x / sqrt(2 pi x) [1 + 1/(8x) + 9/(128x^2) + 225/(3072x^3)]
        let r = 1.0 / ax;
        let series = 1.0 + r * (0.125 + r * (9.0 / 128.0 + r * (225.0 / 3072.0)));
        ax.exp() / (2.0 * std::f64::consts::PI * ax).sqrt() * series
    }
}
