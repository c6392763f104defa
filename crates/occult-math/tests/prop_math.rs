// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Property-Based Tests (proptest) for occult-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for occult-math using proptest.
//!
//! Covers: Lambert W inverse identity, resolution inverse round trip,
//! Fresnel integral symmetries and tail bounds, Bessel bounds, Horner
//! evaluation, Newton interpolation.

use occult_math::bessel::{besseli0, besselj0};
use occult_math::erf::erf;
use occult_math::fresnel::{fresnel_cos, fresnel_sin};
use occult_math::interp::{divided_differences, newton_eval};
use occult_math::lambertw::{lambertw, resolution_inverse};
use occult_math::poly::horner;
use proptest::prelude::*;

// ── Lambert W ────────────────────────────────────────────────────────

proptest! {
    /// W(x e^x) = x across the principal-branch domain.
    #[test]
    fn lambertw_inverse_identity(x in -1.0f64..50.0) {
        let t = x * x.exp();
        let w: f64 = lambertw(t);
        prop_assert!((w - x).abs() < 1e-12,
            "W({t}) = {w}, expected {x}, err = {}", (w - x).abs());
    }

    /// W is increasing on its domain.
    #[test]
    fn lambertw_monotone(a in -0.36f64..5.0, gap in 0.01f64..5.0) {
        let w1: f64 = lambertw(a);
        let w2: f64 = lambertw(a + gap);
        prop_assert!(w2 > w1, "W({}) = {w2} should exceed W({a}) = {w1}", a + gap);
    }

    /// The defining relation of the width/resolution map round-trips.
    #[test]
    fn resolution_inverse_roundtrip(x in 0.1f64..30.0) {
        let y = x / ((-x).exp() + x - 1.0);
        let back: f64 = resolution_inverse(y);
        prop_assert!((back - x).abs() < 1e-10 * x.max(1.0),
            "resolution_inverse({y}) = {back}, expected {x}");
    }
}

// ── Fresnel integrals ────────────────────────────────────────────────

proptest! {
    /// Both integrals are odd.
    #[test]
    fn fresnel_odd(x in 0.0f64..20.0) {
        prop_assert!((fresnel_cos(x) + fresnel_cos(-x)).abs() < 1e-14);
        prop_assert!((fresnel_sin(x) + fresnel_sin(-x)).abs() < 1e-14);
    }

    /// Tail envelope: |C(x) - 1/2| and |S(x) - 1/2| decay like 1/(pi x).
    #[test]
    fn fresnel_tail_bound(x in 1.0f64..50.0) {
        let envelope = 1.05 / (std::f64::consts::PI * x) + 1e-6;
        prop_assert!((fresnel_cos(x) - 0.5).abs() < envelope,
            "C({x}) = {} strays past the tail envelope", fresnel_cos(x));
        prop_assert!((fresnel_sin(x) - 0.5).abs() < envelope,
            "S({x}) = {} strays past the tail envelope", fresnel_sin(x));
    }
}

// ── Bessel functions ─────────────────────────────────────────────────

proptest! {
    /// |J0| <= 1 everywhere, J0 even.
    #[test]
    fn besselj0_bounded_and_even(x in 0.0f64..100.0) {
        let j = besselj0(x);
        prop_assert!(j.abs() <= 1.0 + 1e-9, "J0({x}) = {j}");
        prop_assert!((j - besselj0(-x)).abs() < 1e-14);
    }

    /// I0 >= 1, even, and increasing in |x|.
    #[test]
    fn besseli0_lower_bound_and_monotone(x in 0.0f64..30.0, gap in 0.1f64..5.0) {
        let lo = besseli0(x);
        let hi = besseli0(x + gap);
        prop_assert!(lo >= 1.0);
        prop_assert!(hi > lo, "I0 must increase: I0({x}) = {lo}, I0({}) = {hi}", x + gap);
        prop_assert!((lo - besseli0(-x)).abs() < 1e-12 * lo);
    }
}

// ── erf ──────────────────────────────────────────────────────────────

proptest! {
    /// erf maps into (-1, 1) and is increasing.
    #[test]
    fn erf_range_and_monotone(x in -5.0f64..5.0, gap in 0.001f64..1.0) {
        let lo = erf(x);
        let hi = erf(x + gap);
        prop_assert!(lo.abs() <= 1.0);
        prop_assert!(hi > lo, "erf must increase: erf({x}) = {lo}, erf({}) = {hi}", x + gap);
    }
}

// ── Polynomials & interpolation ──────────────────────────────────────

proptest! {
    /// Horner agrees with the naive power sum.
    #[test]
    fn horner_matches_naive(
        coeffs in prop::collection::vec(-10.0f64..10.0, 1..8),
        x in -3.0f64..3.0,
    ) {
        let naive: f64 = coeffs.iter().enumerate()
            .map(|(i, c)| c * x.powi(i as i32))
            .sum();
        let fast = horner(&coeffs, x);
        let scale = 1.0 + naive.abs();
        prop_assert!((fast - naive).abs() < 1e-10 * scale,
            "horner = {fast}, naive = {naive}");
    }

    /// A cubic through 4 nodes is reproduced exactly between them.
    #[test]
    fn newton_interp_exact_on_cubic(
        c0 in -5.0f64..5.0,
        c1 in -5.0f64..5.0,
        c2 in -5.0f64..5.0,
        c3 in -5.0f64..5.0,
        x in -1.0f64..1.0,
    ) {
        let f = |t: f64| c0 + c1 * t + c2 * t * t + c3 * t * t * t;
        let xs = [-1.5, -0.5, 0.5, 1.5];
        let ys: Vec<f64> = xs.iter().map(|&t| f(t)).collect();
        let coeffs = divided_differences(&xs, &ys);
        let got = newton_eval(&coeffs, &xs, x);
        let expected = f(x);
        prop_assert!((got - expected).abs() < 1e-9 * (1.0 + expected.abs()),
            "interp({x}) = {got}, expected {expected}");
    }
}
