//! Fresnel phase kernel and the stationary-azimuth solver.
//!
//! The spherical geometry enters through two auxiliary quantities,
//!
//!   xi  = (cos B / D) (rho cos phi - rho0 cos phi0)
//!   eta = (rho^2 + rho0^2 - 2 rho rho0 cos(phi - phi0)) / D^2
//!
//! giving psi = kD (sqrt(1 + eta - 2 xi) + xi - 1). The oscillatory
//! integral over the ring is dominated by the azimuth where
//! d(psi)/d(phi) vanishes; a Newton iteration from the data azimuth
//! finds it in a handful of steps. An eccentric ring adds the
//! chain-rule term d(psi)/d(rho) * d(rho)/d(phi) to the first
//! derivative; a quadratic kernel in (rho - rho0)/F drops the azimuth
//! entirely.
//!
//! # References
//!
//! - Marouf, Tyler & Rosen (1986). "Profiling Saturn's rings by radio
//!   occultation." *Icarus* 68.

use occult_types::error::{OccultError, OccultResult};
use std::f64::consts::PI;

/// Newton budget for the stationary-azimuth search.
const MAX_STATIONARY_ITERS: usize = 20;

/// Convergence scale: |dpsi/dphi| below this multiple of machine
/// epsilon times kD counts as stationary.
const STATIONARY_EPS_FACTOR: f64 = 16.0;

/// Spherical phase psi(rho, rho0, phi, phi0, B, D), premultiplied by kD.
#[allow(clippy::too_many_arguments)]
pub fn psi(kd: f64, r: f64, r0: f64, phi: f64, phi0: f64, b: f64, d: f64) -> f64 {
    let xi = (b.cos() / d) * (r * phi.cos() - r0 * phi0.cos());
    let eta = (r0 * r0 + r * r - 2.0 * r * r0 * (phi - phi0).cos()) / (d * d);
    kd * ((1.0 + eta - 2.0 * xi).sqrt() + xi - 1.0)
}

/// First partial of psi with respect to phi.
#[allow(clippy::too_many_arguments)]
pub fn dpsi_dphi(kd: f64, r: f64, r0: f64, phi: f64, phi0: f64, b: f64, d: f64) -> f64 {
    let cos_b_by_d = b.cos() / d;
    let xi = cos_b_by_d * (r * phi.cos() - r0 * phi0.cos());
    let eta = (r0 * r0 + r * r - 2.0 * r * r0 * (phi - phi0).cos()) / (d * d);
    let psi0 = (1.0 + eta - 2.0 * xi).sqrt();

    let dxi = -cos_b_by_d * r * phi.sin();
    let deta = 2.0 * r * r0 * (phi - phi0).sin() / (d * d);

    kd * ((deta - 2.0 * dxi) * (0.5 / psi0) + dxi)
}

/// Second partial of psi with respect to phi.
#[allow(clippy::too_many_arguments)]
pub fn d2psi_dphi2(kd: f64, r: f64, r0: f64, phi: f64, phi0: f64, b: f64, d: f64) -> f64 {
    let cos_b_by_d = b.cos() / d;
    let xi = cos_b_by_d * (r * phi.cos() - r0 * phi0.cos());
    let eta = (r0 * r0 + r * r - 2.0 * r * r0 * (phi - phi0).cos()) / (d * d);
    let psi0 = (1.0 + eta - 2.0 * xi).sqrt();

    let dxi = -cos_b_by_d * r * phi.sin();
    let deta = 2.0 * r * r0 * (phi - phi0).sin() / (d * d);
    let dxi2 = -cos_b_by_d * r * phi.cos();
    let deta2 = 2.0 * r * r0 * (phi - phi0).cos() / (d * d);

    let a = (-0.25 / (psi0 * psi0 * psi0)) * (deta - 2.0 * dxi) * (deta - 2.0 * dxi);
    let b2 = (0.5 / psi0) * (deta2 - 2.0 * dxi2) + dxi2;
    kd * (a + b2)
}

/// First phi-derivative on an eccentric ring: the circular part plus
/// d(psi)/d(rho) carried along the orbit through
/// d(rho)/d(phi) = rho e sin(phi - peri) / (1 + e cos(phi - peri)).
#[allow(clippy::too_many_arguments)]
pub fn dpsi_dphi_ellipse(
    kd: f64,
    r: f64,
    r0: f64,
    phi: f64,
    phi0: f64,
    b: f64,
    d: f64,
    ecc: f64,
    peri: f64,
) -> f64 {
    let cos_b_by_d = b.cos() / d;
    let xi = cos_b_by_d * (r * phi.cos() - r0 * phi0.cos());
    let eta = (r0 * r0 + r * r - 2.0 * r * r0 * (phi - phi0).cos()) / (d * d);
    let psi0 = (1.0 + eta - 2.0 * xi).sqrt();

    let dxi_phi = -cos_b_by_d * r * phi.sin();
    let deta_phi = 2.0 * r * r0 * (phi - phi0).sin() / (d * d);
    let dxi_rho = cos_b_by_d * phi.cos();
    let deta_rho = 2.0 * (r - r0 * (phi - phi0).cos()) / (d * d);

    let dpsi_phi = kd * ((deta_phi - 2.0 * dxi_phi) * (0.5 / psi0) + dxi_phi);
    let dpsi_rho = kd * ((deta_rho - 2.0 * dxi_rho) * (0.5 / psi0) + dxi_rho);

    let drho_dphi = r * ecc * (phi - peri).sin() / (1.0 + ecc * (phi - peri).cos());
    dpsi_phi + dpsi_rho * drho_dphi
}

/// Quadratic phase (pi/2) ((rho - rho0)/F)^2.
pub fn psi_quadratic(r: f64, r0: f64, fresnel_scale: f64) -> f64 {
    let t = (r - r0) / fresnel_scale;
    0.5 * PI * t * t
}

/// Additive phase polynomial in (rho - rho0)/D, degrees 1 through 5,
/// premultiplied by kD.
pub fn psi_perturbation(kd: f64, r: f64, r0: f64, d: f64, coeffs: &[f64; 5]) -> f64 {
    let w = (r - r0) / d;
    let mut acc = 0.0;
    for &c in coeffs.iter().rev() {
        acc = (acc + c) * w;
    }
    kd * acc
}

/// Newton iteration for the stationary azimuth of the spherical kernel,
/// warm-started from `phi_guess`.
#[allow(clippy::too_many_arguments)]
pub fn stationary_phi(
    kd: f64,
    r: f64,
    r0: f64,
    phi_guess: f64,
    phi0: f64,
    b: f64,
    d: f64,
) -> OccultResult<f64> {
    let tol = STATIONARY_EPS_FACTOR * f64::EPSILON * kd.abs();
    let mut phi = phi_guess;
    let mut gradient = dpsi_dphi(kd, r, r0, phi, phi0, b, d);
    for _ in 0..MAX_STATIONARY_ITERS {
        if gradient.abs() < tol {
            return Ok(phi);
        }
        let curvature = d2psi_dphi2(kd, r, r0, phi, phi0, b, d);
        if curvature == 0.0 || !curvature.is_finite() {
            break;
        }
        phi -= gradient / curvature;
        gradient = dpsi_dphi(kd, r, r0, phi, phi0, b, d);
    }
    if gradient.abs() < tol {
        return Ok(phi);
    }
    Err(OccultError::NonConvergence {
        iterations: MAX_STATIONARY_ITERS,
        message: format!(
            "stationary azimuth at rho0 = {r0} km, rho = {r} km: |dpsi/dphi| = {}",
            gradient.abs()
        ),
    })
}

/// Stationary azimuth on an eccentric ring. The elliptic first
/// derivative is paired with the spherical curvature, which stays an
/// excellent Newton preconditioner for small eccentricities.
#[allow(clippy::too_many_arguments)]
pub fn stationary_phi_ellipse(
    kd: f64,
    r: f64,
    r0: f64,
    phi_guess: f64,
    phi0: f64,
    b: f64,
    d: f64,
    ecc: f64,
    peri: f64,
) -> OccultResult<f64> {
    let tol = STATIONARY_EPS_FACTOR * f64::EPSILON * kd.abs();
    let mut phi = phi_guess;
    let mut gradient = dpsi_dphi_ellipse(kd, r, r0, phi, phi0, b, d, ecc, peri);
    for _ in 0..MAX_STATIONARY_ITERS {
        if gradient.abs() < tol {
            return Ok(phi);
        }
        let curvature = d2psi_dphi2(kd, r, r0, phi, phi0, b, d);
        if curvature == 0.0 || !curvature.is_finite() {
            break;
        }
        phi -= gradient / curvature;
        gradient = dpsi_dphi_ellipse(kd, r, r0, phi, phi0, b, d, ecc, peri);
    }
    if gradient.abs() < tol {
        return Ok(phi);
    }
    Err(OccultError::NonConvergence {
        iterations: MAX_STATIONARY_ITERS,
        message: format!(
            "stationary azimuth (ecc {ecc}) at rho0 = {r0} km, rho = {r} km: |dpsi/dphi| = {}",
            gradient.abs()
        ),
    })
}

/// Fresnel scale F = sqrt(lambda D (1 - cos^2 B sin^2 phi) / (2 sin^2 B)).
pub fn fresnel_scale(lambda_km: f64, d: f64, phi: f64, b: f64) -> f64 {
    let cb = b.cos();
    let sb = b.sin();
    let sp = phi.sin();
    (0.5 * lambda_km * d * (1.0 - cb * cb * sp * sp) / (sb * sb)).sqrt()
}

/// Wavenumber k = 2 pi / lambda.
pub fn wavenumber(lambda_km: f64) -> f64 {
    2.0 * PI / lambda_km
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cassini-like geometry shared by the kernel tests.
    const B0: f64 = -0.41;
    const D0: f64 = 2.7e5;
    const PHI0: f64 = 4.36;
    const LAMBDA: f64 = 3.558e-5; // X band, km

    fn kd0() -> f64 {
        wavenumber(LAMBDA) * D0
    }

    #[test]
    fn test_psi_vanishes_at_center() {
        let r0 = 87500.0;
        assert_eq!(psi(kd0(), r0, r0, PHI0, PHI0, B0, D0), 0.0);
    }

    #[test]
    fn test_dpsi_vanishes_at_center() {
        let r0 = 87500.0;
        let g = dpsi_dphi(kd0(), r0, r0, PHI0, PHI0, B0, D0);
        assert!(
            g.abs() < 1e-6 * kd0().abs() * f64::EPSILON.sqrt(),
            "dpsi/dphi at the center = {g}"
        );
    }

    #[test]
    fn test_dpsi_matches_finite_difference() {
        let kd = kd0();
        let (r, r0) = (87510.0, 87500.0);
        let h = 1e-5;
        for phi in [PHI0 - 0.02, PHI0, PHI0 + 0.015] {
            let numeric =
                (psi(kd, r, r0, phi + h, PHI0, B0, D0) - psi(kd, r, r0, phi - h, PHI0, B0, D0))
                    / (2.0 * h);
            let analytic = dpsi_dphi(kd, r, r0, phi, PHI0, B0, D0);
            let scale = analytic.abs().max(kd * 1e-12);
            assert!(
                (numeric - analytic).abs() / scale < 1e-4,
                "dpsi/dphi at {phi}: analytic {analytic}, numeric {numeric}"
            );
        }
    }

    #[test]
    fn test_d2psi_matches_finite_difference() {
        let kd = kd0();
        let (r, r0) = (87512.0, 87500.0);
        let h = 1e-5;
        for phi in [PHI0 - 0.01, PHI0 + 0.02] {
            let numeric = (dpsi_dphi(kd, r, r0, phi + h, PHI0, B0, D0)
                - dpsi_dphi(kd, r, r0, phi - h, PHI0, B0, D0))
                / (2.0 * h);
            let analytic = d2psi_dphi2(kd, r, r0, phi, PHI0, B0, D0);
            assert!(
                (numeric - analytic).abs() / analytic.abs().max(1.0) < 1e-4,
                "d2psi/dphi2 at {phi}: analytic {analytic}, numeric {numeric}"
            );
        }
    }

    #[test]
    fn test_ellipse_reduces_to_circle() {
        let kd = kd0();
        let (r, r0) = (87505.0, 87500.0);
        let circular = dpsi_dphi(kd, r, r0, PHI0 + 0.01, PHI0, B0, D0);
        let elliptic = dpsi_dphi_ellipse(kd, r, r0, PHI0 + 0.01, PHI0, B0, D0, 0.0, 0.0);
        assert!(
            (circular - elliptic).abs() < 1e-9 * circular.abs().max(1.0),
            "zero eccentricity must reduce to the circular derivative"
        );
    }

    #[test]
    fn test_stationary_solver_converges() {
        let kd = kd0();
        let r0 = 87500.0;
        for dr in [-18.0, -5.0, 0.0, 3.0, 12.0] {
            let r = r0 + dr;
            let phi = stationary_phi(kd, r0, r, PHI0, PHI0, B0, D0).unwrap();
            let g = dpsi_dphi(kd, r0, r, phi, PHI0, B0, D0);
            assert!(
                g.abs() < STATIONARY_EPS_FACTOR * f64::EPSILON * kd,
                "gradient after convergence at dr = {dr}: {g}"
            );
            assert!(
                (phi - PHI0).abs() < 0.01,
                "stationary azimuth drifted far from the guess: {phi}"
            );
        }
    }

    #[test]
    fn test_stationary_psi_matches_quadratic() {
        // At the stationary azimuth the spherical phase collapses to
        // the quadratic form in (rho - rho0)/F for small separations.
        let kd = kd0();
        let f = fresnel_scale(LAMBDA, D0, PHI0, B0);
        let r0 = 87500.0;
        for dr in [-4.0, -1.0, 2.0, 5.0] {
            let r = r0 + dr;
            let phi = stationary_phi(kd, r0, r, PHI0, PHI0, B0, D0).unwrap();
            let exact = psi(kd, r0, r, phi, PHI0, B0, D0);
            let quad = psi_quadratic(r, r0, f);
            assert!(
                (exact - quad).abs() / quad.max(1e-12) < 1e-3,
                "psi* = {exact} vs quadratic {quad} at dr = {dr}"
            );
        }
    }

    #[test]
    fn test_perturbation_polynomial() {
        let kd = 2.0;
        let (r, r0, d) = (110.0, 100.0, 1000.0);
        // w = 0.01; psi = kD (3 w + 5 w^3)
        let coeffs = [3.0, 0.0, 5.0, 0.0, 0.0];
        let expected = kd * (3.0 * 0.01 + 5.0 * 0.01f64.powi(3));
        let got = psi_perturbation(kd, r, r0, d, &coeffs);
        assert!(
            (got - expected).abs() < 1e-15,
            "perturbation = {got}, expected {expected}"
        );
    }

    #[test]
    fn test_fresnel_scale_reference() {
        // F^2 = lambda D (1 - cos^2 B sin^2 phi) / (2 sin^2 B)
        let f = fresnel_scale(LAMBDA, D0, PHI0, B0);
        let cb = B0.cos();
        let sb = B0.sin();
        let sp = PHI0.sin();
        let expected =
            (0.5 * LAMBDA * D0 * (1.0 - cb * cb * sp * sp) / (sb * sb)).sqrt();
        assert!((f - expected).abs() < 1e-12);
        assert!(f > 0.0 && f < 100.0, "Fresnel scale {f} km is implausible");
    }
}
