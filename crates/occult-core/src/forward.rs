//! Closed-form Fresnel diffraction of canonical apertures.
//!
//! These are the validation targets for the inversion: an opaque
//! ringlet, a transparent gap, straightedges, slits and a square wave,
//! all expressed through the Fresnel integrals with edge arguments
//! (edge - rho) / F. The diffracted amplitude of a transparent block
//! [a, b] is
//!
//!   T_hat(rho) = (1-i)/2 [ (C(beta) - C(alpha)) + i (S(beta) - S(alpha)) ]
//!
//! with alpha = (a - rho)/F, beta = (b - rho)/F; everything else is
//! complements and sums of that block.

use num_complex::Complex64;
use occult_math::fresnel::{fresnel_cos, fresnel_sin};
use occult_types::error::{OccultError, OccultResult};

fn check_edges(a: f64, b: f64, fresnel_scale: f64) -> OccultResult<()> {
    if !(fresnel_scale.is_finite() && fresnel_scale > 0.0) {
        return Err(OccultError::Domain(format!(
            "Fresnel scale must be positive, got {fresnel_scale}"
        )));
    }
    if !(a.is_finite() && b.is_finite()) || a >= b {
        return Err(OccultError::Domain(format!(
            "Aperture edges must satisfy a < b, got [{a}, {b}]"
        )));
    }
    Ok(())
}

/// Diffracted amplitude of a transparent block [a, b] in an opaque
/// screen.
fn block(rho: f64, a: f64, b: f64, fresnel_scale: f64) -> Complex64 {
    let alpha = (a - rho) / fresnel_scale;
    let beta = (b - rho) / fresnel_scale;
    let re = fresnel_cos(beta) - fresnel_cos(alpha);
    let im = fresnel_sin(beta) - fresnel_sin(alpha);
    Complex64::new(0.5, -0.5) * Complex64::new(re, im)
}

/// Opaque ringlet spanning [a, b]: free space minus the block.
pub fn ringlet(rho: f64, a: f64, b: f64, fresnel_scale: f64) -> OccultResult<Complex64> {
    check_edges(a, b, fresnel_scale)?;
    Ok(Complex64::new(1.0, 0.0) - block(rho, a, b, fresnel_scale))
}

/// Transparent gap spanning [a, b] in an otherwise opaque ring.
pub fn gap(rho: f64, a: f64, b: f64, fresnel_scale: f64) -> OccultResult<Complex64> {
    check_edges(a, b, fresnel_scale)?;
    Ok(block(rho, a, b, fresnel_scale))
}

/// Straightedge transparent on the inner side (rho < edge).
pub fn left_straightedge(rho: f64, edge: f64, fresnel_scale: f64) -> OccultResult<Complex64> {
    if !(fresnel_scale.is_finite() && fresnel_scale > 0.0) {
        return Err(OccultError::Domain(format!(
            "Fresnel scale must be positive, got {fresnel_scale}"
        )));
    }
    let alpha = (edge - rho) / fresnel_scale;
    let re = fresnel_cos(alpha) + 0.5;
    let im = fresnel_sin(alpha) + 0.5;
    Ok(Complex64::new(0.5, -0.5) * Complex64::new(re, im))
}

/// Straightedge transparent on the outer side (rho > edge).
pub fn right_straightedge(rho: f64, edge: f64, fresnel_scale: f64) -> OccultResult<Complex64> {
    if !(fresnel_scale.is_finite() && fresnel_scale > 0.0) {
        return Err(OccultError::Domain(format!(
            "Fresnel scale must be positive, got {fresnel_scale}"
        )));
    }
    let alpha = (edge - rho) / fresnel_scale;
    let re = 0.5 - fresnel_cos(alpha);
    let im = 0.5 - fresnel_sin(alpha);
    Ok(Complex64::new(0.5, -0.5) * Complex64::new(re, im))
}

/// Single slit, synonym for a transparent gap.
pub fn single_slit(rho: f64, a: f64, b: f64, fresnel_scale: f64) -> OccultResult<Complex64> {
    gap(rho, a, b, fresnel_scale)
}

/// Two transparent slits in an opaque screen. The slits must not
/// overlap.
pub fn double_slit(
    rho: f64,
    a1: f64,
    b1: f64,
    a2: f64,
    b2: f64,
    fresnel_scale: f64,
) -> OccultResult<Complex64> {
    check_edges(a1, b1, fresnel_scale)?;
    check_edges(a2, b2, fresnel_scale)?;
    if b1 > a2 && b2 > a1 {
        return Err(OccultError::Domain(format!(
            "Slits [{a1}, {b1}] and [{a2}, {b2}] overlap"
        )));
    }
    Ok(block(rho, a1, b1, fresnel_scale) + block(rho, a2, b2, fresnel_scale))
}

/// Square wave of `n_waves` transparent wells of width `well` starting
/// at `x0`, alternating with opaque strips of the same width.
pub fn square_wave(
    rho: f64,
    x0: f64,
    well: f64,
    n_waves: usize,
    fresnel_scale: f64,
) -> OccultResult<Complex64> {
    if !(well.is_finite() && well > 0.0) {
        return Err(OccultError::Domain(format!(
            "Square-wave well width must be positive, got {well}"
        )));
    }
    if n_waves == 0 {
        return Err(OccultError::Domain(
            "Square wave needs at least one well".into(),
        ));
    }
    check_edges(x0, x0 + well, fresnel_scale)?;

    let mut sum = Complex64::new(0.0, 0.0);
    for k in 0..n_waves {
        let a = x0 + 2.0 * k as f64 * well;
        sum += block(rho, a, a + well, fresnel_scale);
    }
    Ok(sum)
}
