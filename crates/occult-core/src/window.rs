// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Window Library
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Tapering windows with compact support [-W/2, W/2].
//!
//! Every member is even, non-negative, 1 at the origin and 0 outside
//! its support. The Kaiser-Bessel family trades main-lobe width against
//! sidelobe level through alpha; the modified (MD) variants subtract
//! the pedestal so the taper reaches zero at the support edge.
//!
//! The normalized equivalent width W * int(w^2) / (int w)^2 calibrates
//! a window's effective resolution. It is known in closed form or from
//! tabulation for the fixed members and integrated numerically for free
//! alpha.

use occult_math::bessel::besseli0;
use occult_types::config::WindowKind;
use std::f64::consts::PI;

// ── Normalized equivalent widths of the fixed members ────────────────

pub const NORMEQ_RECT: f64 = 1.0;
pub const NORMEQ_COSS: f64 = 1.5;
pub const NORMEQ_KB20: f64 = 1.49634231;
pub const NORMEQ_KB25: f64 = 1.65191895;
pub const NORMEQ_KB35: f64 = 1.92844639;
pub const NORMEQ_KBMD20: f64 = 1.52048174;
pub const NORMEQ_KBMD25: f64 = 1.65994218;
pub const NORMEQ_KBMD35: f64 = 1.93160561;

/// Grid points per unit support used when integrating norm_eq for free
/// alpha.
const NORMEQ_GRID_POINTS: usize = 4001;

// ── Member evaluation ────────────────────────────────────────────────

/// Rectangular window.
pub fn rect(x: f64, w: f64) -> f64 {
    if x.abs() < 0.5 * w {
        1.0
    } else {
        0.0
    }
}

/// Squared cosine window, cos^2(pi x / W).
pub fn coss(x: f64, w: f64) -> f64 {
    if x.abs() < 0.5 * w {
        let c = (PI * x / w).cos();
        c * c
    } else {
        0.0
    }
}

/// Kaiser-Bessel window with shape parameter alpha. alpha = 0 reduces
/// to the rectangular window.
pub fn kb(x: f64, w: f64, alpha: f64) -> f64 {
    let abs_x = x.abs();
    if abs_x >= 0.5 * w {
        return 0.0;
    }
    if alpha == 0.0 {
        return 1.0;
    }
    let arg = 2.0 * abs_x / w;
    let arg = (1.0 - arg * arg).sqrt();
    let alpha_pi = alpha * PI;
    besseli0(alpha_pi * arg) / besseli0(alpha_pi)
}

/// Modified Kaiser-Bessel window: the I0 pedestal is removed so the
/// taper hits zero at the support edge. Requires alpha > 0.
pub fn kbmd(x: f64, w: f64, alpha: f64) -> f64 {
    let abs_x = x.abs();
    if abs_x >= 0.5 * w {
        return 0.0;
    }
    let arg = 2.0 * abs_x / w;
    let arg = (1.0 - arg * arg).sqrt();
    let alpha_pi = alpha * PI;
    (besseli0(alpha_pi * arg) - 1.0) / (besseli0(alpha_pi) - 1.0)
}

/// Evaluate any window member at offset x from the center.
pub fn evaluate(kind: WindowKind, x: f64, w: f64) -> f64 {
    match kind {
        WindowKind::Rect => rect(x, w),
        WindowKind::CosSquared => coss(x, w),
        WindowKind::Kb20 => kb(x, w, 2.0),
        WindowKind::Kb25 => kb(x, w, 2.5),
        WindowKind::Kb35 => kb(x, w, 3.5),
        WindowKind::Kbmd20 => kbmd(x, w, 2.0),
        WindowKind::Kbmd25 => kbmd(x, w, 2.5),
        WindowKind::Kbmd35 => kbmd(x, w, 3.5),
        WindowKind::Kb { alpha } => kb(x, w, alpha),
        WindowKind::Kbmd { alpha } => kbmd(x, w, alpha),
    }
}

// ── Equivalent widths ────────────────────────────────────────────────

/// Normalized equivalent width of a member: closed form or tabulated
/// for the fixed members, numeric integration for free alpha.
pub fn norm_eq(kind: WindowKind) -> f64 {
    match kind {
        WindowKind::Rect => NORMEQ_RECT,
        WindowKind::CosSquared => NORMEQ_COSS,
        WindowKind::Kb20 => NORMEQ_KB20,
        WindowKind::Kb25 => NORMEQ_KB25,
        WindowKind::Kb35 => NORMEQ_KB35,
        WindowKind::Kbmd20 => NORMEQ_KBMD20,
        WindowKind::Kbmd25 => NORMEQ_KBMD25,
        WindowKind::Kbmd35 => NORMEQ_KBMD35,
        WindowKind::Kb { .. } | WindowKind::Kbmd { .. } => {
            let w = 1.0;
            let dx = w / (NORMEQ_GRID_POINTS as f64 - 1.0);
            norm_eq_numeric(kind, w, dx)
        }
    }
}

/// Normalized equivalent width from samples on a grid of spacing dx:
/// W * sum(w^2) / (dx * sum(w)^2).
pub fn norm_eq_numeric(kind: WindowKind, w: f64, dx: f64) -> f64 {
    let nw = (0.5 * w / dx).floor() as isize;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for j in -nw..=nw {
        let v = evaluate(kind, j as f64 * dx, w);
        sum += v;
        sum_sq += v * v;
    }
    w * sum_sq / (dx * sum * sum)
}

// ── Sampled kernels ──────────────────────────────────────────────────

/// Sample a window of width `w` on an odd-length symmetric grid of
/// spacing `dx` with `halfwidth` points on each side of the center.
pub fn sample(kind: WindowKind, w: f64, dx: f64, halfwidth: usize) -> Vec<f64> {
    let n = 2 * halfwidth + 1;
    let mut out = Vec::with_capacity(n);
    for j in 0..n {
        let x = (j as isize - halfwidth as isize) as f64 * dx;
        out.push(evaluate(kind, x, w));
    }
    out
}
