// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Window-Width Planner
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-sample window widths and the index spans they cover.
//!
//! The kernel half-width follows W = 2 F^2 / res, with an optional
//! finite-oscillator-stability correction: with
//! b = omega^2 sigma^2 W / (2 rho_dot) the effective resolution becomes
//! res = (2 F^2 / W) (b^2 / 2) / (e^-b + b - 1), and the width is
//! recovered by inverting y -> y/(e^-y + y - 1) through the principal
//! Lambert W branch.

use occult_math::lambertw::resolution_inverse;
use occult_types::config::ReconstructionOptions;
use occult_types::error::{OccultError, OccultResult};
use occult_types::state::CalibratedProfile;

/// Window half-width (km) for the requested resolution without the
/// b-factor correction.
pub fn window_width(res: f64, fresnel_scale: f64) -> f64 {
    2.0 * fresnel_scale * fresnel_scale / res
}

/// Window half-width (km) under the b-factor correction.
///
/// `alpha_b = omega^2 sigma^2 / (2 |rho_dot|)` couples the oscillator
/// stability to the radial sweep rate; the width solves
/// `res = F^2 alpha_b^2 W / (e^(-alpha_b W) + alpha_b W - 1)`.
pub fn window_width_bfac(
    res: f64,
    fresnel_scale: f64,
    rho_dot: f64,
    sigma: f64,
    omega: f64,
) -> OccultResult<f64> {
    if rho_dot == 0.0 || !rho_dot.is_finite() {
        return Err(OccultError::Domain(format!(
            "b-factor needs a finite nonzero radial velocity, got {rho_dot}"
        )));
    }
    let alpha_b = omega * omega * sigma * sigma / (2.0 * rho_dot.abs());
    let y = res / (alpha_b * fresnel_scale * fresnel_scale);
    let x: f64 = resolution_inverse(y);
    if x.is_nan() {
        return Err(OccultError::Domain(format!(
            "Normalized resolution {y} is outside the invertible band (must exceed 1)"
        )));
    }
    Ok((x / alpha_b).abs())
}

/// Index spans derived from the widths: which samples are reconstructed
/// and how far each window reaches.
#[derive(Debug, Clone)]
pub struct InversionPlan {
    /// First reconstructed index into the profile.
    pub first: usize,
    /// Last reconstructed index (inclusive).
    pub last: usize,
    /// Window width (km) per reconstructed sample.
    pub widths: Vec<f64>,
    /// Points on each side of the center, n = floor(W / (2 drho)).
    pub halfwidths: Vec<usize>,
}

impl InversionPlan {
    /// Resolve the target range, compute per-sample widths and verify
    /// every span lies inside the data.
    pub fn build(
        profile: &CalibratedProfile,
        options: &ReconstructionOptions,
    ) -> OccultResult<Self> {
        options.validate()?;

        let n = profile.len();
        let dr = profile.dr();
        if options.res_km < 2.0 * dr {
            return Err(OccultError::Domain(format!(
                "Resolution {} km undercuts the Nyquist bound {} km",
                options.res_km,
                2.0 * dr
            )));
        }

        let (first, last) = match options.range_km {
            None => (0, n - 1),
            Some([lo, hi]) => {
                let first = profile.rho.iter().position(|&r| r >= lo);
                let last = profile.rho.iter().rposition(|&r| r <= hi);
                match (first, last) {
                    (Some(f), Some(l)) if f <= l => (f, l),
                    _ => {
                        return Err(OccultError::Domain(format!(
                            "Requested range [{lo}, {hi}] km does not intersect the data span [{}, {}] km",
                            profile.rho[0],
                            profile.rho[n - 1]
                        )));
                    }
                }
            }
        };

        let count = last - first + 1;
        let mut widths = Vec::with_capacity(count);
        let mut halfwidths = Vec::with_capacity(count);

        for i in first..=last {
            let f = profile.fresnel_scale[i];
            let w = if options.use_bfac {
                let rho_dot = profile.rho_dot.as_ref().ok_or_else(|| {
                    OccultError::Domain(
                        "use_bfac requires the profile to carry rho_dot".into(),
                    )
                })?;
                window_width_bfac(
                    options.res_km,
                    f,
                    rho_dot[i],
                    options.sigma,
                    options.omega,
                )?
            } else {
                window_width(options.res_km, f)
            };
            let halfwidth = (0.5 * w / dr).floor() as usize;

            if i < halfwidth || i + halfwidth > n - 1 {
                return Err(OccultError::Range {
                    index: i,
                    halfwidth,
                    size: n,
                });
            }

            widths.push(w);
            halfwidths.push(halfwidth);
        }

        Ok(InversionPlan {
            first,
            last,
            widths,
            halfwidths,
        })
    }

    /// Number of reconstructed samples.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Largest half-span in the plan; bounds the scratch working set.
    pub fn max_halfwidth(&self) -> usize {
        self.halfwidths.iter().copied().max().unwrap_or(0)
    }
}
