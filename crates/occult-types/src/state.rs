// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{OccultError, OccultResult};
use ndarray::Array1;
use num_complex::Complex64;

/// Largest tolerated deviation of a single radial step from the mean
/// step, as a fraction of the mean step.
pub const SPACING_TOLERANCE_FRACTION: f64 = 0.25;

/// Real-valued input samples at either supported precision. The tag is
/// resolved once on entry; everything downstream is f64.
#[derive(Debug, Clone, Copy)]
pub enum RealSamples<'a> {
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl RealSamples<'_> {
    pub fn to_f64(&self) -> Array1<f64> {
        match self {
            RealSamples::F32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            RealSamples::F64(v) => Array1::from_iter(v.iter().copied()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RealSamples::F32(v) => v.len(),
            RealSamples::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Complex input samples at either supported precision.
#[derive(Debug, Clone, Copy)]
pub enum ComplexSamples<'a> {
    F32(&'a [num_complex::Complex32]),
    F64(&'a [Complex64]),
}

impl ComplexSamples<'_> {
    pub fn to_f64(&self) -> Array1<Complex64> {
        match self {
            ComplexSamples::F32(v) => v
                .iter()
                .map(|z| Complex64::new(f64::from(z.re), f64::from(z.im)))
                .collect(),
            ComplexSamples::F64(v) => Array1::from_iter(v.iter().copied()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ComplexSamples::F32(v) => v.len(),
            ComplexSamples::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Calibrated diffraction profile, stored struct-of-arrays: the hot loop
/// of the transform driver reads each field across a contiguous index
/// span. Immutable during inversion.
#[derive(Debug, Clone)]
pub struct CalibratedProfile {
    /// Ring-plane radial intercept (km), strictly increasing.
    pub rho: Array1<f64>,
    /// Calibrated diffracted amplitude (dimensionless).
    pub t_hat: Array1<Complex64>,
    /// Local Fresnel scale (km), > 0.
    pub fresnel_scale: Array1<f64>,
    /// Ring azimuth at intercept (rad).
    pub phi: Array1<f64>,
    /// Wavenumber times spacecraft-ring distance (rad). Kept as a single
    /// product to preserve conditioning.
    pub kd: Array1<f64>,
    /// Ring opening angle (rad), |B| < pi/2.
    pub b: Array1<f64>,
    /// Spacecraft-to-intercept distance (km), > 0.
    pub d: Array1<f64>,
    /// Ring-intercept radial velocity (km/s). Needed only by the
    /// b-factor window widening.
    pub rho_dot: Option<Array1<f64>>,
    dr: f64,
}

impl CalibratedProfile {
    /// Validate and assemble a profile from double-precision arrays.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rho: Array1<f64>,
        t_hat: Array1<Complex64>,
        fresnel_scale: Array1<f64>,
        phi: Array1<f64>,
        kd: Array1<f64>,
        b: Array1<f64>,
        d: Array1<f64>,
        rho_dot: Option<Array1<f64>>,
    ) -> OccultResult<Self> {
        let n = rho.len();
        if n < 2 {
            return Err(OccultError::Domain(format!(
                "Profile needs at least 2 samples, got {n}"
            )));
        }

        let lengths = [
            t_hat.len(),
            fresnel_scale.len(),
            phi.len(),
            kd.len(),
            b.len(),
            d.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(OccultError::Domain(format!(
                "Per-sample arrays disagree in length: rho has {n}, others {lengths:?}"
            )));
        }
        if let Some(ref rd) = rho_dot {
            if rd.len() != n {
                return Err(OccultError::Domain(format!(
                    "rho_dot has {} samples, expected {n}",
                    rd.len()
                )));
            }
            if rd.iter().any(|v| !v.is_finite()) {
                return Err(OccultError::Domain("rho_dot contains non-finite values".into()));
            }
        }

        for (name, arr) in [
            ("rho", &rho),
            ("fresnel_scale", &fresnel_scale),
            ("phi", &phi),
            ("kd", &kd),
            ("b", &b),
            ("d", &d),
        ] {
            if arr.iter().any(|v| !v.is_finite()) {
                return Err(OccultError::Domain(format!(
                    "{name} contains non-finite values"
                )));
            }
        }
        if t_hat.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
            return Err(OccultError::Domain(
                "t_hat contains non-finite values".into(),
            ));
        }

        if fresnel_scale.iter().any(|&f| f <= 0.0) {
            return Err(OccultError::Domain("Fresnel scale must be > 0".into()));
        }
        if d.iter().any(|&v| v <= 0.0) {
            return Err(OccultError::Domain(
                "Spacecraft distance must be > 0".into(),
            ));
        }
        if b.iter().any(|&v| v.abs() >= std::f64::consts::FRAC_PI_2) {
            return Err(OccultError::Domain(
                "Ring opening angle must satisfy |B| < pi/2".into(),
            ));
        }

        // Strictly increasing, effectively uniform radial grid.
        let dr = (rho[n - 1] - rho[0]) / (n as f64 - 1.0);
        if dr <= 0.0 {
            return Err(OccultError::Domain(
                "Radial grid must be strictly increasing".into(),
            ));
        }
        for i in 1..n {
            let step = rho[i] - rho[i - 1];
            if step <= 0.0 {
                return Err(OccultError::Domain(format!(
                    "Radial grid not increasing at index {i}: step {step}"
                )));
            }
            if (step - dr).abs() > SPACING_TOLERANCE_FRACTION * dr {
                return Err(OccultError::Domain(format!(
                    "Radial step at index {i} deviates from mean by more than {:.0}%: {step} vs {dr}",
                    SPACING_TOLERANCE_FRACTION * 100.0
                )));
            }
        }

        Ok(CalibratedProfile {
            rho,
            t_hat,
            fresnel_scale,
            phi,
            kd,
            b,
            d,
            rho_dot,
            dr,
        })
    }

    /// Assemble from tagged-precision sample buffers. Single-precision
    /// inputs are widened to f64 here, once.
    #[allow(clippy::too_many_arguments)]
    pub fn from_samples(
        rho: RealSamples,
        t_hat: ComplexSamples,
        fresnel_scale: RealSamples,
        phi: RealSamples,
        kd: RealSamples,
        b: RealSamples,
        d: RealSamples,
        rho_dot: Option<RealSamples>,
    ) -> OccultResult<Self> {
        Self::new(
            rho.to_f64(),
            t_hat.to_f64(),
            fresnel_scale.to_f64(),
            phi.to_f64(),
            kd.to_f64(),
            b.to_f64(),
            d.to_f64(),
            rho_dot.map(|r| r.to_f64()),
        )
    }

    pub fn len(&self) -> usize {
        self.rho.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rho.is_empty()
    }

    /// Mean radial sample spacing (km).
    pub fn dr(&self) -> f64 {
        self.dr
    }
}

/// Diffraction-corrected output profile over the requested radial range.
#[derive(Debug, Clone)]
pub struct ReconstructedProfile {
    /// Radii of the reconstructed samples (km).
    pub rho: Array1<f64>,
    /// Reconstructed complex transmittance.
    pub t: Array1<Complex64>,
    /// |T|^2.
    pub power: Array1<f64>,
    /// arg T (rad).
    pub phase: Array1<f64>,
    /// Normal optical depth, -sin|B| * ln(power).
    pub tau: Array1<f64>,
    /// Forward-remodeled diffracted amplitude, present when requested.
    pub t_hat_fwd: Option<Array1<Complex64>>,
    /// Optical-depth noise floor at the native sample spacing.
    pub raw_tau_threshold: Array1<f64>,
    /// Optical-depth noise floor at the reconstructed resolution.
    pub tau_threshold: Array1<f64>,
}

/// Bookkeeping returned alongside the profile.
#[derive(Debug, Clone)]
pub struct ReconstructionSummary {
    /// Number of reconstructed samples.
    pub samples: usize,
    /// Largest window half-span in points.
    pub max_halfwidth: usize,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: f64,
}
