// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{OccultError, OccultResult};
use serde::{Deserialize, Serialize};

/// Tapering window applied to the convolution span.
///
/// The Kaiser-Bessel family takes the shape parameter alpha; the modified
/// (MD) variants subtract the edge pedestal so the window falls to zero at
/// the support boundary. Fixed-alpha variants exist so their equivalent
/// widths are compile-time constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Rect,
    CosSquared,
    Kb20,
    Kb25,
    Kb35,
    Kbmd20,
    Kbmd25,
    Kbmd35,
    Kb { alpha: f64 },
    Kbmd { alpha: f64 },
}

/// Phase-kernel approximation used by the transform driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Quadratic phase in (rho - rho0)/F. No azimuthal dependence.
    Fresnel,
    /// Quadratic phase evaluated through a single FFT pass. Requires a
    /// uniform radial grid.
    Fft,
    /// Polynomial phase from a Legendre expansion of the given order (2-8).
    Legendre { order: usize },
    /// Full spherical phase with a per-point stationary-azimuth solve.
    Newton,
    /// Newton with a user-supplied polynomial added to the phase.
    PerturbedNewton,
    /// Newton on an eccentric ring described by (ecc, peri).
    EllipticNewton,
}

/// Everything the inversion needs besides the data itself.
/// Maps 1:1 to the JSON job files used by the processing scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructionOptions {
    /// Requested radial resolution (km). Bounded below by twice the
    /// sample spacing.
    pub res_km: f64,
    pub window: WindowKind,
    pub strategy: Strategy,
    /// Divide each output sample by the coherent free-space response of
    /// its window.
    pub normalize: bool,
    /// Widen windows for finite oscillator stability (Allen deviation).
    pub use_bfac: bool,
    /// Allen deviation of the reference oscillator. Only read when
    /// `use_bfac` is set.
    pub sigma: f64,
    /// Angular frequency of the carrier (rad/s). Only read when
    /// `use_bfac` is set.
    pub omega: f64,
    /// Closed radial interval to reconstruct, or `None` for the whole
    /// profile.
    pub range_km: Option<[f64; 2]>,
    /// Coefficients of an additive phase polynomial in (rho - rho0)/D,
    /// degrees 1 through 5. All zero disables.
    pub perturbation: [f64; 5],
    /// Ring orbit eccentricity for the elliptic strategy.
    pub ecc: f64,
    /// Ring pericenter angle (rad) for the elliptic strategy.
    pub peri: f64,
    /// Stationary-phase interpolation order: 0 (exact), 2, 3 or 4.
    pub interp_order: usize,
    /// After reconstruction, re-convolve the result to produce a
    /// diffraction-remodeled amplitude as a self-check.
    pub run_forward: bool,
}

impl Default for ReconstructionOptions {
    fn default() -> Self {
        ReconstructionOptions {
            res_km: 1.0,
            window: WindowKind::Kb25,
            strategy: Strategy::Fresnel,
            normalize: true,
            use_bfac: false,
            sigma: 2.0e-13,
            omega: 0.0,
            range_km: None,
            perturbation: [0.0; 5],
            ecc: 0.0,
            peri: 0.0,
            interp_order: 0,
            run_forward: false,
        }
    }
}

impl ReconstructionOptions {
    /// Load from a JSON job file.
    pub fn from_file(path: &str) -> OccultResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&contents)?;
        Ok(options)
    }

    /// Check every field that can be rejected without looking at the data.
    /// Grid-dependent checks (Nyquist bound, span coverage) live in the
    /// planner.
    pub fn validate(&self) -> OccultResult<()> {
        if !self.res_km.is_finite() || self.res_km <= 0.0 {
            return Err(OccultError::Domain(format!(
                "Requested resolution must be positive, got {}",
                self.res_km
            )));
        }

        match self.interp_order {
            0 | 2 | 3 | 4 => {}
            other => {
                return Err(OccultError::InvalidOption(format!(
                    "interp_order must be 0, 2, 3 or 4, got {other}"
                )));
            }
        }

        if let Strategy::Legendre { order } = self.strategy {
            if !(2..=8).contains(&order) {
                return Err(OccultError::InvalidOption(format!(
                    "Legendre order must lie in 2..=8, got {order}"
                )));
            }
        }

        match self.window {
            WindowKind::Kb { alpha } => {
                if !alpha.is_finite() || alpha < 0.0 {
                    return Err(OccultError::Domain(format!(
                        "Kaiser-Bessel alpha must be >= 0, got {alpha}"
                    )));
                }
            }
            WindowKind::Kbmd { alpha } => {
                if !alpha.is_finite() || alpha <= 0.0 {
                    return Err(OccultError::Domain(format!(
                        "Modified Kaiser-Bessel alpha must be > 0, got {alpha}"
                    )));
                }
            }
            _ => {}
        }

        if self.use_bfac {
            if !self.sigma.is_finite() || self.sigma <= 0.0 {
                return Err(OccultError::Domain(format!(
                    "Allen deviation must be positive when use_bfac is set, got {}",
                    self.sigma
                )));
            }
            if !self.omega.is_finite() || self.omega <= 0.0 {
                return Err(OccultError::Domain(format!(
                    "Angular frequency must be positive when use_bfac is set, got {}",
                    self.omega
                )));
            }
        }

        if let Some([lo, hi]) = self.range_km {
            if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
                return Err(OccultError::Domain(format!(
                    "Radial range must satisfy lo < hi, got [{lo}, {hi}]"
                )));
            }
        }

        if !(0.0..1.0).contains(&self.ecc) {
            return Err(OccultError::Domain(format!(
                "Eccentricity must lie in [0, 1), got {}",
                self.ecc
            )));
        }

        if self.perturbation.iter().any(|p| !p.is_finite()) {
            return Err(OccultError::Domain(
                "Perturbation coefficients must be finite".into(),
            ));
        }

        Ok(())
    }

    /// True when (ecc, peri) describe a non-circular ring.
    pub fn is_eccentric(&self) -> bool {
        self.ecc != 0.0 || self.peri != 0.0
    }

    /// True when the additive phase polynomial is active.
    pub fn is_perturbed(&self) -> bool {
        self.perturbation.iter().any(|&p| p != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        let options = ReconstructionOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.window, WindowKind::Kb25);
        assert_eq!(options.strategy, Strategy::Fresnel);
        assert!(options.normalize);
        assert!(!options.use_bfac);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let options = ReconstructionOptions {
            strategy: Strategy::Legendre { order: 4 },
            window: WindowKind::Kbmd { alpha: 2.2 },
            range_km: Some([87410.0, 87610.0]),
            perturbation: [0.0, 1.0e-9, 0.0, 0.0, 0.0],
            ..ReconstructionOptions::default()
        };
        let json = serde_json::to_string_pretty(&options).unwrap();
        let back: ReconstructionOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.strategy, Strategy::Legendre { order: 4 });
        assert_eq!(back.window, WindowKind::Kbmd { alpha: 2.2 });
        assert_eq!(back.range_km, Some([87410.0, 87610.0]));
        assert!(back.is_perturbed());
    }

    #[test]
    fn test_from_file() {
        let options = ReconstructionOptions {
            res_km: 0.75,
            ..ReconstructionOptions::default()
        };
        let path = std::env::temp_dir().join("occult_options_test.json");
        std::fs::write(&path, serde_json::to_string(&options).unwrap()).unwrap();
        let loaded = ReconstructionOptions::from_file(path.to_str().unwrap()).unwrap();
        assert!((loaded.res_km - 0.75).abs() < 1e-12);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejects_nonpositive_resolution() {
        let options = ReconstructionOptions {
            res_km: -1.0,
            ..ReconstructionOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(OccultError::Domain(_))
        ));
    }

    #[test]
    fn test_rejects_bad_interp_order() {
        let options = ReconstructionOptions {
            interp_order: 1,
            ..ReconstructionOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(OccultError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_rejects_legendre_order_out_of_band() {
        for order in [0, 1, 9, 20] {
            let options = ReconstructionOptions {
                strategy: Strategy::Legendre { order },
                ..ReconstructionOptions::default()
            };
            assert!(
                options.validate().is_err(),
                "Legendre order {order} should be rejected"
            );
        }
    }

    #[test]
    fn test_bfac_requires_sigma_and_omega() {
        let options = ReconstructionOptions {
            use_bfac: true,
            sigma: 2.0e-13,
            omega: 0.0,
            ..ReconstructionOptions::default()
        };
        assert!(options.validate().is_err(), "omega = 0 must be rejected");

        let options = ReconstructionOptions {
            use_bfac: true,
            sigma: 2.0e-13,
            omega: 2.0 * std::f64::consts::PI * 8.425e9,
            ..ReconstructionOptions::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let options = ReconstructionOptions {
            range_km: Some([9.0e4, 8.0e4]),
            ..ReconstructionOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
