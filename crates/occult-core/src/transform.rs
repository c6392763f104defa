// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Transform Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The windowed quadrature that undoes the Fresnel convolution.
//!
//! For every target radius the driver assembles the tapering window
//! over the planned span, evaluates the phase kernel under the selected
//! strategy and accumulates
//!
//!   T(rho_i) = (1+i)/(2 F_i) drho sum_j T_hat(rho_j) w_ij e^(-i psi_ij)
//!
//! optionally divided by the coherent free-space response of the same
//! window, N_i = drho |sum_j w_ij e^(i psi_ij)| / (sqrt(2) F_i), which
//! pins free space at exactly unit transmittance. The quadratic
//! strategies (Fresnel, FFT) read the phase from the local Fresnel
//! scale; Legendre reads it from a per-sample coefficient table; the
//! Newton family solves for the stationary azimuth point by point,
//! warm-starting each solve from the previous sample.
//!
//! Output samples are independent, so the strategies without
//! cross-sample state fan the outer loop out with rayon; the Newton
//! family stays sequential to keep its warm starts.

use crate::kernel;
use crate::legendre;
use crate::threshold;
use crate::width::InversionPlan;
use crate::window;
use ndarray::Array1;
use num_complex::Complex64;
use occult_math::fft::{fft, ifft};
use occult_math::interp::{divided_differences, newton_eval};
use occult_types::config::{ReconstructionOptions, Strategy};
use occult_types::error::{OccultError, OccultResult};
use occult_types::state::{
    CalibratedProfile, ReconstructedProfile, ReconstructionSummary,
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// (1+i)/2, the inversion prefactor in complex form.
const INVERSE_PREFACTOR: Complex64 = Complex64::new(0.5, 0.5);

/// (1-i)/2, the forward-model prefactor.
const FORWARD_PREFACTOR: Complex64 = Complex64::new(0.5, -0.5);

/// Modulus of the free-space Fresnel integral in units of F.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Samples between progress callbacks.
const PROGRESS_BLOCK: usize = 64;

/// Relative step tolerance for the FFT fast path, far stricter than the
/// profile's own spacing tolerance.
const FFT_GRID_TOLERANCE: f64 = 1e-9;

type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

enum NewtonKind {
    Spherical,
    Perturbed,
    Elliptic,
}

/// The inversion driver: owns the data, the options and the plan.
pub struct FresnelInverter {
    profile: CalibratedProfile,
    options: ReconstructionOptions,
    plan: InversionPlan,
    progress: Option<Box<ProgressFn>>,
}

impl FresnelInverter {
    /// Validate options against the data and derive the plan.
    pub fn new(
        profile: CalibratedProfile,
        options: ReconstructionOptions,
    ) -> OccultResult<Self> {
        let plan = InversionPlan::build(&profile, &options)?;
        Ok(FresnelInverter {
            profile,
            options,
            plan,
            progress: None,
        })
    }

    /// Install a per-block progress callback, called with
    /// (samples done, samples total).
    pub fn set_progress(&mut self, callback: Box<ProgressFn>) {
        self.progress = Some(callback);
    }

    pub fn plan(&self) -> &InversionPlan {
        &self.plan
    }

    pub fn profile(&self) -> &CalibratedProfile {
        &self.profile
    }

    pub fn options(&self) -> &ReconstructionOptions {
        &self.options
    }

    /// Run the inversion over the planned range.
    pub fn reconstruct(
        &self,
    ) -> OccultResult<(ReconstructedProfile, ReconstructionSummary)> {
        let start = std::time::Instant::now();

        let t = match self.options.strategy {
            Strategy::Fresnel => self.transform_fresnel()?,
            Strategy::Fft => self.transform_fft()?,
            Strategy::Legendre { order } => self.transform_legendre(order)?,
            Strategy::Newton => self.transform_newton(NewtonKind::Spherical)?,
            Strategy::PerturbedNewton => self.transform_newton(NewtonKind::Perturbed)?,
            Strategy::EllipticNewton => self.transform_newton(NewtonKind::Elliptic)?,
        };

        let count = self.plan.len();
        let mut power = try_array(count)?;
        let mut phase = try_array(count)?;
        let mut tau = try_array(count)?;
        for (offset, value) in t.iter().enumerate() {
            let i = self.plan.first + offset;
            let mu = self.profile.b[i].abs().sin();
            let p = value.norm_sqr();
            power[offset] = p;
            phase[offset] = value.im.atan2(value.re);
            tau[offset] = -mu * p.ln();
        }

        let t_hat_fwd = if self.options.run_forward {
            Some(Array1::from_vec(self.forward_remodel(&t)))
        } else {
            None
        };

        let (raw_tau_threshold, tau_threshold) = threshold::tau_thresholds(
            &self.profile,
            self.plan.first,
            self.plan.last,
            self.options.res_km,
        );

        let rho = self
            .profile
            .rho
            .slice(ndarray::s![self.plan.first..=self.plan.last])
            .to_owned();

        let profile = ReconstructedProfile {
            rho,
            t: Array1::from_vec(t),
            power,
            phase,
            tau,
            t_hat_fwd,
            raw_tau_threshold,
            tau_threshold,
        };
        let summary = ReconstructionSummary {
            samples: count,
            max_halfwidth: self.plan.max_halfwidth(),
            solve_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        Ok((profile, summary))
    }

    // ── Shared accumulation ──────────────────────────────────────────

    /// Accumulate one output sample given the phase at each span point.
    /// `psi_of` maps span position m (0..=2 nw) to psi_ij.
    fn accumulate<P: Fn(usize) -> f64>(
        &self,
        i: usize,
        offset: usize,
        wfunc: &[f64],
        psi_of: P,
    ) -> Complex64 {
        let nw = self.plan.halfwidths[offset];
        let dr = self.profile.dr();
        let f = self.profile.fresnel_scale[i];

        let mut sum = Complex64::new(0.0, 0.0);
        let mut wk = Complex64::new(0.0, 0.0);
        for (m, &wv) in wfunc.iter().enumerate() {
            let j = i + m - nw;
            let psi = psi_of(m);
            let ker = Complex64::new(psi.cos(), -psi.sin());
            sum += self.profile.t_hat[j] * wv * ker;
            wk += wv * ker;
        }

        let mut t = INVERSE_PREFACTOR * sum * (dr / f);
        if self.options.normalize {
            t *= SQRT_2 * f / (dr * wk.norm());
        }
        t
    }

    /// Fan the per-sample closure over the planned range with rayon,
    /// reporting progress per block.
    fn collect_targets<F>(&self, per_sample: F) -> OccultResult<Vec<Complex64>>
    where
        F: Fn(usize, usize) -> OccultResult<Complex64> + Send + Sync,
    {
        let count = self.plan.len();
        let done = AtomicUsize::new(0);
        let out: Vec<Complex64> = (0..count)
            .into_par_iter()
            .map(|offset| {
                let value = per_sample(self.plan.first + offset, offset)?;
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % PROGRESS_BLOCK == 0 || finished == count {
                    if let Some(cb) = &self.progress {
                        cb(finished, count);
                    }
                }
                Ok(value)
            })
            .collect::<OccultResult<Vec<_>>>()?;
        Ok(out)
    }

    // ── Quadratic strategy ───────────────────────────────────────────

    fn transform_fresnel(&self) -> OccultResult<Vec<Complex64>> {
        let dr = self.profile.dr();
        self.collect_targets(|i, offset| {
            let nw = self.plan.halfwidths[offset];
            let f = self.profile.fresnel_scale[i];
            let wfunc =
                window::sample(self.options.window, self.plan.widths[offset], dr, nw);
            Ok(self.accumulate(i, offset, &wfunc, |m| {
                let x = (m as isize - nw as isize) as f64 * dr;
                kernel::psi_quadratic(x, 0.0, f)
            }))
        })
    }

    // ── FFT fast path ────────────────────────────────────────────────

    /// The quadratic convolution evaluated as one circular FFT product.
    /// Requires a uniform grid; the kernel is frozen at the center
    /// sample (position-invariant approximation) and the padded edges
    /// are never read back because the plan keeps every span inside the
    /// data.
    fn transform_fft(&self) -> OccultResult<Vec<Complex64>> {
        let n = self.profile.len();
        let dr = self.profile.dr();
        for i in 1..n {
            let step = self.profile.rho[i] - self.profile.rho[i - 1];
            if (step - dr).abs() > FFT_GRID_TOLERANCE * dr {
                return Err(OccultError::InvalidOption(format!(
                    "FFT strategy requires a uniform radial grid; step at index {i} \
                     deviates by {}",
                    (step - dr).abs()
                )));
            }
        }

        let center = (self.plan.first + self.plan.last) / 2;
        let center_offset = center - self.plan.first;
        let nw = self.plan.halfwidths[center_offset];
        let f = self.profile.fresnel_scale[center];
        let wfunc = window::sample(
            self.options.window,
            self.plan.widths[center_offset],
            dr,
            nw,
        );

        let padded = (n + 2 * nw + 1).next_power_of_two();
        let mut data = try_vec::<Complex64>(padded)?;
        for (k, z) in self.profile.t_hat.iter().enumerate() {
            data[k] = *z;
        }

        let mut h = try_vec::<Complex64>(padded)?;
        let mut wk = Complex64::new(0.0, 0.0);
        for (m, &wv) in wfunc.iter().enumerate() {
            let x = (m as isize - nw as isize) as f64 * dr;
            let psi = kernel::psi_quadratic(x, 0.0, f);
            let ker = wv * Complex64::new(psi.cos(), -psi.sin());
            let slot = (padded + m - nw) % padded;
            h[slot] = ker;
            wk += ker;
        }

        let spectrum_data = fft(&data);
        let spectrum_kernel = fft(&h);
        let product: Vec<Complex64> = spectrum_data
            .iter()
            .zip(spectrum_kernel.iter())
            .map(|(a, b)| a * b)
            .collect();
        let convolved = ifft(&product);

        let norm = if self.options.normalize {
            SQRT_2 * f / (dr * wk.norm())
        } else {
            1.0
        };

        let count = self.plan.len();
        let mut out = try_vec::<Complex64>(count)?;
        for (offset, slot) in out.iter_mut().enumerate() {
            let i = self.plan.first + offset;
            *slot = INVERSE_PREFACTOR * convolved[i] * (dr / f) * norm;
        }
        Ok(out)
    }

    // ── Legendre strategy ────────────────────────────────────────────

    fn transform_legendre(&self, order: usize) -> OccultResult<Vec<Complex64>> {
        let dr = self.profile.dr();
        self.collect_targets(|i, offset| {
            let nw = self.plan.halfwidths[offset];
            let d = self.profile.d[i];
            let kd = self.profile.kd[i];
            let coeffs =
                legendre::phase_coefficients(self.profile.b[i], self.profile.phi[i], order);
            let wfunc =
                window::sample(self.options.window, self.plan.widths[offset], dr, nw);
            let rho_i = self.profile.rho[i];
            Ok(self.accumulate(i, offset, &wfunc, |m| {
                let j = i + m - nw;
                // The expansion variable pairs with the target radius.
                let w = (rho_i - self.profile.rho[j]) / d;
                legendre::psi_legendre(&coeffs, kd, w)
            }))
        })
    }

    // ── Newton family ────────────────────────────────────────────────

    /// Stationary phase at (i, j): solve for the azimuth, evaluate psi
    /// there, and add the optional perturbation polynomial.
    fn stationary_psi(
        &self,
        kind: &NewtonKind,
        i: usize,
        j: usize,
        phi_guess: f64,
    ) -> OccultResult<(f64, f64)> {
        let p = &self.profile;
        let (kd, rho_i, rho_j) = (p.kd[i], p.rho[i], p.rho[j]);
        let (b, d, phi_j) = (p.b[i], p.d[i], p.phi[j]);

        let phi_star = match kind {
            NewtonKind::Elliptic => kernel::stationary_phi_ellipse(
                kd,
                rho_i,
                rho_j,
                phi_guess,
                phi_j,
                b,
                d,
                self.options.ecc,
                self.options.peri,
            )?,
            _ => kernel::stationary_phi(kd, rho_i, rho_j, phi_guess, phi_j, b, d)?,
        };

        let mut psi = kernel::psi(kd, rho_i, rho_j, phi_star, phi_j, b, d);
        if matches!(kind, NewtonKind::Perturbed) {
            psi += kernel::psi_perturbation(kd, rho_j, rho_i, d, &self.options.perturbation);
        }
        Ok((psi, phi_star))
    }

    /// Node offsets across [0, 2 nw] for the interpolated solve.
    fn interp_nodes(order: usize, nw: usize) -> Vec<usize> {
        let span = 2 * nw;
        match order {
            2 => vec![0, nw, span],
            3 => vec![0, span / 3, 2 * span / 3, span],
            _ => vec![0, nw / 2, nw, nw + nw / 2, span],
        }
    }

    fn transform_newton(&self, kind: NewtonKind) -> OccultResult<Vec<Complex64>> {
        let count = self.plan.len();
        let dr = self.profile.dr();
        let mut out = try_vec::<Complex64>(count)?;
        let mut psi_span: Vec<f64> = Vec::new();
        let mut phi_cache: Vec<f64> = Vec::new();

        for offset in 0..count {
            let i = self.plan.first + offset;
            let nw = self.plan.halfwidths[offset];
            let len = 2 * nw + 1;

            // Warm starts survive across samples while the span length
            // holds; a width change reseeds from the data azimuths.
            if phi_cache.len() != len {
                phi_cache = (0..len).map(|m| self.profile.phi[i + m - nw]).collect();
            }
            psi_span.resize(len, 0.0);

            let exact = self.options.interp_order == 0 || 2 * nw < 4;
            if exact {
                for m in 0..len {
                    let j = i + m - nw;
                    let (psi, phi_star) = self.stationary_psi(&kind, i, j, phi_cache[m])?;
                    psi_span[m] = psi;
                    phi_cache[m] = phi_star;
                }
            } else {
                let nodes = Self::interp_nodes(self.options.interp_order, nw);
                let mut xs = Vec::with_capacity(nodes.len());
                let mut ys = Vec::with_capacity(nodes.len());
                for &m in &nodes {
                    let j = i + m - nw;
                    let (psi, phi_star) =
                        self.stationary_psi(&kind, i, j, self.profile.phi[j])?;
                    phi_cache[m] = phi_star;
                    xs.push(self.profile.rho[j]);
                    ys.push(psi);
                }
                let fit = divided_differences(&xs, &ys);
                for (m, slot) in psi_span.iter_mut().enumerate() {
                    let j = i + m - nw;
                    *slot = newton_eval(&fit, &xs, self.profile.rho[j]);
                }
            }

            let wfunc =
                window::sample(self.options.window, self.plan.widths[offset], dr, nw);
            out[offset] = self.accumulate(i, offset, &wfunc, |m| psi_span[m]);

            let finished = offset + 1;
            if finished % PROGRESS_BLOCK == 0 || finished == count {
                if let Some(cb) = &self.progress {
                    cb(finished, count);
                }
            }
        }
        Ok(out)
    }

    // ── Forward remodel ──────────────────────────────────────────────

    /// Re-convolve the reconstruction with the conjugate quadratic
    /// kernel. Spans are clamped to the reconstructed range, so edge
    /// samples see a truncated window whose normalization adapts.
    fn forward_remodel(&self, t: &[Complex64]) -> Vec<Complex64> {
        let count = t.len();
        let dr = self.profile.dr();
        let first = self.plan.first;
        let last = self.plan.last;

        (0..count)
            .into_par_iter()
            .map(|offset| {
                let i = first + offset;
                let nw = self.plan.halfwidths[offset];
                let f = self.profile.fresnel_scale[i];
                let w_km = self.plan.widths[offset];

                let mut sum = Complex64::new(0.0, 0.0);
                let mut wk = Complex64::new(0.0, 0.0);
                for m in 0..=(2 * nw) {
                    let j = i + m - nw;
                    if j < first || j > last {
                        continue;
                    }
                    let x = (m as isize - nw as isize) as f64 * dr;
                    let wv = window::evaluate(self.options.window, x, w_km);
                    let psi = kernel::psi_quadratic(x, 0.0, f);
                    let ker = Complex64::new(psi.cos(), psi.sin());
                    sum += t[j - first] * wv * ker;
                    wk += wv * ker;
                }

                let mut fwd = FORWARD_PREFACTOR * sum * (dr / f);
                if self.options.normalize {
                    fwd *= SQRT_2 * f / (dr * wk.norm());
                }
                fwd
            })
            .collect()
    }
}

/// Vec allocation routed through try_reserve so exhaustion surfaces as
/// an error instead of an abort.
fn try_vec<T: Clone + Default>(n: usize) -> OccultResult<Vec<T>> {
    let mut v: Vec<T> = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|e| OccultError::Allocation(format!("buffer of {n} samples: {e}")))?;
    v.resize(n, T::default());
    Ok(v)
}

fn try_array(n: usize) -> OccultResult<Array1<f64>> {
    Ok(Array1::from_vec(try_vec::<f64>(n)?))
}
