//! Noise floors in the optical-depth domain.
//!
//! The thermal noise level is estimated from first differences of the
//! calibrated amplitude: for white noise riding on a slowly varying
//! signal, var(T_hat[k+1] - T_hat[k]) is twice the per-sample noise
//! variance while the signal contribution stays second order. The
//! deepest measurable optical depth is then mu ln(SNR) at the native
//! spacing, improved by the res / (2 drho) averaging gain of the
//! reconstruction.

use ndarray::Array1;
use num_complex::Complex64;
use occult_types::state::CalibratedProfile;

/// Per-sample noise variance from first differences of the amplitude
/// over [first, last]. Zero when the span is degenerate or noiseless.
pub fn noise_variance(t_hat: &Array1<Complex64>, first: usize, last: usize) -> f64 {
    if last <= first {
        return 0.0;
    }
    let mut acc = 0.0;
    for k in first..last {
        acc += (t_hat[k + 1] - t_hat[k]).norm_sqr();
    }
    acc / (2.0 * (last - first) as f64)
}

/// Optical-depth noise floors over the reconstructed span.
///
/// Returns (raw, at-resolution) thresholds, both clamped to be
/// non-negative and infinite when the span carries no measurable noise.
pub fn tau_thresholds(
    profile: &CalibratedProfile,
    first: usize,
    last: usize,
    res: f64,
) -> (Array1<f64>, Array1<f64>) {
    let count = last - first + 1;
    let variance = noise_variance(&profile.t_hat, first, last);

    let mean_power = profile
        .t_hat
        .iter()
        .skip(first)
        .take(count)
        .map(|z| z.norm_sqr())
        .sum::<f64>()
        / count as f64;

    let snr = if variance > 0.0 {
        mean_power / variance
    } else {
        f64::INFINITY
    };

    let averaging_gain = (res / (2.0 * profile.dr())).ln().max(0.0);

    let mut raw = Array1::zeros(count);
    let mut at_res = Array1::zeros(count);
    for (offset, i) in (first..=last).enumerate() {
        let mu = profile.b[i].abs().sin();
        raw[offset] = (mu * snr.ln()).max(0.0);
        at_res[offset] = (raw[offset] + mu * averaging_gain).max(0.0);
    }
    (raw, at_res)
}
