// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Speed of light (km/s).
pub const SPEED_OF_LIGHT_KM_S: f64 = 299792.458;

/// Reciprocal of Euler's number, 1/e. Branch point of the Lambert W
/// function sits at -1/e.
pub const RCPR_EULER_E: f64 = 0.36787944117144233;

/// sqrt(2), modulus of the free-space Fresnel integral in units of the
/// Fresnel scale.
pub const SQRT_2: f64 = 1.4142135623730951;

/// DSN S-band downlink frequency (Hz), used in synthetic fixtures.
pub const S_BAND_FREQUENCY_HZ: f64 = 2.298e9;

/// DSN X-band downlink frequency (Hz), used in synthetic fixtures.
pub const X_BAND_FREQUENCY_HZ: f64 = 8.425e9;

/// DSN Ka-band downlink frequency (Hz), used in synthetic fixtures.
pub const KA_BAND_FREQUENCY_HZ: f64 = 32.028e9;
