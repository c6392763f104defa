// ─────────────────────────────────────────────────────────────────────
// SCPN Occultation Core — Occultation Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fresnel inversion engine for ring occultation profiles.
//!
//! A spacecraft carrier observed through a planetary ring arrives as the
//! convolution of the ring transmittance with a Fresnel kernel whose
//! geometry varies along the profile. This crate undoes that
//! convolution: a windowed, stationary-phase-corrected quadrature per
//! output radius, with selectable phase-kernel approximations ranging
//! from the pure quadratic (and its FFT fast path) through Legendre
//! polynomial expansions to the fully solved spherical kernel.

pub mod forward;
pub mod kernel;
pub mod legendre;
pub mod threshold;
pub mod transform;
pub mod width;
pub mod window;
