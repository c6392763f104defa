//! Mathematical primitives for SCPN Occultation Core.

pub mod bessel;
pub mod erf;
pub mod fft;
pub mod fresnel;
pub mod interp;
pub mod lambertw;
pub mod poly;
