//! Legendre polynomial expansion of the Fresnel phase.
//!
//! With x = cos B cos phi0 and w = (rho - rho0)/D the fixed-azimuth
//! phase is the generating function of the Legendre polynomials, giving
//! the series coefficients b_n = (P_n - x P_{n+1})/(n + 2). Eliminating
//! the azimuth at its stationary point subtracts a Cauchy-product
//! correction weighted by L = A / (2 (1 - A)), A = (cos B sin phi0)^2:
//!
//!   c_n = b_n - L sum_{j=0}^{n} P_{j+1} P_{n-j+1}
//!
//! and psi = kD sum_n c_n w^{n+2}. The table is a pure function of
//! (B, D, phi0) and is computed once per output sample.

use occult_math::poly::{horner, legendre_table};

/// Phase-expansion coefficients c_0 .. c_{order-1} for one output
/// sample.
pub fn phase_coefficients(b: f64, phi0: f64, order: usize) -> Vec<f64> {
    let x = b.cos() * phi0.cos();
    let a = b.cos() * phi0.sin();
    let a2 = a * a;
    let l = 0.5 * a2 / (1.0 - a2);

    // P_0 .. P_{order+1}
    let p = legendre_table(x, order + 1);

    let mut coeffs = Vec::with_capacity(order);
    for n in 0..order {
        let b_n = (p[n] - x * p[n + 1]) / (n as f64 + 2.0);
        let mut cauchy = 0.0;
        for j in 0..=n {
            cauchy += p[j + 1] * p[n - j + 1];
        }
        coeffs.push(b_n - l * cauchy);
    }
    coeffs
}

/// Evaluate psi = kD w^2 (c_0 + c_1 w + ...) at w = (rho - rho0)/D.
pub fn psi_legendre(coeffs: &[f64], kd: f64, w: f64) -> f64 {
    kd * w * w * horner(coeffs, w)
}
