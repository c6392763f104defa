//! Polynomial evaluation and Legendre polynomial tables.

use num_traits::Float;

/// Evaluate a polynomial with ascending coefficients by Horner's scheme.
/// An empty coefficient slice evaluates to zero.
pub fn horner<T: Float>(coeffs: &[T], x: T) -> T {
    let mut acc = T::zero();
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// Coefficients of the derivative polynomial, by coefficient shift.
pub fn poly_derivative<T: Float>(coeffs: &[T]) -> Vec<T> {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &c)| c * T::from(i).unwrap_or_else(T::nan))
        .collect()
}

/// Legendre polynomials P_0(x) .. P_n(x) by the three-term recurrence
/// (n+1) P_{n+1} = (2n+1) x P_n - n P_{n-1}.
pub fn legendre_table(x: f64, n: usize) -> Vec<f64> {
    let mut p = Vec::with_capacity(n + 1);
    p.push(1.0);
    if n == 0 {
        return p;
    }
    p.push(x);
    for k in 1..n {
        let kf = k as f64;
        let next = ((2.0 * kf + 1.0) * x * p[k] - kf * p[k - 1]) / (kf + 1.0);
        p.push(next);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horner_matches_naive() {
        let coeffs = [2.0, -3.0, 0.5, 1.25];
        for x in [-2.0, -0.3, 0.0, 1.0, 3.7] {
            let naive: f64 = coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| c * x.powi(i as i32))
                .sum();
            let fast = horner(&coeffs, x);
            assert!(
                (fast - naive).abs() < 1e-12,
                "horner({x}) = {fast}, naive = {naive}"
            );
        }
    }

    #[test]
    fn test_horner_empty_is_zero() {
        assert_eq!(horner::<f64>(&[], 3.0), 0.0);
    }

    #[test]
    fn test_poly_derivative_shift() {
        // d/dx (1 + 2x + 3x^2 + 4x^3) = 2 + 6x + 12x^2
        let d = poly_derivative(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d, vec![2.0, 6.0, 12.0]);
    }

    #[test]
    fn test_legendre_low_orders() {
        let x = 0.4;
        let p = legendre_table(x, 4);
        assert!((p[0] - 1.0).abs() < 1e-15);
        assert!((p[1] - x).abs() < 1e-15);
        assert!((p[2] - 0.5 * (3.0 * x * x - 1.0)).abs() < 1e-14);
        assert!((p[3] - 0.5 * (5.0 * x * x * x - 3.0 * x)).abs() < 1e-14);
        let p4 = (35.0 * x.powi(4) - 30.0 * x * x + 3.0) / 8.0;
        assert!((p[4] - p4).abs() < 1e-14, "P4 = {}, expected {p4}", p[4]);
    }

    #[test]
    fn test_legendre_endpoint_values() {
        // P_n(1) = 1, P_n(-1) = (-1)^n
        let at_one = legendre_table(1.0, 8);
        for (n, &v) in at_one.iter().enumerate() {
            assert!((v - 1.0).abs() < 1e-12, "P_{n}(1) = {v}");
        }
        let at_minus_one = legendre_table(-1.0, 8);
        for (n, &v) in at_minus_one.iter().enumerate() {
            let expected = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert!((v - expected).abs() < 1e-12, "P_{n}(-1) = {v}");
        }
    }
}
