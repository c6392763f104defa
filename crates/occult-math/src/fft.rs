//! 1D FFT wrappers around rustfft.
//!
//! Convention matches numpy:
//! - Forward FFT: unnormalized
//! - Inverse FFT: normalized by 1/n

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward FFT. Matches `numpy.fft.fft()`.
pub fn fft(input: &[Complex64]) -> Vec<Complex64> {
    let mut data = input.to_vec();
    let mut planner = FftPlanner::new();
    let plan = planner.plan_fft_forward(data.len());
    plan.process(&mut data);
    data
}

/// Inverse FFT. Matches `numpy.fft.ifft()`: applies 1/n normalization.
pub fn ifft(input: &[Complex64]) -> Vec<Complex64> {
    let mut data = input.to_vec();
    let n = data.len();
    let mut planner = FftPlanner::new();
    let plan = planner.plan_fft_inverse(n);
    plan.process(&mut data);
    let norm = 1.0 / n as f64;
    for v in &mut data {
        *v *= norm;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_roundtrip() {
        let original: Vec<Complex64> = (0..64)
            .map(|i| Complex64::new(i as f64, (i as f64 * 0.3).sin()))
            .collect();
        let spectrum = fft(&original);
        let recovered = ifft(&spectrum);

        for (i, (a, b)) in original.iter().zip(recovered.iter()).enumerate() {
            assert!(
                (a - b).norm() < 1e-10,
                "FFT roundtrip failed at {i}: {a} vs {b}"
            );
        }
    }

    #[test]
    fn test_fft_dc_component() {
        // Constant input: spectrum concentrates n * value in bin 0.
        let n = 16;
        let val = 3.0;
        let input = vec![Complex64::new(val, 0.0); n];
        let spectrum = fft(&input);

        assert!(
            (spectrum[0].re - n as f64 * val).abs() < 1e-10,
            "DC bin: {}",
            spectrum[0].re
        );
        for (k, v) in spectrum.iter().enumerate().skip(1) {
            assert!(v.norm() < 1e-10, "bin {k} should vanish, got {v}");
        }
    }

    #[test]
    fn test_fft_impulse_is_flat() {
        let n = 32;
        let mut input = vec![Complex64::new(0.0, 0.0); n];
        input[0] = Complex64::new(1.0, 0.0);
        let spectrum = fft(&input);
        for (k, v) in spectrum.iter().enumerate() {
            assert!(
                (v - Complex64::new(1.0, 0.0)).norm() < 1e-12,
                "impulse spectrum bin {k} = {v}"
            );
        }
    }

    #[test]
    fn test_fft_zeros() {
        let input = vec![Complex64::new(0.0, 0.0); 8];
        let spectrum = fft(&input);
        for v in &spectrum {
            assert!(v.norm() < 1e-15, "FFT of zeros should be zero");
        }
    }

    #[test]
    fn test_circular_convolution_theorem() {
        // ifft(fft(a) * fft(b)) equals the circular convolution of a and b.
        let n = 8;
        let a: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let b: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((i as f64 * 0.7).cos(), 0.0))
            .collect();

        let fa = fft(&a);
        let fb = fft(&b);
        let product: Vec<Complex64> = fa.iter().zip(fb.iter()).map(|(x, y)| x * y).collect();
        let fast = ifft(&product);

        for m in 0..n {
            let mut direct = Complex64::new(0.0, 0.0);
            for k in 0..n {
                direct += a[k] * b[(n + m - k) % n];
            }
            assert!(
                (fast[m] - direct).norm() < 1e-10,
                "circular convolution mismatch at {m}: {} vs {direct}",
                fast[m]
            );
        }
    }
}
