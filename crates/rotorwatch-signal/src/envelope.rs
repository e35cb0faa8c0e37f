//! Amplitude envelope via the analytic signal.
//!
//! The analytic signal is computed in the frequency domain: forward FFT,
//! zero the negative-frequency half while doubling the positive half
//! (DC and Nyquist untouched), inverse FFT. The envelope is the
//! magnitude of the result. This matches the usual quadrature
//! demodulation used for bearing-fault envelope analysis.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Compute the amplitude envelope of a real signal.
///
/// Returns a vector the same length as the input; an empty input yields
/// an empty envelope. The envelope is exact away from the window edges;
/// the implicit periodic extension of the FFT distorts the first and
/// last few samples.
#[must_use]
pub fn analytic_envelope(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    // Analytic-signal spectrum: keep DC (and Nyquist for even n) as-is,
    // double the positive frequencies, zero the negative ones.
    let nyquist = n / 2;
    for (i, bin) in buffer.iter_mut().enumerate().skip(1) {
        if n % 2 == 0 && i == nyquist {
            continue;
        }
        if i < (n + 1) / 2 {
            *bin *= 2.0;
        } else {
            *bin = Complex64::new(0.0, 0.0);
        }
    }

    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    // rustfft leaves the inverse unnormalized.
    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.norm() * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn envelope_of_pure_tone_is_its_amplitude() {
        let n = 1024;
        let amplitude = 0.8;
        let signal: Vec<f64> = (0..n)
            .map(|i| amplitude * (2.0 * PI * 50.0 * i as f64 / 2000.0).sin())
            .collect();

        let envelope = analytic_envelope(&signal);
        assert_eq!(envelope.len(), n);

        // Check away from the window edges.
        for &e in &envelope[n / 4..3 * n / 4] {
            assert!(
                (e - amplitude).abs() < 0.05,
                "envelope should track the tone amplitude: {e}"
            );
        }
    }

    #[test]
    fn envelope_tracks_amplitude_modulation() {
        let n = 2048;
        let fs = 2000.0;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / fs;
                // 200 Hz carrier, 5 Hz modulation between 0.5 and 1.5.
                (1.0 + 0.5 * (2.0 * PI * 5.0 * t).sin()) * (2.0 * PI * 200.0 * t).sin()
            })
            .collect();

        let envelope = analytic_envelope(&signal);

        let center = &envelope[n / 4..3 * n / 4];
        let max = center.iter().cloned().fold(f64::MIN, f64::max);
        let min = center.iter().cloned().fold(f64::MAX, f64::min);
        assert!(max > 1.3, "modulation peak should be visible: {max}");
        assert!(min < 0.7, "modulation trough should be visible: {min}");
    }

    #[test]
    fn envelope_of_zeros_is_zero() {
        let envelope = analytic_envelope(&[0.0; 128]);
        assert!(envelope.iter().all(|&e| e.abs() < 1e-12));
    }

    #[test]
    fn empty_signal_yields_empty_envelope() {
        assert!(analytic_envelope(&[]).is_empty());
    }

    #[test]
    fn odd_length_is_handled() {
        let signal: Vec<f64> = (0..257)
            .map(|i| (2.0 * PI * 50.0 * i as f64 / 2000.0).sin())
            .collect();
        let envelope = analytic_envelope(&signal);
        assert_eq!(envelope.len(), 257);
        for &e in &envelope[64..192] {
            assert!((e - 1.0).abs() < 0.1);
        }
    }
}
