//! Magnitude spectrum of a sample window.

use num_complex::Complex64;
use rotorwatch_core::SPECTRUM_SAMPLE_BINS;
use rustfft::FftPlanner;

/// Compute the one-sided magnitude spectrum of a real signal.
///
/// The signal is zero-padded or truncated to `fft_size` before the
/// transform; the returned vector holds `fft_size / 2 + 1` magnitudes
/// (DC through Nyquist).
#[must_use]
pub fn magnitude_spectrum(signal: &[f64], fft_size: usize) -> Vec<f64> {
    if fft_size == 0 {
        return Vec::new();
    }

    let mut buffer = vec![Complex64::new(0.0, 0.0); fft_size];
    for (slot, &x) in buffer.iter_mut().zip(signal.iter()) {
        *slot = Complex64::new(x, 0.0);
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    buffer[..fft_size / 2 + 1].iter().map(|c| c.norm()).collect()
}

/// The fixed-width leading slice of the magnitude spectrum carried in a
/// feature set.
///
/// Bins beyond the available spectrum are zero, so the result is always
/// exactly [`SPECTRUM_SAMPLE_BINS`] wide.
#[must_use]
pub fn spectrum_sample(signal: &[f64], fft_size: usize) -> [f64; SPECTRUM_SAMPLE_BINS] {
    let spectrum = magnitude_spectrum(signal, fft_size);
    let mut sample = [0.0; SPECTRUM_SAMPLE_BINS];
    for (slot, &mag) in sample.iter_mut().zip(spectrum.iter()) {
        *slot = mag;
    }
    sample
}
