//! Feature extraction from a raw vibration window.
//!
//! One [`FeatureExtractor`] is built per machine pipeline from the
//! deployment configuration. Extraction runs the classical vibration
//! chain: zero-phase bandpass -> amplitude envelope -> magnitude
//! spectrum -> statistical moments -> scalar health index.

use rotorwatch_core::{FeatureSet, MonitorConfig, SampleWindow, SignalError};
use tracing::debug;

use crate::envelope::analytic_envelope;
use crate::filter::BandpassFilter;
use crate::spectrum::spectrum_sample;
use crate::stats::{excess_kurtosis, mean, population_std, rms, skewness};

/// Epsilon added to the envelope standard deviation so downstream
/// ratios never divide by zero.
const ENVELOPE_STD_EPS: f64 = 1e-6;

/// Windows shorter than this carry too little signal for stable
/// fourth-moment estimates.
const MIN_WINDOW_LEN: usize = 32;

/// Turns a [`SampleWindow`] into a [`FeatureSet`] with a health index.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    bandpass: BandpassFilter,
    sample_rate_hz: f64,
    fft_size: usize,
}

impl FeatureExtractor {
    /// Build an extractor from the deployment configuration.
    ///
    /// The bandpass is designed once here for the configured sample
    /// rate; windows captured at a different rate are rejected by
    /// [`extract`](Self::extract).
    #[must_use]
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            bandpass: BandpassFilter::new(
                config.bandpass_low_hz,
                config.bandpass_high_hz,
                config.sample_rate_hz,
            ),
            sample_rate_hz: config.sample_rate_hz,
            fft_size: config.fft_size,
        }
    }

    /// Extract features and the health index from one window.
    ///
    /// The health index is `1 / (1 + envelope_mean + rms)`: a
    /// monotonically decreasing function of vibration energy, bounded
    /// to `(0, 1]` without signal-specific normalization. Degenerate
    /// (all-zero) windows produce zero features and a health index of
    /// exactly 1.0.
    pub fn extract(&self, window: &SampleWindow) -> Result<FeatureSet, SignalError> {
        if window.is_empty() {
            return Err(SignalError::EmptyWindow);
        }
        if window.len() < MIN_WINDOW_LEN {
            return Err(SignalError::InsufficientSamples {
                required: MIN_WINDOW_LEN,
                available: window.len(),
            });
        }
        if (window.sample_rate_hz - self.sample_rate_hz).abs() > f64::EPSILON {
            return Err(SignalError::SampleRateMismatch {
                expected_hz: self.sample_rate_hz,
                actual_hz: window.sample_rate_hz,
            });
        }

        let filtered = self.bandpass.filtfilt(&window.samples);
        let envelope = analytic_envelope(&filtered);

        let rms_value = rms(&filtered);
        let envelope_mean = mean(&envelope);
        let envelope_std = population_std(&envelope) + ENVELOPE_STD_EPS;

        let health_index = 1.0 / (1.0 + envelope_mean + rms_value);

        let features = FeatureSet {
            rms: rms_value,
            envelope_mean,
            envelope_std,
            kurtosis: excess_kurtosis(&filtered),
            skewness: skewness(&filtered),
            temperature_c: window.temperature_c.unwrap_or(0.0),
            spectrum_sample: spectrum_sample(&filtered, self.fft_size),
            health_index,
        };

        debug!(
            health = features.health_index,
            rms = features.rms,
            envelope_mean = features.envelope_mean,
            "Extracted window features"
        );

        Ok(features)
    }

    /// The bandpass cutoffs this extractor was designed with.
    #[must_use]
    pub fn band(&self) -> (f64, f64) {
        self.bandpass.band()
    }
}
