//! Vibration signal processing for rotorwatch.
//!
//! Implements the classical signal-to-health chain used by the
//! per-machine monitoring pipeline:
//!
//! 1. **Band limiting** ([`BandpassFilter`]): 4th-order Butterworth
//!    bandpass applied forward and backward for zero phase.
//! 2. **Envelope detection** ([`analytic_envelope`]): amplitude
//!    envelope via the FFT analytic signal.
//! 3. **Spectral features** ([`spectrum_sample`]): fixed-width leading
//!    slice of the one-sided magnitude spectrum.
//! 4. **Statistical moments** ([`stats`]): RMS, population skewness and
//!    excess kurtosis, with deterministic zero fallbacks for degenerate
//!    windows.
//! 5. **Health index** ([`FeatureExtractor`]): `1 / (1 + envelope_mean
//!    + rms)`, bounded to `(0, 1]`.

#![warn(missing_docs)]

pub mod envelope;
pub mod extractor;
pub mod filter;
pub mod spectrum;
pub mod stats;

pub use envelope::analytic_envelope;
pub use extractor::FeatureExtractor;
pub use filter::BandpassFilter;
pub use spectrum::{magnitude_spectrum, spectrum_sample};
