//! Error types for the rotorwatch system.
//!
//! Each subsystem has its own [`thiserror`] enum; crates higher in the
//! stack convert them with `#[from]` into their own error types rather
//! than re-wrapping by hand.

use thiserror::Error;

/// Errors raised while validating or constructing configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// A numeric parameter is outside its valid range.
    #[error("Invalid value for {parameter}: {message}")]
    InvalidValue {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The bandpass cutoffs do not fit the configured sample rate.
    #[error("Invalid bandpass [{low_hz}, {high_hz}] Hz for Nyquist {nyquist_hz} Hz")]
    InvalidBand {
        /// Lower cutoff in Hz.
        low_hz: f64,
        /// Upper cutoff in Hz.
        high_hz: f64,
        /// Nyquist frequency implied by the sample rate.
        nyquist_hz: f64,
    },

    /// The machine roster is empty.
    #[error("Machine roster is empty")]
    EmptyRoster,
}

impl ConfigError {
    /// Creates a new invalid-value error.
    #[must_use]
    pub fn invalid_value(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter,
            message: message.into(),
        }
    }
}

/// Errors raised by vibration signal processing.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SignalError {
    /// The sample window contains no samples.
    #[error("Empty sample window")]
    EmptyWindow,

    /// The window is shorter than the processing stage requires.
    #[error("Insufficient samples: need at least {required}, got {available}")]
    InsufficientSamples {
        /// Minimum required samples.
        required: usize,
        /// Samples actually present.
        available: usize,
    },

    /// The window's sample rate disagrees with the extractor's design rate.
    #[error("Sample rate mismatch: extractor designed for {expected_hz} Hz, window captured at {actual_hz} Hz")]
    SampleRateMismatch {
        /// Rate the filter bank was designed for.
        expected_hz: f64,
        /// Rate the window was captured at.
        actual_hz: f64,
    },
}

impl SignalError {
    /// Returns `true` if the pipeline can simply skip the cycle and retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::EmptyWindow | Self::InsufficientSamples { .. } => true,
            Self::SampleRateMismatch { .. } => false,
        }
    }
}
