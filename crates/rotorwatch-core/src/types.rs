//! Domain types shared across the monitoring pipeline.
//!
//! Every payload that crosses a component boundary is a fixed, typed
//! record; downstream stages never consume loosely-typed maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of leading magnitude-spectrum bins carried in a [`FeatureSet`].
pub const SPECTRUM_SAMPLE_BINS: usize = 16;

/// Identifier of a monitored machine (e.g. `EQP-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(String);

impl MachineId {
    /// Create a machine id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MachineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One acquisition window of raw vibration samples.
///
/// Owned exclusively by the cycle that acquired it until the feature
/// extractor consumes it.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    /// Time-ordered vibration samples.
    pub samples: Vec<f64>,
    /// Sample rate the window was captured at (Hz).
    pub sample_rate_hz: f64,
    /// Casing temperature at capture time, if the sensor provides one.
    pub temperature_c: Option<f64>,
    /// Capture timestamp; non-decreasing across windows from one source.
    pub captured_at: DateTime<Utc>,
}

impl SampleWindow {
    /// Create a new window.
    #[must_use]
    pub fn new(
        samples: Vec<f64>,
        sample_rate_hz: f64,
        temperature_c: Option<f64>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            samples,
            sample_rate_hz,
            temperature_c,
            captured_at,
        }
    }

    /// Number of samples in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Window duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate_hz > 0.0 {
            self.samples.len() as f64 / self.sample_rate_hz
        } else {
            0.0
        }
    }
}

/// Vibration health features extracted from one window.
///
/// Skewness and kurtosis use population moments; kurtosis is the excess
/// convention (a Gaussian scores 0). The anomaly baseline is calibrated
/// against these conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSet {
    /// RMS of the band-limited signal.
    pub rms: f64,
    /// Mean of the amplitude envelope.
    pub envelope_mean: f64,
    /// Standard deviation of the amplitude envelope (epsilon-floored).
    pub envelope_std: f64,
    /// Population excess kurtosis of the band-limited signal.
    pub kurtosis: f64,
    /// Population skewness of the band-limited signal.
    pub skewness: f64,
    /// Casing temperature carried through from the window (0 when absent).
    pub temperature_c: f64,
    /// Leading bins of the magnitude spectrum.
    pub spectrum_sample: [f64; SPECTRUM_SAMPLE_BINS],
    /// Scalar health index in (0, 1]; lower is less healthy.
    pub health_index: f64,
}

/// The durable record stored per machine per cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Health index for the cycle.
    pub health: f64,
    /// Anomaly score for the cycle.
    pub anomaly_score: f64,
    /// RUL estimate for the cycle.
    pub rul: f64,
    /// Capture timestamp of the source window.
    pub timestamp: DateTime<Utc>,
    /// Feature snapshot the scores were derived from.
    pub features: FeatureSet,
}

/// Identifier returned by a maintenance ticket sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Create a ticket id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured payload handed to the maintenance sink when an alert fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPayload {
    /// CMMS server label from configuration.
    pub server_label: String,
    /// CMMS tool name from configuration.
    pub tool: String,
    /// Machine the ticket is for.
    pub machine_id: MachineId,
    /// Health index at trigger time.
    pub health: f64,
    /// Anomaly score at trigger time.
    pub anomaly_score: f64,
    /// RUL estimate at trigger time.
    pub rul: f64,
}

/// A maintenance alert raised by the decider.
///
/// Constructed only when at least one trigger condition holds; never
/// persisted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Unique id for correlating log lines.
    pub id: Uuid,
    /// Machine that triggered.
    pub machine_id: MachineId,
    /// Health index at trigger time.
    pub health: f64,
    /// Anomaly score at trigger time.
    pub anomaly_score: f64,
    /// RUL estimate at trigger time.
    pub rul: f64,
    /// Human-readable trigger conditions, anomaly first when both hold.
    pub trigger_reasons: Vec<String>,
    /// Payload for the maintenance sink.
    pub payload: TicketPayload,
}
