//! Deployment configuration for a monitoring run.
//!
//! All tunables live in a single immutable [`MonitorConfig`] built once at
//! startup and handed to every component constructor. Nothing in the
//! system reads configuration from globals.

use std::time::Duration;

use crate::error::ConfigError;
use crate::types::MachineId;

/// Which maintenance ticket backend to wire into the alert path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// The CMMS-facing backend used in deployments.
    Cmms,
    /// Deterministic local stand-in for tests and offline runs.
    Local,
}

/// Immutable configuration for the whole monitoring fleet.
///
/// Defaults mirror a 2 kHz accelerometer feed on a rotating asset:
/// 512-sample windows, a 10-800 Hz analysis band, and a rolling history
/// of 500 observations per machine.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Vibration sensor sample rate (Hz).
    pub sample_rate_hz: f64,
    /// Samples per acquisition window.
    pub window_size: usize,
    /// Bandpass lower cutoff (Hz).
    pub bandpass_low_hz: f64,
    /// Bandpass upper cutoff (Hz).
    pub bandpass_high_hz: f64,
    /// FFT length for the magnitude spectrum (windows are zero-padded or
    /// truncated to this length).
    pub fft_size: usize,
    /// Z-score magnitude at or above which an anomaly alert triggers.
    pub anomaly_z_threshold: f64,
    /// RUL at or below which a wear-out alert triggers.
    pub rul_warning: f64,
    /// Calibrated health-index baseline mean for anomaly scoring.
    pub baseline_mean: f64,
    /// Calibrated health-index baseline standard deviation.
    pub baseline_std: f64,
    /// Health assumed for a machine with no recorded history.
    pub initial_health: f64,
    /// Health lost per cycle in the linear degradation model.
    pub degradation_rate: f64,
    /// Maximum observations retained per machine.
    pub history_capacity: usize,
    /// Machines monitored by this deployment.
    pub machines: Vec<MachineId>,
    /// Observation cycles each worker runs before finishing.
    pub cycles_per_run: u32,
    /// Pause between cycles, simulating the acquisition cadence.
    pub cycle_delay: Duration,
    /// Ticket backend selection.
    pub sink: SinkKind,
    /// Server label attached to ticket payloads.
    pub cmms_server_label: String,
    /// Tool name attached to ticket payloads.
    pub cmms_tool_name: String,
    /// Baseline casing temperature for the simulated sensor (degrees C).
    pub temp_baseline_c: f64,
    /// Machine whose simulated signal degrades over the run, if any.
    pub degrading_machine: Option<MachineId>,
    /// Seed for the simulated sensor noise.
    pub rng_seed: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 2000.0,
            window_size: 512,
            bandpass_low_hz: 10.0,
            bandpass_high_hz: 800.0,
            fft_size: 512,
            anomaly_z_threshold: 3.0,
            rul_warning: 50.0,
            baseline_mean: 0.1,
            baseline_std: 0.05,
            initial_health: 1.0,
            degradation_rate: 0.0008,
            history_capacity: 500,
            machines: vec![
                MachineId::new("EQP-001"),
                MachineId::new("EQP-002"),
                MachineId::new("EQP-003"),
            ],
            cycles_per_run: 200,
            cycle_delay: Duration::from_millis(100),
            sink: SinkKind::Cmms,
            cmms_server_label: "maintenance_cmms".to_string(),
            cmms_tool_name: "create_maintenance_ticket".to_string(),
            temp_baseline_c: 55.0,
            degrading_machine: None,
            rng_seed: 42,
        }
    }
}

impl MonitorConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Nyquist frequency implied by the sample rate.
    #[must_use]
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    /// Validate internal consistency.
    ///
    /// Called by the builder; also usable directly on a hand-assembled
    /// config (e.g. in tests that tweak a field).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_hz <= 0.0 {
            return Err(ConfigError::invalid_value(
                "sample_rate_hz",
                "must be positive",
            ));
        }
        if self.window_size == 0 {
            return Err(ConfigError::invalid_value(
                "window_size",
                "must be non-zero",
            ));
        }
        if self.fft_size == 0 {
            return Err(ConfigError::invalid_value("fft_size", "must be non-zero"));
        }
        let nyquist = self.nyquist_hz();
        if self.bandpass_low_hz <= 0.0
            || self.bandpass_low_hz >= self.bandpass_high_hz
            || self.bandpass_high_hz >= nyquist
        {
            return Err(ConfigError::InvalidBand {
                low_hz: self.bandpass_low_hz,
                high_hz: self.bandpass_high_hz,
                nyquist_hz: nyquist,
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "history_capacity",
                "must be non-zero",
            ));
        }
        if self.initial_health <= 0.0 {
            return Err(ConfigError::invalid_value(
                "initial_health",
                "must be positive",
            ));
        }
        if self.machines.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        Ok(())
    }
}

/// Builder for [`MonitorConfig`].
#[derive(Debug, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Set the sensor sample rate in Hz.
    #[must_use]
    pub fn sample_rate_hz(mut self, hz: f64) -> Self {
        self.config.sample_rate_hz = hz;
        self
    }

    /// Set the acquisition window length in samples.
    #[must_use]
    pub fn window_size(mut self, samples: usize) -> Self {
        self.config.window_size = samples;
        self
    }

    /// Set the bandpass cutoffs in Hz.
    #[must_use]
    pub fn bandpass_hz(mut self, low: f64, high: f64) -> Self {
        self.config.bandpass_low_hz = low;
        self.config.bandpass_high_hz = high;
        self
    }

    /// Set the FFT length used for the magnitude spectrum.
    #[must_use]
    pub fn fft_size(mut self, size: usize) -> Self {
        self.config.fft_size = size;
        self
    }

    /// Set the anomaly z-score trigger threshold.
    #[must_use]
    pub fn anomaly_z_threshold(mut self, threshold: f64) -> Self {
        self.config.anomaly_z_threshold = threshold;
        self
    }

    /// Set the RUL warning threshold.
    #[must_use]
    pub fn rul_warning(mut self, rul: f64) -> Self {
        self.config.rul_warning = rul;
        self
    }

    /// Set the anomaly baseline calibration.
    #[must_use]
    pub fn baseline(mut self, mean: f64, std: f64) -> Self {
        self.config.baseline_mean = mean;
        self.config.baseline_std = std;
        self
    }

    /// Set the degradation model parameters.
    #[must_use]
    pub fn degradation_model(mut self, initial_health: f64, rate_per_cycle: f64) -> Self {
        self.config.initial_health = initial_health;
        self.config.degradation_rate = rate_per_cycle;
        self
    }

    /// Set the per-machine history capacity.
    #[must_use]
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Replace the machine roster.
    #[must_use]
    pub fn machines<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.machines = ids.into_iter().map(MachineId::new).collect();
        self
    }

    /// Set how many cycles each worker runs.
    #[must_use]
    pub fn cycles_per_run(mut self, cycles: u32) -> Self {
        self.config.cycles_per_run = cycles;
        self
    }

    /// Set the pause between cycles.
    #[must_use]
    pub fn cycle_delay(mut self, delay: Duration) -> Self {
        self.config.cycle_delay = delay;
        self
    }

    /// Select the maintenance ticket backend.
    #[must_use]
    pub fn sink(mut self, sink: SinkKind) -> Self {
        self.config.sink = sink;
        self
    }

    /// Mark one machine as degrading in the simulated feed.
    #[must_use]
    pub fn degrading_machine(mut self, id: impl Into<String>) -> Self {
        self.config.degrading_machine = Some(MachineId::new(id));
        self
    }

    /// Set the simulated sensor RNG seed.
    #[must_use]
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = seed;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<MonitorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
