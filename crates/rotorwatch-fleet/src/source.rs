//! Acquisition sources for the monitoring pipeline.
//!
//! The pipeline consumes windows through the [`WindowSource`] trait; in
//! production that is a hardware DAQ driver, here it is the simulated
//! rotating-machine sensor the system ships with.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rotorwatch_core::{MachineId, MonitorConfig, SampleWindow};

/// Provider of raw vibration windows.
///
/// Implementations must return windows with monotonically
/// non-decreasing capture timestamps across calls.
pub trait WindowSource: Send {
    /// Acquire the next sample window.
    fn acquire(&mut self) -> SampleWindow;
}

/// Rotation fundamental of the simulated machine (Hz).
const BASE_FREQ_HZ: f64 = 50.0;
/// Bearing-band harmonic of the simulated machine (Hz).
const HARMONIC_FREQ_HZ: f64 = 250.0;
/// Amplitude of the rotation fundamental.
const BASE_AMPLITUDE: f64 = 0.8;
/// Amplitude of the harmonic before degradation scaling.
const HARMONIC_AMPLITUDE: f64 = 0.2;
/// Standard deviation of broadband noise before degradation scaling.
const NOISE_STD: f64 = 0.1;
/// Per-cycle growth of the degradation factor.
const DEGRADATION_PER_CYCLE: f64 = 0.002;
/// Per-cycle temperature drift of a degrading machine (degrees C).
const TEMP_DRIFT_PER_CYCLE: f64 = 0.01;
/// Standard deviation of temperature measurement noise (degrees C).
const TEMP_NOISE_STD: f64 = 0.5;

/// Seeded simulation of a rotating machine's vibration sensor.
///
/// Healthy machines emit a steady 50 Hz fundamental with a 250 Hz
/// harmonic and broadband noise. A degrading machine scales the
/// harmonic and noise by `1 + 0.002 * cycle` and drifts warmer, so its
/// health index falls over the run.
pub struct SimulatedSensor {
    machine_id: MachineId,
    sample_rate_hz: f64,
    window_size: usize,
    temp_baseline_c: f64,
    degrading: bool,
    cycle: u64,
    last_capture: DateTime<Utc>,
    rng: StdRng,
    noise: Normal<f64>,
    temp_noise: Normal<f64>,
}

impl SimulatedSensor {
    /// Create a sensor for one machine.
    ///
    /// `seed` should differ per machine so noise streams are
    /// independent; the fleet derives it from the configured seed and
    /// the machine's roster index.
    #[must_use]
    pub fn new(machine_id: MachineId, config: &MonitorConfig, seed: u64) -> Self {
        let degrading = config.degrading_machine.as_ref() == Some(&machine_id);
        Self {
            machine_id,
            sample_rate_hz: config.sample_rate_hz,
            window_size: config.window_size,
            temp_baseline_c: config.temp_baseline_c,
            degrading,
            cycle: 0,
            last_capture: DateTime::<Utc>::MIN_UTC,
            rng: StdRng::seed_from_u64(seed),
            noise: Normal::new(0.0, NOISE_STD).expect("valid noise std"),
            temp_noise: Normal::new(0.0, TEMP_NOISE_STD).expect("valid temp noise std"),
        }
    }

    /// Machine this sensor simulates.
    #[must_use]
    pub fn machine_id(&self) -> &MachineId {
        &self.machine_id
    }

    /// Cycles acquired so far.
    #[must_use]
    pub fn cycles_acquired(&self) -> u64 {
        self.cycle
    }
}

impl WindowSource for SimulatedSensor {
    fn acquire(&mut self) -> SampleWindow {
        self.cycle += 1;

        let degradation_factor = if self.degrading {
            1.0 + DEGRADATION_PER_CYCLE * self.cycle as f64
        } else {
            1.0
        };

        let samples: Vec<f64> = (0..self.window_size)
            .map(|i| {
                let t = i as f64 / self.sample_rate_hz;
                let base = BASE_AMPLITUDE * (2.0 * PI * BASE_FREQ_HZ * t).sin();
                let harmonic = HARMONIC_AMPLITUDE
                    * degradation_factor
                    * (2.0 * PI * HARMONIC_FREQ_HZ * t).sin();
                let noise = degradation_factor * self.noise.sample(&mut self.rng);
                base + harmonic + noise
            })
            .collect();

        let temp_drift = if self.degrading {
            TEMP_DRIFT_PER_CYCLE * self.cycle as f64
        } else {
            0.0
        };
        let temperature =
            self.temp_baseline_c + temp_drift + self.temp_noise.sample(&mut self.rng);

        // Wall clocks can step backwards; captured timestamps must not.
        let capture = Utc::now().max(self.last_capture);
        self.last_capture = capture;

        SampleWindow::new(samples, self.sample_rate_hz, Some(temperature), capture)
    }
}
