//! Remaining useful life estimation.

use rotorwatch_core::MonitorConfig;

use crate::store::HistorySnapshot;

/// Floor applied to the degradation rate before dividing.
const RATE_EPS: f64 = 1e-6;

/// Linear-degradation inverse RUL model.
///
/// Assumes health decays at a fixed rate per cycle, so cycles remaining
/// equal the latest health divided by the per-cycle decay. This is a
/// placeholder policy, not a forecasting model: it fits no trend and is
/// stateless given the latest health and two calibration constants.
/// Keep the formula intact when swapping in a learned estimator behind
/// the same signature.
#[derive(Debug, Clone)]
pub struct RulEstimator {
    initial_health: f64,
    degradation_rate: f64,
}

impl RulEstimator {
    /// Create an estimator with explicit model constants.
    #[must_use]
    pub fn new(initial_health: f64, degradation_rate: f64) -> Self {
        Self {
            initial_health,
            degradation_rate,
        }
    }

    /// Create an estimator from the deployment configuration.
    #[must_use]
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.initial_health, config.degradation_rate)
    }

    /// Estimate RUL in cycles from a machine's history.
    ///
    /// With no recorded health the machine is assumed brand-new at full
    /// health; otherwise the most recent health value drives the
    /// estimate. Never negative.
    #[must_use]
    pub fn estimate(&self, history: &HistorySnapshot) -> f64 {
        let rate = self.degradation_rate.max(RATE_EPS);
        match history.latest_health() {
            None => self.initial_health / rate,
            Some(health) => (health / rate).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with_health(values: &[f64]) -> HistorySnapshot {
        HistorySnapshot {
            health: values.to_vec(),
            ..HistorySnapshot::default()
        }
    }

    #[test]
    fn empty_history_uses_initial_health() {
        let estimator = RulEstimator::new(1.0, 0.0008);
        let rul = estimator.estimate(&HistorySnapshot::default());
        assert!((rul - 1250.0).abs() < 1e-9);
    }

    #[test]
    fn latest_health_drives_estimate() {
        let estimator = RulEstimator::new(1.0, 0.0008);
        let history = history_with_health(&[0.9, 0.5, 0.0004]);
        assert!((estimator.estimate(&history) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn only_most_recent_health_matters() {
        let estimator = RulEstimator::new(1.0, 0.0008);
        let short = history_with_health(&[0.4]);
        let long = history_with_health(&[0.9, 0.8, 0.7, 0.4]);
        assert!((estimator.estimate(&short) - estimator.estimate(&long)).abs() < 1e-12);
    }

    #[test]
    fn negative_health_clamps_to_zero() {
        let estimator = RulEstimator::new(1.0, 0.0008);
        let history = history_with_health(&[-0.2]);
        assert!(estimator.estimate(&history).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_rate_is_floored() {
        let estimator = RulEstimator::new(1.0, 0.0);
        let rul = estimator.estimate(&HistorySnapshot::default());
        assert!(rul.is_finite());
        assert!((rul - 1.0 / RATE_EPS).abs() < 1e-3);
    }

    #[test]
    fn from_config_matches_defaults() {
        let estimator = RulEstimator::from_config(&MonitorConfig::default());
        let rul = estimator.estimate(&HistorySnapshot::default());
        assert!((rul - 1250.0).abs() < 1e-9);
    }
}
