//! Anomaly scoring against a calibrated baseline.

use rotorwatch_core::MonitorConfig;

/// Epsilon added to the baseline std so a zero-variance calibration
/// cannot divide by zero.
const BASELINE_STD_EPS: f64 = 1e-6;

/// Scores health-index deviation as a z-score magnitude.
///
/// The baseline mean and standard deviation are fixed per-deployment
/// calibration constants; nothing is re-estimated online. Larger
/// scores are more anomalous and there is no upper bound.
#[derive(Debug, Clone)]
pub struct AnomalyScorer {
    baseline_mean: f64,
    baseline_std: f64,
}

impl AnomalyScorer {
    /// Create a scorer with an explicit baseline.
    #[must_use]
    pub fn new(baseline_mean: f64, baseline_std: f64) -> Self {
        Self {
            baseline_mean,
            baseline_std,
        }
    }

    /// Create a scorer from the deployment configuration.
    #[must_use]
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.baseline_mean, config.baseline_std)
    }

    /// Z-score magnitude of a health index against the baseline.
    #[must_use]
    pub fn score(&self, health_index: f64) -> f64 {
        (health_index - self.baseline_mean).abs() / (self.baseline_std + BASELINE_STD_EPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_at_baseline_mean_is_zero() {
        let scorer = AnomalyScorer::new(0.1, 0.05);
        assert!(scorer.score(0.1).abs() < 1e-9);
    }

    #[test]
    fn known_deviation_scores_two_sigma() {
        let scorer = AnomalyScorer::new(0.1, 0.05);
        assert!((scorer.score(0.2) - 2.0).abs() < 1e-3);
    }

    #[test]
    fn score_is_symmetric() {
        let scorer = AnomalyScorer::new(0.5, 0.1);
        assert!((scorer.score(0.7) - scorer.score(0.3)).abs() < 1e-12);
    }

    #[test]
    fn zero_std_baseline_stays_finite() {
        let scorer = AnomalyScorer::new(0.1, 0.0);
        let score = scorer.score(0.2);
        assert!(score.is_finite());
        assert!(score > 0.0);
    }

    #[test]
    fn from_config_uses_configured_baseline() {
        let config = MonitorConfig::default();
        let scorer = AnomalyScorer::from_config(&config);
        assert!(scorer.score(config.baseline_mean).abs() < 1e-9);
    }
}
