//! Statistical moments used as wear indicators.
//!
//! All moments are population moments (divide by `n`, no bias
//! correction). Kurtosis uses the excess convention: a Gaussian signal
//! scores 0, a sine scores -1.5. The anomaly baseline is calibrated
//! against these conventions; changing them requires recalibrating
//! `baseline_mean` / `baseline_std`.

/// Variance floor below which a signal is treated as constant.
const DEGENERATE_EPS: f64 = 1e-12;

/// Root-mean-square of a signal. Zero for an empty signal.
#[must_use]
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
}

/// Arithmetic mean. Zero for an empty signal.
#[must_use]
pub fn mean(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().sum::<f64>() / signal.len() as f64
}

/// Population standard deviation. Zero for an empty signal.
#[must_use]
pub fn population_std(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let m = mean(signal);
    let variance = signal.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / signal.len() as f64;
    variance.sqrt()
}

/// Population skewness `m3 / sigma^3`.
///
/// A constant or empty signal yields 0 rather than a division by zero.
#[must_use]
pub fn skewness(signal: &[f64]) -> f64 {
    standardized_moment(signal, 3).unwrap_or(0.0)
}

/// Population excess kurtosis `m4 / sigma^4 - 3`.
///
/// A constant or empty signal yields 0 rather than a division by zero.
#[must_use]
pub fn excess_kurtosis(signal: &[f64]) -> f64 {
    standardized_moment(signal, 4).map_or(0.0, |m4| m4 - 3.0)
}

/// `mean(((x - mean) / sigma)^order)`, or `None` for a degenerate signal.
fn standardized_moment(signal: &[f64], order: i32) -> Option<f64> {
    if signal.is_empty() {
        return None;
    }
    let m = mean(signal);
    let sigma = population_std(signal);
    if sigma < DEGENERATE_EPS {
        return None;
    }
    let sum: f64 = signal.iter().map(|x| ((x - m) / sigma).powi(order)).sum();
    Some(sum / signal.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * i as f64 / 64.0).sin()).collect()
    }

    #[test]
    fn rms_of_unit_sine() {
        let signal = sine(4096);
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((rms(&signal) - expected).abs() < 1e-3);
    }

    #[test]
    fn rms_of_constant() {
        assert!((rms(&[2.0; 100]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mean_and_std_known_values() {
        let signal = [10.0, 20.0, 30.0];
        assert!((mean(&signal) - 20.0).abs() < 1e-12);
        // Population std of {10, 20, 30} is sqrt(200/3).
        assert!((population_std(&signal) - (200.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sine_skewness_is_zero() {
        assert!(skewness(&sine(4096)).abs() < 1e-6);
    }

    #[test]
    fn sine_excess_kurtosis_is_minus_three_halves() {
        assert!((excess_kurtosis(&sine(4096)) + 1.5).abs() < 1e-3);
    }

    #[test]
    fn asymmetric_signal_has_positive_skew() {
        // A spiky, right-tailed signal.
        let mut signal = vec![0.0; 100];
        signal[10] = 10.0;
        signal[50] = 12.0;
        assert!(skewness(&signal) > 1.0);
        assert!(excess_kurtosis(&signal) > 5.0);
    }

    #[test]
    fn degenerate_signals_yield_zero_moments() {
        assert!(skewness(&[]).abs() < f64::EPSILON);
        assert!(excess_kurtosis(&[]).abs() < f64::EPSILON);
        assert!(skewness(&[3.0; 64]).abs() < f64::EPSILON);
        assert!(excess_kurtosis(&[3.0; 64]).abs() < f64::EPSILON);
    }
}
