// Validation parameters for comparing sample results with exact results
//
// Epsilon is the accuracy guarantee of the sampling algorithm. It shifts
// three thresholds:
// - exact results are read down to min_freq - epsilon (acceptable band)
// - sample results are read down to min_freq - epsilon / 2
// - confidence intervals wider than 2 * epsilon count as too loose
//
// Derived thresholds are snapped to 12 decimal places so that 0.4 - 0.1
// compares equal to a record written as 0.3.

use serde::{Deserialize, Serialize};

/// Parameters of one comparison run
///
/// # Example
/// ```
/// use fimcheck::config::ValidationConfig;
///
/// let config = ValidationConfig::new(0.1, 0.4);
/// assert!(config.validate().is_ok());
/// assert!((config.extended_threshold() - 0.3).abs() < 1e-12);
/// assert!((config.sample_threshold() - 0.35).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum absolute frequency error the sampling algorithm promises
    pub epsilon: f64,

    /// Minimum frequency an itemset needs to be frequent
    pub min_freq: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            min_freq: 0.2,
        }
    }
}

impl ValidationConfig {
    pub fn new(epsilon: f64, min_freq: f64) -> Self {
        Self { epsilon, min_freq }
    }

    /// Threshold for the extended exact results
    pub fn extended_threshold(&self) -> f64 {
        snap(self.min_freq - self.epsilon)
    }

    /// Threshold for the sample results
    pub fn sample_threshold(&self) -> f64 {
        snap(self.min_freq - (self.epsilon / 2.0))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(format!(
                "epsilon must be a non-negative number, got {}",
                self.epsilon
            ));
        }

        if !self.min_freq.is_finite() || self.min_freq <= 0.0 || self.min_freq > 1.0 {
            return Err(format!("min_freq must be in (0, 1], got {}", self.min_freq));
        }

        // Keeps every exact frequency strictly positive for relative errors
        if self.extended_threshold() <= 0.0 {
            return Err(format!(
                "min_freq - epsilon must be positive, got {} - {} = {}",
                self.min_freq,
                self.epsilon,
                self.extended_threshold()
            ));
        }

        Ok(())
    }
}

fn snap(value: f64) -> f64 {
    const SCALE: f64 = 1e12;
    (value * SCALE).round() / SCALE
}
