//! Confidence intervals across replications
//!
//! A [`ConfidenceCalculator`] receives one scalar per replication and reports
//! the usual summary plus a t-based confidence interval for the mean.

use crate::statistics::{student_t, Tally};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default confidence level for every calculator
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Aggregates one observation per replication into an interval estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceCalculator {
    /// Display name of the metric
    pub name: String,
    confidence_level: f64,
    tally: Tally,
}

impl ConfidenceCalculator {
    /// Create a calculator at the given confidence level
    pub fn new(name: impl Into<String>, confidence_level: f64) -> Self {
        let name = name.into();
        Self { tally: Tally::new(name.clone()), name, confidence_level }
    }

    /// Feed one replication's value
    pub fn update(&mut self, value: f64) {
        self.tally.record(value);
    }

    /// Number of replications observed
    pub fn observations(&self) -> u64 {
        self.tally.count()
    }

    /// Mean across replications
    pub fn mean(&self) -> f64 {
        self.tally.mean()
    }

    /// Sample standard deviation across replications
    pub fn std_dev(&self) -> f64 {
        self.tally.std_dev()
    }

    /// Smallest observed value
    pub fn min(&self) -> Option<f64> {
        self.tally.min()
    }

    /// Largest observed value
    pub fn max(&self) -> Option<f64> {
        self.tally.max()
    }

    /// Confidence level the interval is computed at
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Half width of the interval; needs at least two observations
    pub fn half_width(&self) -> Option<f64> {
        let n = self.observations();
        if n < 2 {
            return None;
        }
        let df = (n - 1) as f64;
        let t = student_t::quantile(0.5 + self.confidence_level / 2.0, df);
        Some(t * self.std_dev() / (n as f64).sqrt())
    }

    /// Lower bound of the interval for the mean
    pub fn lower_bound(&self) -> Option<f64> {
        self.half_width().map(|h| self.mean() - h)
    }

    /// Upper bound of the interval for the mean
    pub fn upper_bound(&self) -> Option<f64> {
        self.half_width().map(|h| self.mean() + h)
    }

    /// Immutable snapshot for reporting
    pub fn summary(&self) -> ConfidenceSummary {
        ConfidenceSummary {
            name: self.name.clone(),
            observations: self.observations(),
            mean: self.mean(),
            std_dev: self.std_dev(),
            min: self.min(),
            max: self.max(),
            confidence_level: self.confidence_level,
            lower_bound: self.lower_bound(),
            upper_bound: self.upper_bound(),
        }
    }
}

/// Final result of one metric across a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    /// Display name of the metric
    pub name: String,
    /// Number of replications observed
    pub observations: u64,
    /// Mean across replications
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Smallest value
    pub min: Option<f64>,
    /// Largest value
    pub max: Option<f64>,
    /// Confidence level of the interval
    pub confidence_level: f64,
    /// Lower interval bound, absent below two observations
    pub lower_bound: Option<f64>,
    /// Upper interval bound, absent below two observations
    pub upper_bound: Option<f64>,
}

impl fmt::Display for ConfidenceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v));
        write!(
            f,
            "{:<30} {:>6} {:>12.4} {:>12.4} {:>12} {:>12} {:>11.2} {:>12} {:>12}",
            self.name,
            self.observations,
            self.mean,
            self.std_dev,
            opt(self.min),
            opt(self.max),
            self.confidence_level,
            opt(self.lower_bound),
            opt(self.upper_bound)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_brackets_mean() {
        let mut cc = ConfidenceCalculator::new("Daily Operating Cost", DEFAULT_CONFIDENCE_LEVEL);
        for value in [1200.0, 1350.0, 980.0, 1100.0, 1420.0] {
            cc.update(value);
        }
        let lower = cc.lower_bound().unwrap();
        let upper = cc.upper_bound().unwrap();
        assert!(lower <= cc.mean() && cc.mean() <= upper);
        assert_eq!(cc.observations(), 5);
        assert_eq!(cc.min(), Some(980.0));
        assert_eq!(cc.max(), Some(1420.0));
    }

    #[test]
    fn test_known_interval_width() {
        // n = 10 values 1..=10: mean 5.5, sd 3.02765, t(0.975, 9) = 2.26216
        let mut cc = ConfidenceCalculator::new("ramp", 0.95);
        for value in 1..=10 {
            cc.update(value as f64);
        }
        let expected = 2.26216 * 3.027_650_354 / 10f64.sqrt();
        assert!((cc.half_width().unwrap() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_single_observation_has_no_interval() {
        let mut cc = ConfidenceCalculator::new("single", 0.95);
        cc.update(4.0);
        assert_eq!(cc.half_width(), None);
        let summary = cc.summary();
        assert_eq!(summary.observations, 1);
        assert_eq!(summary.lower_bound, None);
        assert_eq!(summary.upper_bound, None);
    }

    #[test]
    fn test_identical_observations_collapse_interval() {
        let mut cc = ConfidenceCalculator::new("flat", 0.99);
        for _ in 0..4 {
            cc.update(2.5);
        }
        assert_eq!(cc.lower_bound(), Some(2.5));
        assert_eq!(cc.upper_bound(), Some(2.5));
    }

    #[test]
    fn test_higher_level_widens_interval() {
        let mut narrow = ConfidenceCalculator::new("m", 0.90);
        let mut wide = ConfidenceCalculator::new("m", 0.99);
        for value in [3.0, 5.0, 4.0, 6.0, 2.0] {
            narrow.update(value);
            wide.update(value);
        }
        assert!(wide.half_width().unwrap() > narrow.half_width().unwrap());
    }
}
