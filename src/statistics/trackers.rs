//! Scalar statistics trackers
//!
//! Counters, running tallies and sum aggregates updated by the shop's life
//! cycles during one replication.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic integer accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Display name of the counter
    pub name: String,
    value: u64,
}

impl Counter {
    /// Create a counter starting at zero
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: 0 }
    }

    /// Add one
    pub fn increment(&mut self) {
        self.value += 1;
    }

    /// Current count
    pub fn value(&self) -> u64 {
        self.value
    }
}

/// Running mean, variance, minimum and maximum over scalar observations
///
/// Uses Welford's update so the variance stays accurate over long batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    /// Display name of the tally
    pub name: String,
    count: u64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Tally {
    /// Create an empty tally
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: None,
            max: None,
        }
    }

    /// Record one observation
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    /// Number of observations recorded
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean; zero when nothing was recorded
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n - 1 denominator); zero below two observations
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest observation, `None` when empty
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Largest observation, `None` when empty
    pub fn max(&self) -> Option<f64> {
        self.max
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: n={} mean={:.4} sd={:.4}",
            self.name,
            self.count,
            self.mean(),
            self.std_dev()
        )
    }
}

/// Sum accumulator, e.g. today's operating cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Display name of the aggregate
    pub name: String,
    total: f64,
}

impl Aggregate {
    /// Create an aggregate starting at zero
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), total: 0.0 }
    }

    /// Add a contribution
    pub fn add(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "{} received negative contribution {}", self.name, amount);
        self.total += amount;
    }

    /// Sum of all contributions
    pub fn total(&self) -> f64 {
        self.total
    }
}
