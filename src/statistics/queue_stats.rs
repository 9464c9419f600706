//! Time-weighted queue length statistics

use serde::{Deserialize, Serialize};

/// Integral of a queue's length over simulated time
///
/// The tracker must be told about every length change, with the simulated
/// time at which it happened. Between changes the length is piecewise
/// constant, so the integral is exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWeightedQueueStats {
    start: f64,
    last_change: f64,
    length: usize,
    max_length: usize,
    area: f64,
}

impl TimeWeightedQueueStats {
    /// Start tracking an empty queue at `start`
    pub fn new(start: f64) -> Self {
        Self { start, last_change: start, length: 0, max_length: 0, area: 0.0 }
    }

    /// Record that the queue now holds `length` entries as of `now`
    pub fn update(&mut self, now: f64, length: usize) {
        debug_assert!(now >= self.last_change, "queue statistics updated out of order");
        self.area += self.length as f64 * (now - self.last_change);
        self.last_change = now;
        self.length = length;
        self.max_length = self.max_length.max(length);
    }

    /// Current length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Largest length seen so far
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Time-average length over `[start, now]`
    ///
    /// Zero when no simulated time has elapsed.
    pub fn average_length(&self, now: f64) -> f64 {
        let elapsed = now - self.start;
        if elapsed <= 0.0 {
            return 0.0;
        }
        let area = self.area + self.length as f64 * (now - self.last_change).max(0.0);
        area / elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_time_weighted() {
        let mut stats = TimeWeightedQueueStats::new(0.0);
        stats.update(0.0, 2); // length 2 for 1 hour
        stats.update(1.0, 0); // length 0 for 2 hours
        stats.update(3.0, 4); // length 4 for 1 hour

        assert!((stats.average_length(4.0) - 1.5).abs() < 1e-12);
        assert_eq!(stats.max_length(), 4);
        assert_eq!(stats.length(), 4);
    }

    #[test]
    fn test_no_elapsed_time_yields_zero() {
        let mut stats = TimeWeightedQueueStats::new(0.0);
        stats.update(0.0, 3);
        assert_eq!(stats.average_length(0.0), 0.0);
        assert_eq!(stats.max_length(), 3);
    }

    #[test]
    fn test_constant_queue_average_equals_length() {
        let mut stats = TimeWeightedQueueStats::new(0.0);
        stats.update(0.0, 2);
        assert!((stats.average_length(6.0) - 2.0).abs() < 1e-12);
    }
}
