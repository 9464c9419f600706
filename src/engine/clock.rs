//! Simulated clock
//!
//! Time is measured in simulated hours from the opening of the shop.

use crate::engine::{SchedulerError, SchedulerResult};
use serde::Serialize;

/// Monotonically non-decreasing simulated clock for one replication
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    /// Create a clock positioned at time zero
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Current simulated time in hours
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward to `target`
    pub fn advance_to(&mut self, target: f64) -> SchedulerResult<()> {
        if !target.is_finite() {
            return Err(SchedulerError::NonFiniteTime(target));
        }
        if target < self.now {
            return Err(SchedulerError::ClockRegression { now: self.now, target });
        }
        self.now = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        assert_eq!(SimClock::new().now(), 0.0);
        assert_eq!(SimClock::default().now(), 0.0);
    }

    #[test]
    fn test_clock_advances_and_allows_equal_time() {
        let mut clock = SimClock::new();
        clock.advance_to(1.5).unwrap();
        clock.advance_to(1.5).unwrap();
        assert_eq!(clock.now(), 1.5);
    }

    #[test]
    fn test_clock_rejects_regression_and_nan() {
        let mut clock = SimClock::new();
        clock.advance_to(2.0).unwrap();
        assert!(matches!(
            clock.advance_to(1.0),
            Err(SchedulerError::ClockRegression { .. })
        ));
        assert!(matches!(clock.advance_to(f64::NAN), Err(SchedulerError::NonFiniteTime(_))));
        assert_eq!(clock.now(), 2.0);
    }
}
