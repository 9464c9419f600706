//! Statistics collection
//!
//! This module contains the trackers a replication updates while it runs and
//! the calculators the replication driver aggregates results into.
//!
//! # Overview
//!
//! - **Counter**: monotonic integer accumulator
//! - **Tally**: running mean, variance, min and max
//! - **Aggregate**: sum accumulator (operating cost)
//! - **TimeWeightedQueueStats**: queue length integrated over simulated time
//! - **ConfidenceCalculator**: one value per replication, t-based interval
//!
//! # Usage Example
//!
//! ```rust
//! use auto_body_shop_simulator::statistics::*;
//!
//! let mut cost = ConfidenceCalculator::new("Daily Operating Cost", DEFAULT_CONFIDENCE_LEVEL);
//! for day in [1210.0, 1390.0, 1150.0] {
//!     cost.update(day);
//! }
//! let summary = cost.summary();
//! assert_eq!(summary.observations, 3);
//! assert!(summary.lower_bound.unwrap() <= summary.mean);
//! ```

pub mod confidence;
pub mod queue_stats;
pub mod student_t;
pub mod trackers;

pub use confidence::*;
pub use queue_stats::*;
pub use trackers::*;
