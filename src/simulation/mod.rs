//! Replications, batches and reporting
//!
//! This module turns the shop model into results: one replication runs one
//! simulated business day, the driver runs a batch of them, and the report
//! functions lay the aggregated intervals out for people and machines.
//!
//! # Overview
//!
//! - **ShopReplication**: wires a shop to a scheduler, runs it, takes a snapshot
//! - **ReplicationSnapshot**: final metric values of one day, with validation
//! - **ReplicationDriver**: seeds, runs and validates a batch; aborts on rejection
//! - **BatchResults**: one confidence calculator per metric
//! - **SimulationError**: error type for everything above
//! - **LoggingConfig**: tracing subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use auto_body_shop_simulator::simulation::*;
//! use auto_body_shop_simulator::types::*;
//!
//! let config = ShopConfig { num_replications: 3, ..Default::default() };
//! let results = ReplicationDriver::new(config)?.run()?;
//!
//! let cost = results.calculator(Metric::DailyOperatingCost).unwrap();
//! assert_eq!(cost.observations(), 3);
//! assert!(cost.lower_bound().unwrap() <= cost.mean());
//! # Ok::<(), SimulationError>(())
//! ```

pub mod driver;
pub mod error;
pub mod logging;
pub mod replication;
pub mod report;

// Re-export all public types for convenience
pub use driver::*;
pub use error::*;
pub use logging::*;
pub use replication::*;
pub use report::*;
