//! Auto Body Shop Simulator
//!
//! A discrete-event simulation of a small auto body shop. Customers arrive
//! at a time-varying rate, may balk at the waiting room, get repaired by a
//! mechanic or referred to a specialist working out of a limited number of
//! rented stalls. Each replication simulates one business day; a batch of
//! independently seeded replications yields confidence intervals on cost,
//! throughput, losses, response time and staff utilization.
//!
//! # Overview
//!
//! The library is split into a generic process-oriented scheduler and the shop
//! model that runs on top of it. Every active entity (the customer generator,
//! each customer, each mechanic, each specialist) is a small state machine
//! resumed by the scheduler whenever it is due.
//!
//! ## Key Features
//!
//! - **Process Scheduler**: activate, hold, passivate with FIFO ordering on ties
//! - **Seeded Variates**: one independent random stream per source of randomness
//! - **Statistics**: counters, tallies, time-weighted queue lengths, t intervals
//! - **Replication Driver**: validated batches with reproducible seeds
//! - **Reports**: console tables and JSON documents
//!
//! ## Quick Start
//!
//! ```rust
//! use auto_body_shop_simulator::*;
//!
//! let config = ShopConfig {
//!     num_replications: 5,
//!     ..Default::default()
//! };
//!
//! let results = ReplicationDriver::new(config)?.run()?;
//! let fixed = results.calculator(Metric::FullyFixed).unwrap();
//! println!("{} cars fixed per day on average", fixed.mean());
//! # Ok::<(), SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`engine`]: Simulation clock, event agenda and process scheduler
//! - [`statistics`]: Observation trackers and confidence intervals
//! - [`shop`]: Queues, stalls, variates and the shop life cycles
//! - [`simulation`]: Replications, batches, reports and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Engine    │    │ Statistics  │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Scheduler   │    │ Trackers    │
//! │ Enums       │    │ Processes   │    │ Intervals   │
//! │ Config      │    │ Clock       │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐             │
//! │    Shop     │    │ Simulation  │             │
//! │             │    │             │             │
//! │ Life Cycles │◄───┤ Replication │─────────────┘
//! │ Queues      │    │ Driver      │
//! │ Stalls      │    │ Reports     │
//! └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod engine;
pub mod shop;
pub mod simulation;
pub mod statistics;
pub mod types;

// Core types and identifiers
pub use types::{
    BatchId, ConfigError, ConfigValidationError, CustomerOutcome, Metric, OutputFormat,
    ProcessId, ServiceStage, ShopConfig,
};

// Scheduler
pub use engine::{
    Context, Process, ProcessState, RunOutcome, Scheduler, SchedulerError, SchedulerResult,
    Suspend,
};

// Statistics
pub use statistics::{
    Aggregate, ConfidenceCalculator, ConfidenceSummary, Counter, Tally, TimeWeightedQueueStats,
};

// Shop model
pub use shop::{Shop, ShopProcess, ShopQueues, ShopVariates, StallPool, Trace, TraceEntry};

// Simulation types and functionality
pub use simulation::{
    BatchResults, LoggingConfig, ReplicationDriver, ReplicationSnapshot, ShopReplication,
    SimulationError, SimulationResult, Utilization,
};
