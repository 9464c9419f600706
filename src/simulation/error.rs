//! Error types and handling
//!
//! This module contains the error type surfaced by replications and batches.
//! Nothing here is retried: a failed replication aborts the whole batch and the
//! caller decides whether to rerun.

use crate::engine::SchedulerError;
use crate::types::{ConfigError, ConfigValidationError};
use thiserror::Error;

/// Errors that can occur during a simulation batch
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration could not be loaded
    #[error("Configuration loading failed: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(#[from] ConfigValidationError),

    /// A scheduler or life-cycle invariant was violated
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// A completed replication failed validation
    #[error("Replication {replication} rejected: {reason}")]
    ReplicationRejected {
        /// 1-based replication index
        replication: usize,
        /// Why the snapshot was rejected
        reason: String,
    },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a replication rejection
    pub fn rejected(replication: usize, reason: impl Into<String>) -> Self {
        Self::ReplicationRejected { replication, reason: reason.into() }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigLoad(_) | SimulationError::ConfigValidation(_) => "Configuration",
            SimulationError::Scheduler(_) => "Scheduler",
            SimulationError::ReplicationRejected { .. } => "Replication",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
